//! Gesture recognition
//!
//! Recognizers here are host-independent state machines fed with pointer
//! samples. Host-specific event wiring lives behind [`GestureSource`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::WalkError;

/// Gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Smallest averaged vertical swipe (px) reported for two-finger input
    pub min_swipe_distance: f32,
    /// Largest difference (px) between the two fingers' movement
    pub max_finger_skew: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: 1.0,
            max_finger_skew: 40.0,
        }
    }
}

/// Vertical displacement from one gesture sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDelta {
    /// Screen-space vertical movement (down is positive)
    pub dy: f64,
    /// Where the gesture is, for footprint placement
    pub at: Vec2,
}

pub type GestureHandler = Box<dyn FnMut(GestureDelta)>;

/// Host capability that reports gesture deltas
pub trait GestureSource {
    fn name(&self) -> &'static str;

    /// Install the callback. Sources accept one handler; a second call
    /// replaces the first.
    fn on_gesture_delta(&mut self, handler: GestureHandler) -> Result<(), WalkError>;
}

/// Single pointer drag (mouse or trackpad)
#[derive(Debug, Default, Clone)]
pub struct MouseDrag {
    pressed: bool,
    last_y: f32,
}

impl MouseDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pressed = true;
        self.last_y = pos.y;
    }

    /// Delta since the previous sample while the button is held
    pub fn move_to(&mut self, pos: Vec2) -> Option<GestureDelta> {
        if !self.pressed {
            return None;
        }
        let dy = pos.y - self.last_y;
        self.last_y = pos.y;
        Some(GestureDelta {
            dy: dy as f64,
            at: pos,
        })
    }

    /// Button up or pointer left the surface
    pub fn release(&mut self) {
        self.pressed = false;
    }
}

/// One active touch contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub pos: Vec2,
}

/// Two fingers swiping vertically together
#[derive(Debug, Clone)]
pub struct TwoFingerSwipe {
    config: GestureConfig,
    anchors: Option<[TouchPoint; 2]>,
}

impl TwoFingerSwipe {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            anchors: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.anchors.is_some()
    }

    /// New contact set; tracking starts only with exactly two fingers
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        self.anchors = match touches {
            [a, b] => Some([*a, *b]),
            _ => None,
        };
    }

    /// Averaged vertical movement of both fingers since the last report.
    ///
    /// Movement below `min_swipe_distance` keeps accumulating against the
    /// same anchors. Fingers moving apart (opposite directions or more than
    /// `max_finger_skew` out of step) re-anchor without reporting.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<GestureDelta> {
        let [a0, b0] = self.anchors?;
        if touches.len() != 2 {
            return None;
        }
        let a1 = touches.iter().find(|t| t.id == a0.id)?;
        let b1 = touches.iter().find(|t| t.id == b0.id)?;

        let da = a1.pos.y - a0.pos.y;
        let db = b1.pos.y - b0.pos.y;

        let opposed = da * db < 0.0;
        if opposed || (da - db).abs() > self.config.max_finger_skew {
            self.anchors = Some([*a1, *b1]);
            return None;
        }

        let dy = (da + db) / 2.0;
        if dy.abs() < self.config.min_swipe_distance {
            return None;
        }

        self.anchors = Some([*a1, *b1]);
        Some(GestureDelta {
            dy: dy as f64,
            at: a1.pos,
        })
    }

    /// Any finger lifted
    pub fn touch_end(&mut self) {
        self.anchors = None;
    }
}

/// Kind of pointer behind a Pointer Events sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    /// Touch or pen contact
    Contact,
}

impl PointerKind {
    /// Map a DOM `pointerType` string
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        if pointer_type == "mouse" {
            Self::Mouse
        } else {
            Self::Contact
        }
    }
}

/// Routes Pointer Events samples to the mouse and two-finger recognizers.
///
/// Contacts are tracked by pointer id. The browser fires `pointercancel`
/// when it takes a touch over for scrolling or zooming, which ends the
/// swipe, so the canvas must opt out with `touch-action: none`.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    mouse: MouseDrag,
    swipe: TwoFingerSwipe,
    contacts: Vec<TouchPoint>,
}

impl PointerTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            mouse: MouseDrag::new(),
            swipe: TwoFingerSwipe::new(config),
            contacts: Vec::with_capacity(2),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_swiping(&self) -> bool {
        self.swipe.is_tracking()
    }

    /// `pointerdown`
    pub fn down(&mut self, kind: PointerKind, id: i32, pos: Vec2) {
        match kind {
            PointerKind::Mouse => self.mouse.press(pos),
            PointerKind::Contact => {
                self.contacts.retain(|t| t.id != id);
                self.contacts.push(TouchPoint { id, pos });
                self.swipe.touch_start(&self.contacts);
            }
        }
    }

    /// `pointermove`
    pub fn moved(&mut self, kind: PointerKind, id: i32, pos: Vec2) -> Option<GestureDelta> {
        match kind {
            PointerKind::Mouse => self.mouse.move_to(pos),
            PointerKind::Contact => {
                let contact = self.contacts.iter_mut().find(|t| t.id == id)?;
                contact.pos = pos;
                self.swipe.touch_move(&self.contacts)
            }
        }
    }

    /// `pointerup`, `pointercancel` or `pointerleave`
    pub fn up(&mut self, kind: PointerKind, id: i32) {
        match kind {
            PointerKind::Mouse => self.mouse.release(),
            PointerKind::Contact => {
                self.contacts.retain(|t| t.id != id);
                self.swipe.touch_end();
            }
        }
    }
}

/// Replays a fixed list of deltas; used by the native runner and tests
#[derive(Default)]
pub struct ScriptedGestures {
    queued: Vec<GestureDelta>,
    handler: Option<GestureHandler>,
}

impl ScriptedGestures {
    pub fn new(deltas: impl IntoIterator<Item = GestureDelta>) -> Self {
        Self {
            queued: deltas.into_iter().collect(),
            handler: None,
        }
    }

    /// Deliver everything queued, returning how many deltas were sent
    pub fn pump(&mut self) -> usize {
        let Some(handler) = self.handler.as_mut() else {
            return 0;
        };
        let count = self.queued.len();
        for delta in self.queued.drain(..) {
            handler(delta);
        }
        count
    }
}

impl GestureSource for ScriptedGestures {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn on_gesture_delta(&mut self, handler: GestureHandler) -> Result<(), WalkError> {
        self.handler = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn touch(id: i32, x: f32, y: f32) -> TouchPoint {
        TouchPoint {
            id,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_mouse_drag() {
        let mut drag = MouseDrag::new();
        assert!(drag.move_to(Vec2::new(0.0, 10.0)).is_none());

        drag.press(Vec2::new(0.0, 100.0));
        let delta = drag.move_to(Vec2::new(5.0, 130.0)).unwrap();
        assert_eq!(delta.dy, 30.0);
        assert_eq!(delta.at, Vec2::new(5.0, 130.0));

        let delta = drag.move_to(Vec2::new(5.0, 120.0)).unwrap();
        assert_eq!(delta.dy, -10.0);

        drag.release();
        assert!(!drag.is_pressed());
        assert!(drag.move_to(Vec2::new(5.0, 200.0)).is_none());
    }

    #[test]
    fn test_two_finger_swipe() {
        let mut swipe = TwoFingerSwipe::new(GestureConfig::default());
        swipe.touch_start(&[touch(1, 100.0, 300.0), touch(2, 200.0, 300.0)]);
        assert!(swipe.is_tracking());

        let delta = swipe
            .touch_move(&[touch(1, 100.0, 320.0), touch(2, 200.0, 330.0)])
            .unwrap();
        assert_eq!(delta.dy, 25.0);

        // Deltas are relative to the last report, not the first contact
        let delta = swipe
            .touch_move(&[touch(1, 100.0, 330.0), touch(2, 200.0, 340.0)])
            .unwrap();
        assert_eq!(delta.dy, 10.0);
    }

    #[test]
    fn test_swipe_matches_touches_by_id() {
        let mut swipe = TwoFingerSwipe::new(GestureConfig::default());
        swipe.touch_start(&[touch(7, 0.0, 0.0), touch(9, 50.0, 0.0)]);
        // Order swapped in the move event
        let delta = swipe
            .touch_move(&[touch(9, 50.0, 12.0), touch(7, 0.0, 8.0)])
            .unwrap();
        assert_eq!(delta.dy, 10.0);
        assert_eq!(delta.at, Vec2::new(0.0, 8.0));
    }

    #[test]
    fn test_swipe_needs_two_fingers() {
        let mut swipe = TwoFingerSwipe::new(GestureConfig::default());
        swipe.touch_start(&[touch(1, 0.0, 0.0)]);
        assert!(!swipe.is_tracking());
        assert!(swipe.touch_move(&[touch(1, 0.0, 50.0)]).is_none());

        swipe.touch_start(&[touch(1, 0.0, 0.0), touch(2, 0.0, 0.0)]);
        assert!(swipe.touch_move(&[touch(1, 0.0, 50.0)]).is_none());

        swipe.touch_end();
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn test_swipe_rejects_opposed_fingers() {
        let mut swipe = TwoFingerSwipe::new(GestureConfig::default());
        swipe.touch_start(&[touch(1, 0.0, 100.0), touch(2, 50.0, 100.0)]);
        // Pinch-like motion
        assert!(
            swipe
                .touch_move(&[touch(1, 0.0, 110.0), touch(2, 50.0, 90.0)])
                .is_none()
        );
        // Re-anchored at the rejected sample
        let delta = swipe
            .touch_move(&[touch(1, 0.0, 114.0), touch(2, 50.0, 94.0)])
            .unwrap();
        assert_eq!(delta.dy, 4.0);
    }

    #[test]
    fn test_swipe_rejects_skew() {
        let config = GestureConfig {
            max_finger_skew: 10.0,
            ..Default::default()
        };
        let mut swipe = TwoFingerSwipe::new(config);
        swipe.touch_start(&[touch(1, 0.0, 0.0), touch(2, 50.0, 0.0)]);
        assert!(
            swipe
                .touch_move(&[touch(1, 0.0, 5.0), touch(2, 50.0, 30.0)])
                .is_none()
        );
    }

    #[test]
    fn test_small_swipes_accumulate() {
        let config = GestureConfig {
            min_swipe_distance: 5.0,
            ..Default::default()
        };
        let mut swipe = TwoFingerSwipe::new(config);
        swipe.touch_start(&[touch(1, 0.0, 0.0), touch(2, 50.0, 0.0)]);
        assert!(
            swipe
                .touch_move(&[touch(1, 0.0, 2.0), touch(2, 50.0, 2.0)])
                .is_none()
        );
        let delta = swipe
            .touch_move(&[touch(1, 0.0, 6.0), touch(2, 50.0, 6.0)])
            .unwrap();
        assert_eq!(delta.dy, 6.0);
    }

    #[test]
    fn test_pointer_tracker_swipe() {
        let mut tracker = PointerTracker::new(GestureConfig::default());
        let contact = PointerKind::from_pointer_type("touch");
        assert_eq!(contact, PointerKind::Contact);
        assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Contact);

        tracker.down(contact, 7, Vec2::new(100.0, 300.0));
        assert!(!tracker.is_swiping());
        assert!(tracker.moved(contact, 7, Vec2::new(100.0, 320.0)).is_none());

        tracker.down(contact, 9, Vec2::new(200.0, 300.0));
        assert!(tracker.is_swiping());
        // Each sample reports the average of both fingers' movement
        let delta = tracker.moved(contact, 7, Vec2::new(100.0, 340.0)).unwrap();
        assert_eq!(delta.dy, 10.0);
        let delta = tracker.moved(contact, 9, Vec2::new(200.0, 320.0)).unwrap();
        assert_eq!(delta.dy, 10.0);
        assert_eq!(delta.at, Vec2::new(100.0, 340.0));

        // Unknown pointer ids are ignored
        assert!(tracker.moved(contact, 3, Vec2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_pointer_cancel_ends_swipe() {
        let mut tracker = PointerTracker::new(GestureConfig::default());
        let contact = PointerKind::Contact;
        tracker.down(contact, 1, Vec2::new(100.0, 300.0));
        tracker.down(contact, 2, Vec2::new(200.0, 300.0));
        assert!(tracker.is_swiping());

        tracker.up(contact, 2);
        assert!(!tracker.is_swiping());
        assert_eq!(tracker.contact_count(), 1);
        assert!(tracker.moved(contact, 1, Vec2::new(100.0, 350.0)).is_none());

        // A fresh second finger resumes tracking
        tracker.down(contact, 4, Vec2::new(200.0, 350.0));
        assert!(tracker.is_swiping());
        let delta = tracker.moved(contact, 4, Vec2::new(200.0, 380.0)).unwrap();
        assert_eq!(delta.dy, 15.0);
    }

    #[test]
    fn test_pointer_tracker_mouse() {
        let mut tracker = PointerTracker::new(GestureConfig::default());
        let mouse = PointerKind::from_pointer_type("mouse");
        assert!(tracker.moved(mouse, 1, Vec2::new(0.0, 10.0)).is_none());
        tracker.down(mouse, 1, Vec2::new(0.0, 100.0));
        let delta = tracker.moved(mouse, 1, Vec2::new(0.0, 140.0)).unwrap();
        assert_eq!(delta.dy, 40.0);
        assert_eq!(tracker.contact_count(), 0);
        tracker.up(mouse, 1);
        assert!(tracker.moved(mouse, 1, Vec2::new(0.0, 200.0)).is_none());
    }

    #[test]
    fn test_scripted_source() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut source = ScriptedGestures::new([
            GestureDelta {
                dy: 1.0,
                at: Vec2::ZERO,
            },
            GestureDelta {
                dy: -2.0,
                at: Vec2::ZERO,
            },
        ]);
        assert_eq!(source.pump(), 0);

        let sink = seen.clone();
        source
            .on_gesture_delta(Box::new(move |d| sink.borrow_mut().push(d.dy)))
            .unwrap();
        assert_eq!(source.name(), "scripted");
        assert_eq!(source.pump(), 2);
        assert_eq!(*seen.borrow(), vec![1.0, -2.0]);
        assert_eq!(source.pump(), 0);
    }
}
