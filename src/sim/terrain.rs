//! Terrain track: a cyclic strip of terrain segments along the scroll axis

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WalkError;

/// Kind of ground underfoot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    Dirt,
    Mud,
    Ice,
    Cobblestone,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Dirt,
        TerrainKind::Mud,
        TerrainKind::Ice,
        TerrainKind::Cobblestone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainKind::Dirt => "dirt",
            TerrainKind::Mud => "mud",
            TerrainKind::Ice => "ice",
            TerrainKind::Cobblestone => "cobblestone",
        }
    }

    /// Capitalized name for the HUD
    pub fn label(&self) -> &'static str {
        match self {
            TerrainKind::Dirt => "Dirt",
            TerrainKind::Mud => "Mud",
            TerrainKind::Ice => "Ice",
            TerrainKind::Cobblestone => "Cobblestone",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 8-bit RGB color, (de)serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS hex color (`#RRGGBB` or `#RGB`)
    pub fn from_hex(s: &str) -> Result<Self, WalkError> {
        let invalid = || WalkError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let channel =
                    |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc == #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = WalkError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// One stretch of a single terrain type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: TerrainKind,
    pub color: Rgb,
    /// Extent along the scroll axis
    pub length: f64,
}

impl Segment {
    pub const fn new(kind: TerrainKind, color: Rgb, length: f64) -> Self {
        Self {
            kind,
            color,
            length,
        }
    }
}

/// Returned by lookups on an empty track
pub static FALLBACK_SEGMENT: Segment = Segment::new(TerrainKind::Dirt, Rgb::BLACK, 0.0);

/// Ordered, cyclically repeating sequence of segments.
///
/// Fixed after construction. Positions wrap modulo the total length and are
/// normalized into `[0, total_length)`, so negative positions count backwards
/// from the end of the track. Segment extents are half-open: a position
/// exactly on a boundary belongs to the following segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTrack {
    segments: Vec<Segment>,
    total_length: f64,
}

impl TerrainTrack {
    /// Build a track, rejecting segments whose length is not finite and positive
    pub fn new(segments: Vec<Segment>) -> Result<Self, WalkError> {
        for (index, seg) in segments.iter().enumerate() {
            if !seg.length.is_finite() || seg.length <= 0.0 {
                return Err(WalkError::InvalidSegmentLength {
                    index,
                    length: seg.length,
                });
            }
        }
        let total_length = segments.iter().map(|s| s.length).sum();
        Ok(Self {
            segments,
            total_length,
        })
    }

    /// Track with no segments; every lookup yields [`FALLBACK_SEGMENT`]
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
            total_length: 0.0,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Whether lookups will hit the fallback path
    pub fn is_degenerate(&self) -> bool {
        self.total_length <= 0.0
    }

    /// Position folded into `[0, total_length)`, or 0 on a degenerate track
    pub fn wrap(&self, position: f64) -> f64 {
        if self.total_length > 0.0 {
            let r = position.rem_euclid(self.total_length);
            // Tiny negatives round up to total_length
            if r >= self.total_length { 0.0 } else { r }
        } else {
            0.0
        }
    }

    /// Index of the segment at `position`, `None` on an empty track
    pub fn segment_index_at(&self, position: f64) -> Option<usize> {
        if self.segments.is_empty() {
            return None;
        }

        let effective = self.wrap(position);
        let mut end = 0.0;
        for (i, seg) in self.segments.iter().enumerate() {
            end += seg.length;
            if effective < end {
                return Some(i);
            }
        }

        // NaN positions, or rounding that lands exactly on total_length
        Some(0)
    }

    /// Segment occupying `position`
    pub fn segment_at(&self, position: f64) -> &Segment {
        match self.segment_index_at(position) {
            Some(i) => &self.segments[i],
            None => {
                log::trace!("segment_at({}) on empty track, using fallback", position);
                &FALLBACK_SEGMENT
            }
        }
    }

    /// Wrapped start offset of segment `index`
    pub fn segment_start(&self, index: usize) -> Option<f64> {
        if index >= self.segments.len() {
            return None;
        }
        Some(self.segments[..index].iter().map(|s| s.length).sum())
    }

    /// Scroll distance from `position` to the start of the next segment
    pub fn distance_to_next_boundary(&self, position: f64) -> Option<f64> {
        let index = self.segment_index_at(position)?;
        let start = self.segment_start(index)?;
        let end = start + self.segments[index].length;
        Some(end - self.wrap(position))
    }
}

impl Default for TerrainTrack {
    /// Dirt, mud, ice and cobblestone, 100 units each
    fn default() -> Self {
        Self {
            segments: vec![
                Segment::new(TerrainKind::Dirt, Rgb::new(0xD2, 0x69, 0x1E), 100.0),
                Segment::new(TerrainKind::Mud, Rgb::new(0x8B, 0x45, 0x13), 100.0),
                Segment::new(TerrainKind::Ice, Rgb::new(0xA4, 0xD8, 0xF0), 100.0),
                Segment::new(TerrainKind::Cobblestone, Rgb::new(0x69, 0x69, 0x69), 100.0),
            ],
            total_length: 400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kind_at(track: &TerrainTrack, pos: f64) -> TerrainKind {
        track.segment_at(pos).kind
    }

    #[test]
    fn test_default_track_lookup() {
        let track = TerrainTrack::default();
        assert_eq!(track.total_length(), 400.0);
        assert_eq!(kind_at(&track, 0.0), TerrainKind::Dirt);
        assert_eq!(kind_at(&track, 99.999), TerrainKind::Dirt);
        assert_eq!(kind_at(&track, 100.0), TerrainKind::Mud);
        assert_eq!(kind_at(&track, 250.0), TerrainKind::Ice);
        assert_eq!(kind_at(&track, 399.0), TerrainKind::Cobblestone);
        assert_eq!(kind_at(&track, 400.0), TerrainKind::Dirt);
    }

    #[test]
    fn test_negative_positions_wrap_from_end() {
        let track = TerrainTrack::default();
        assert_eq!(kind_at(&track, -1.0), TerrainKind::Cobblestone);
        assert_eq!(kind_at(&track, -100.0), TerrainKind::Cobblestone);
        assert_eq!(kind_at(&track, -100.5), TerrainKind::Ice);
        assert_eq!(kind_at(&track, -400.0), TerrainKind::Dirt);
        assert_eq!(track.wrap(-1.0), 399.0);
    }

    #[test]
    fn test_tiny_negative_wraps_to_start() {
        let track = TerrainTrack::default();
        for pos in [-1e-14, -f64::EPSILON, -1e-300] {
            assert_eq!(track.wrap(pos), 0.0, "pos {}", pos);
            assert_eq!(track.segment_index_at(pos), Some(0));
            assert_eq!(track.distance_to_next_boundary(pos), Some(100.0));
        }
    }

    #[test]
    fn test_boundary_belongs_to_next_segment() {
        let track = TerrainTrack::default();
        assert_eq!(track.segment_index_at(100.0), Some(1));
        assert_eq!(track.segment_index_at(200.0), Some(2));
        assert_eq!(track.segment_index_at(300.0), Some(3));
        assert_eq!(track.segment_index_at(299.999), Some(2));
    }

    #[test]
    fn test_uneven_segments() {
        let track = TerrainTrack::new(vec![
            Segment::new(TerrainKind::Ice, Rgb::BLACK, 10.0),
            Segment::new(TerrainKind::Mud, Rgb::BLACK, 90.0),
        ])
        .unwrap();
        assert_eq!(kind_at(&track, 9.0), TerrainKind::Ice);
        assert_eq!(kind_at(&track, 10.0), TerrainKind::Mud);
        assert_eq!(kind_at(&track, 105.0), TerrainKind::Ice);
        assert_eq!(track.segment_start(1), Some(10.0));
        assert_eq!(track.segment_start(2), None);
    }

    #[test]
    fn test_empty_track_uses_fallback() {
        let track = TerrainTrack::empty();
        assert!(track.is_degenerate());
        assert_eq!(track.segment_at(0.0), &FALLBACK_SEGMENT);
        assert_eq!(track.segment_at(-123.0), &FALLBACK_SEGMENT);
        assert_eq!(track.segment_at(f64::NAN), &FALLBACK_SEGMENT);
        assert_eq!(track.segment_index_at(5.0), None);
        assert_eq!(track.distance_to_next_boundary(5.0), None);
        assert_eq!(track.wrap(55.0), 0.0);
    }

    #[test]
    fn test_non_finite_positions_do_not_panic() {
        let track = TerrainTrack::default();
        assert_eq!(kind_at(&track, f64::NAN), TerrainKind::Dirt);
        assert_eq!(kind_at(&track, f64::INFINITY), TerrainKind::Dirt);
        assert_eq!(kind_at(&track, f64::NEG_INFINITY), TerrainKind::Dirt);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        for length in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = TerrainTrack::new(vec![
                Segment::new(TerrainKind::Dirt, Rgb::BLACK, 50.0),
                Segment::new(TerrainKind::Mud, Rgb::BLACK, length),
            ]);
            assert!(matches!(
                result,
                Err(WalkError::InvalidSegmentLength { index: 1, .. })
            ));
        }
    }

    #[test]
    fn test_distance_to_next_boundary() {
        let track = TerrainTrack::default();
        assert_eq!(track.distance_to_next_boundary(0.0), Some(100.0));
        assert_eq!(track.distance_to_next_boundary(130.0), Some(70.0));
        assert_eq!(track.distance_to_next_boundary(-1.0), Some(1.0));
    }

    #[test]
    fn test_color_hex() {
        let c = Rgb::from_hex("#D2691E").unwrap();
        assert_eq!(c, Rgb::new(210, 105, 30));
        assert_eq!(c.to_hex(), "#D2691E");
        assert_eq!(Rgb::from_hex("#000").unwrap(), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::new(255, 255, 255));
        assert!(Rgb::from_hex("D2691E").is_err());
        assert!(Rgb::from_hex("#D2691").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_segment_serde() {
        let seg: Segment =
            serde_json::from_str(r##"{"kind":"cobblestone","color":"#696969","length":40}"##)
                .unwrap();
        assert_eq!(seg.kind, TerrainKind::Cobblestone);
        assert_eq!(seg.color, Rgb::new(0x69, 0x69, 0x69));
        assert_eq!(seg.length, 40.0);

        let bad = serde_json::from_str::<Segment>(r##"{"kind":"lava","color":"#000","length":1}"##);
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn prop_cyclic(pos in -100_000i32..100_000, k in -1000i32..1000) {
            let track = TerrainTrack::default();
            let p = pos as f64;
            let shifted = p + k as f64 * track.total_length();
            prop_assert_eq!(track.segment_index_at(p), track.segment_index_at(shifted));
        }

        #[test]
        fn prop_lookup_lands_inside_segment(pos in -1.0e6f64..1.0e6) {
            let track = TerrainTrack::default();
            let i = track.segment_index_at(pos).unwrap();
            let start = track.segment_start(i).unwrap();
            let wrapped = track.wrap(pos);
            prop_assert!(wrapped >= start);
            prop_assert!(wrapped < start + track.segments()[i].length);
        }

        #[test]
        fn prop_boundaries_resolve_forward(seg in 0usize..4, laps in -50i32..50) {
            let track = TerrainTrack::default();
            let boundary = track.segment_start(seg).unwrap() + laps as f64 * 400.0;
            prop_assert_eq!(track.segment_index_at(boundary), Some(seg));
        }
    }
}
