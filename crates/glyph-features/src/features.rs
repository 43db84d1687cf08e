//! Feature record and its fixed-length vector layout.
//!
//! The vector is a flat list of [`FeatureSlot`]s. Each slot is either a
//! value tagged with the [`Channel`] it belongs to, or padding. Padding
//! renders as `-1` but is never mistaken for a measurement: the scaler
//! skips it structurally.

use crate::FeatureParams;
use glyph_features_shape::{PrincipalAxis, SectionMetrics};
use glyph_features_skeleton::SkeletonSummary;
use glyph_features_sweep::AngleRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value written for padding slots.
pub const PAD_VALUE: f64 = -1.0;

/// Scaling group of a vector slot. Slots of one channel share min-max bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    AspectRatio,
    CentroidX,
    CentroidY,
    MassToTotalArea,
    GlyphMajorAxis,
    GlyphMinorAxis,
    GlyphAxisAngle,
    Intersections,
    IntersectionPercentages,
    NumberOfNegativeSpaces,
    NumberOfNegativeSpaceBorders,
    Circularity,
    SectionAspectRatio,
    CentroidPositionX,
    CentroidPositionY,
    RelativeMass,
    RelativeMax,
    MajorAxisLength,
    MinorAxisLength,
    AxisAngle,
    Enclosed,
    TotalLengthToDiagonalLengthRatio,
    TotalNumberOfLineSegments,
    AngleChanges,
    StartPosition,
    EndPosition,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FeatureSlot {
    Value { channel: Channel, value: f64 },
    Pad,
}

impl FeatureSlot {
    pub fn value(&self) -> f64 {
        match *self {
            FeatureSlot::Value { value, .. } => value,
            FeatureSlot::Pad => PAD_VALUE,
        }
    }
}

/// Shape of the feature vector; the length depends on nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    pub samples: usize,
    pub pad_len: usize,
    pub max_sections: usize,
}

const SIMPLE_SLOTS: usize = 4;
const GLYPH_AXIS_SLOTS: usize = 3;
const SECTION_SLOTS: usize = 10;

impl FeatureLayout {
    pub fn from_params(params: &FeatureParams) -> Self {
        Self {
            samples: params.sweep.samples,
            pad_len: params.pad_len,
            max_sections: params.max_sections,
        }
    }

    /// Number of slots in every vector built with this layout.
    pub fn len(&self) -> usize {
        let sweep = 2 * self.samples * self.pad_len;
        let sections = 2 * (1 + self.max_sections * SECTION_SLOTS);
        let skeleton = 2 + self.pad_len + 2;
        SIMPLE_SLOTS + GLYPH_AXIS_SLOTS + sweep + sections + skeleton
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Glyph bounding box in inclusive pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
    /// `max_x - min_x`.
    pub width: usize,
    /// `max_y - min_y`.
    pub height: usize,
}

impl GlyphBox {
    pub fn diagonal(&self) -> f64 {
        ((self.width * self.width + self.height * self.height) as f64).sqrt()
    }
}

/// Everything measured on one glyph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrFeatures {
    pub bounding_box: GlyphBox,
    pub aspect_ratio: f64,
    /// Center of mass minus image center, pixels.
    pub centroid_x: f64,
    pub centroid_y: f64,
    /// Foreground share of the image, percent.
    pub mass_to_total_area: f64,
    pub principal_axis: PrincipalAxis,
    pub angles: Vec<AngleRecord>,
    pub percentages: BTreeMap<i32, Vec<f64>>,
    /// Stroke components of the glyph itself.
    pub glyph_sections: Vec<SectionMetrics>,
    pub negative_spaces: Vec<SectionMetrics>,
    pub negative_space_borders: Vec<SectionMetrics>,
    pub skeleton: Option<SkeletonSummary>,
}

impl OcrFeatures {
    /// Lay the record out as slots. Lists longer than the layout allows
    /// are truncated, shorter ones padded.
    pub fn to_slots(&self, layout: &FeatureLayout) -> Vec<FeatureSlot> {
        let mut out = SlotWriter::with_capacity(layout.len());

        out.push(Channel::AspectRatio, self.aspect_ratio);
        out.push(Channel::CentroidX, self.centroid_x);
        out.push(Channel::CentroidY, self.centroid_y);
        out.push(Channel::MassToTotalArea, self.mass_to_total_area);

        out.push(Channel::GlyphMajorAxis, self.principal_axis.major);
        out.push(Channel::GlyphMinorAxis, self.principal_axis.minor);
        out.push(Channel::GlyphAxisAngle, self.principal_axis.angle);

        for k in 0..layout.samples {
            let counts = self
                .angles
                .get(k)
                .map(|a| a.intersections.as_slice())
                .unwrap_or(&[]);
            out.padded(
                Channel::Intersections,
                counts.iter().map(|&c| c as f64),
                layout.pad_len,
            );
        }
        // Share rows follow the angle records, whatever the sweep direction.
        for k in 0..layout.samples {
            let row = self
                .angles
                .get(k)
                .and_then(|a| self.percentages.get(&a.angle))
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            out.padded(
                Channel::IntersectionPercentages,
                row.iter().map(|p| p.round_ties_even()),
                layout.pad_len,
            );
        }

        out.sections(
            Channel::NumberOfNegativeSpaces,
            &self.negative_spaces,
            layout.max_sections,
        );
        out.sections(
            Channel::NumberOfNegativeSpaceBorders,
            &self.negative_space_borders,
            layout.max_sections,
        );

        match &self.skeleton {
            Some(s) => {
                out.push(Channel::TotalLengthToDiagonalLengthRatio, s.length_ratio);
                out.push(Channel::TotalNumberOfLineSegments, s.segment_count as f64);
                out.padded(
                    Channel::AngleChanges,
                    s.angle_changes.iter().copied(),
                    layout.pad_len,
                );
                out.push(Channel::StartPosition, s.start.value());
                out.push(Channel::EndPosition, s.end.value());
            }
            None => out.pad(2 + layout.pad_len + 2),
        }

        out.slots
    }

    /// Raw feature vector with `-1` in padding slots.
    pub fn to_vector(&self, layout: &FeatureLayout) -> Vec<f64> {
        self.to_slots(layout).iter().map(FeatureSlot::value).collect()
    }
}

struct SlotWriter {
    slots: Vec<FeatureSlot>,
}

impl SlotWriter {
    fn with_capacity(n: usize) -> Self {
        Self {
            slots: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, channel: Channel, value: f64) {
        self.slots.push(FeatureSlot::Value { channel, value });
    }

    fn pad(&mut self, n: usize) {
        self.slots.extend(std::iter::repeat_n(FeatureSlot::Pad, n));
    }

    fn padded(&mut self, channel: Channel, values: impl Iterator<Item = f64>, len: usize) {
        let before = self.slots.len();
        for v in values.take(len) {
            self.push(channel, v);
        }
        self.pad(len - (self.slots.len() - before));
    }

    fn sections(&mut self, count: Channel, sections: &[SectionMetrics], max: usize) {
        self.push(count, sections.len() as f64);
        for s in sections.iter().take(max) {
            self.push(Channel::Circularity, s.circularity);
            self.push(Channel::SectionAspectRatio, s.aspect_ratio);
            self.push(Channel::CentroidPositionX, s.centroid_x);
            self.push(Channel::CentroidPositionY, s.centroid_y);
            self.push(Channel::RelativeMass, s.relative_mass);
            self.push(Channel::RelativeMax, s.relative_max);
            self.push(Channel::MajorAxisLength, s.major_axis);
            self.push(Channel::MinorAxisLength, s.minor_axis);
            self.push(Channel::AxisAngle, s.axis_angle);
            self.push(Channel::Enclosed, if s.is_enclosed { 1.0 } else { 0.0 });
        }
        self.pad(max.saturating_sub(sections.len()) * SECTION_SLOTS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_features_skeleton::CornerCode;

    fn section(mass: f64) -> SectionMetrics {
        SectionMetrics {
            circularity: 0.5,
            aspect_ratio: 1.2,
            centroid_x: 0.0,
            centroid_y: 1.0,
            relative_mass: mass,
            relative_max: 10.0,
            major_axis: 2.0,
            minor_axis: 1.0,
            axis_angle: 0.3,
            is_enclosed: true,
        }
    }

    #[test]
    fn empty_record_has_layout_length() {
        let layout = FeatureLayout::from_params(&FeatureParams::default());
        assert_eq!(layout.len(), 4 + 3 + 2 * 120 * 15 + 2 * 41 + 19);
        let slots = OcrFeatures::default().to_slots(&layout);
        assert_eq!(slots.len(), layout.len());
        // Scalars are real values even for an empty glyph.
        assert_eq!(slots[0], FeatureSlot::Value { channel: Channel::AspectRatio, value: 0.0 });
        assert_eq!(slots[7], FeatureSlot::Pad);
        assert_eq!(slots[layout.len() - 1], FeatureSlot::Pad);
    }

    #[test]
    fn lists_are_padded_and_truncated() {
        let layout = FeatureLayout {
            samples: 2,
            pad_len: 3,
            max_sections: 1,
        };
        let features = OcrFeatures {
            angles: vec![
                AngleRecord {
                    angle: 0,
                    intersections: vec![1, 2, 3, 4],
                },
                AngleRecord {
                    angle: 3,
                    intersections: vec![2],
                },
            ],
            percentages: BTreeMap::from([(0, vec![12.5, 33.5]), (3, vec![])]),
            negative_spaces: vec![section(5.0), section(6.0)],
            skeleton: Some(SkeletonSummary {
                length_ratio: 1.5,
                segment_count: 2,
                angle_changes: vec![90.0],
                start: CornerCode::NorthWest,
                end: CornerCode::SouthEast,
            }),
            ..OcrFeatures::default()
        };
        let v = features.to_vector(&layout);
        assert_eq!(v.len(), layout.len());
        // counts: [1 2 3] [2 -1 -1]
        assert_eq!(&v[7..13], &[1.0, 2.0, 3.0, 2.0, -1.0, -1.0]);
        // rounded shares, ties to even: [12 34 -1] [-1 -1 -1]
        assert_eq!(&v[13..19], &[12.0, 34.0, -1.0, -1.0, -1.0, -1.0]);
        // two interior spaces counted, one block kept
        assert_eq!(v[19], 2.0);
        assert_eq!(v[20 + 4], 5.0);
        assert_eq!(v[20 + 9], 1.0);
        // no border spaces: count 0 then one padded block
        assert_eq!(v[30], 0.0);
        assert!(v[31..41].iter().all(|&x| x == -1.0));
        assert_eq!(&v[41..], &[1.5, 2.0, 90.0, -1.0, -1.0, 1.0, 4.0]);
    }

    #[test]
    fn share_rows_follow_descending_sweep_order() {
        let layout = FeatureLayout {
            samples: 2,
            pad_len: 1,
            max_sections: 0,
        };
        let features = OcrFeatures {
            angles: vec![
                AngleRecord {
                    angle: 267,
                    intersections: vec![7],
                },
                AngleRecord {
                    angle: 264,
                    intersections: vec![5],
                },
            ],
            percentages: BTreeMap::from([(264, vec![20.0]), (267, vec![70.0])]),
            ..OcrFeatures::default()
        };
        let v = features.to_vector(&layout);
        assert_eq!(&v[7..9], &[7.0, 5.0]);
        assert_eq!(&v[9..11], &[70.0, 20.0]);
    }
}
