use crate::{Channel, FeatureLayout, FeatureSlot, OcrFeatures};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error("no min/max bounds recorded for channel {channel:?}")]
    MissingBounds { channel: Channel },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    fn include(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    /// Map `v` into `[0, 1]` for values inside the bounds. A constant
    /// channel maps to 0.
    pub fn scale(&self, v: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            0.0
        } else {
            (v - self.min) / range
        }
    }
}

/// Per-channel bounds, shippable as JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxTable {
    pub channels: BTreeMap<Channel, Bounds>,
}

impl MinMaxTable {
    pub fn get(&self, channel: Channel) -> Option<Bounds> {
        self.channels.get(&channel).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Min-max scaler over feature vectors.
///
/// Bounds are learned with [`FeatureScaler::update`] over a training set
/// or loaded from a precomputed table. Padding slots never touch the
/// bounds and come out of [`FeatureScaler::scale`] as `-1`.
#[derive(Clone, Debug)]
pub struct FeatureScaler {
    layout: FeatureLayout,
    table: MinMaxTable,
}

impl FeatureScaler {
    pub fn new(layout: FeatureLayout) -> Self {
        Self {
            layout,
            table: MinMaxTable::default(),
        }
    }

    pub fn from_table(layout: FeatureLayout, table: MinMaxTable) -> Self {
        Self { layout, table }
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn table(&self) -> &MinMaxTable {
        &self.table
    }

    /// Widen the bounds of every channel present in `features`.
    pub fn update(&mut self, features: &OcrFeatures) {
        for slot in features.to_slots(&self.layout) {
            if let FeatureSlot::Value { channel, value } = slot {
                self.table
                    .channels
                    .entry(channel)
                    .and_modify(|b| b.include(value))
                    .or_insert(Bounds {
                        min: value,
                        max: value,
                    });
            }
        }
    }

    pub fn scale(&self, features: &OcrFeatures) -> Result<Vec<f64>, ScaleError> {
        features
            .to_slots(&self.layout)
            .into_iter()
            .map(|slot| match slot {
                FeatureSlot::Value { channel, value } => self
                    .table
                    .get(channel)
                    .map(|b| b.scale(value))
                    .ok_or(ScaleError::MissingBounds { channel }),
                FeatureSlot::Pad => Ok(slot.value()),
            })
            .collect()
    }

    /// Forget all learned bounds.
    pub fn reset(&mut self) {
        self.table.channels.clear();
    }
}
