use glyph_features_core::PixelPos;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Composite key naming one consolidated run of one sweep angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SweepTag {
    pub angle: i32,
    pub run: usize,
}

/// Pixel to sweep-tag association.
#[derive(Clone, Debug, Default)]
pub struct PixelTagMap {
    tags: HashMap<PixelPos, Vec<SweepTag>>,
}

impl PixelTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `tag` to the pixel's list, creating the entry if needed.
    /// A tag already present on the pixel is not repeated.
    pub fn upsert(&mut self, pixel: PixelPos, tag: SweepTag) {
        let entry = self.tags.entry(pixel).or_default();
        if !entry.contains(&tag) {
            entry.push(tag);
        }
    }

    pub fn tags(&self, pixel: PixelPos) -> &[SweepTag] {
        self.tags.get(&pixel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tagged pixels.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Distinct pixels carrying each tag.
    pub fn counts(&self) -> HashMap<SweepTag, usize> {
        let mut counts = HashMap::new();
        for tags in self.tags.values() {
            for &tag in tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_appends_without_duplicates() {
        let mut map = PixelTagMap::new();
        let p = PixelPos::new(2, 3);
        let a = SweepTag { angle: 0, run: 1 };
        let b = SweepTag { angle: 3, run: 0 };
        map.upsert(p, a);
        map.upsert(p, b);
        map.upsert(p, a);
        assert_eq!(map.tags(p), &[a, b]);
        assert!(map.tags(PixelPos::new(0, 0)).is_empty());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn counts_distinct_pixels_per_tag() {
        let mut map = PixelTagMap::new();
        let tag = SweepTag { angle: -90, run: 2 };
        for x in 0..4 {
            map.upsert(PixelPos::new(x, 0), tag);
        }
        map.upsert(PixelPos::new(0, 0), tag);
        assert_eq!(map.counts()[&tag], 4);
    }
}
