//! Style pool for deduplication

use std::hash::{Hash, Hasher};

use super::Style;
use ahash::AHashMap;

/// Per-sheet pool of distinct styles
///
/// Cells and columns reference styles by index. Index 0 is always the
/// default style, and inserting an equal style twice returns the same index.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    /// Style hash -> indices of styles with that hash
    index_map: AHashMap<u64, Vec<u32>>,
}

fn style_hash(style: &Style) -> u64 {
    let mut hasher = ahash::AHasher::default();
    style.hash(&mut hasher);
    hasher.finish()
}

impl StylePool {
    /// Create a pool holding only the default style
    pub fn new() -> Self {
        let mut pool = Self {
            styles: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        };
        pool.get_or_insert(Style::default());
        pool
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        let key = style_hash(&style);
        let candidates = self.index_map.entry(key).or_default();

        if let Some(&idx) = candidates
            .iter()
            .find(|&&idx| self.styles[idx as usize] == style)
        {
            return idx;
        }

        let idx = self.styles.len() as u32;
        candidates.push(idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of distinct styles, including the default
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool holds only the default style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }

    /// Iterate over all styles with their indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
