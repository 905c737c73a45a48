//! Grouping of flat catalog rows into keyed records.
//!
//! Key and index procedures return one row per (constraint, column) pair.
//! [`KeyedMerge`] folds those rows into one record per key, in order of
//! first appearance.

use std::collections::HashMap;

/// Records grouped by key, kept in first-appearance order.
#[derive(Debug, Clone)]
pub struct KeyedMerge<T> {
    records: Vec<T>,
    slots: HashMap<String, usize>,
}

impl<T> Default for KeyedMerge<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<T> KeyedMerge<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one row under `key`.
    ///
    /// The first time a key is seen `seed` creates its record. `append` then
    /// runs for every row, the first included, so all per-row lists of a
    /// record grow together.
    pub fn merge(&mut self, key: &str, seed: impl FnOnce() -> T, append: impl FnOnce(&mut T)) {
        let slot = match self.slots.get(key) {
            Some(&slot) => slot,
            None => {
                self.records.push(seed());
                let slot = self.records.len() - 1;
                self.slots.insert(key.to_string(), slot);
                slot
            }
        };
        append(&mut self.records[slot]);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Fold `rows` into one record per key.
pub fn merge_by_key<R, T>(
    rows: impl IntoIterator<Item = R>,
    key: impl Fn(&R) -> &str,
    seed: impl Fn(&R) -> T,
    append: impl Fn(&mut T, &R),
) -> Vec<T> {
    let mut merged = KeyedMerge::new();
    for row in rows {
        merged.merge(key(&row), || seed(&row), |record| append(record, &row));
    }
    merged.into_records()
}
