//! Duplicate coalescing of the strings sent to the translation provider.
//!
//! Resource files repeat short UI strings ("OK", "Cancel") many times; each
//! distinct value is translated once and expanded back afterwards.

use std::collections::HashMap;

use crate::error::{CountStage, Error};

/// Maps each distinct value to the positions it occupies in the original list.
#[derive(Debug, Clone, Default)]
pub struct DuplicateStore {
    /// Distinct values in first-seen order, each with its original positions.
    groups: Vec<(String, Vec<usize>)>,
    total: usize,
}

impl DuplicateStore {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        let mut total = 0;

        for (position, value) in values.into_iter().enumerate() {
            let value = value.into();
            match index.get(&value) {
                Some(&group) => groups[group].1.push(position),
                None => {
                    index.insert(value.clone(), groups.len());
                    groups.push((value, vec![position]));
                }
            }
            total = position + 1;
        }

        DuplicateStore { groups, total }
    }

    /// Number of values before deduplication.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct values.
    pub fn distinct_len(&self) -> usize {
        self.groups.len()
    }

    /// The distinct values, in first-seen order.
    pub fn dehydrate(&self) -> Vec<String> {
        self.groups.iter().map(|(value, _)| value.clone()).collect()
    }

    /// Expands translations of [`Self::dehydrate`] back to one value per
    /// original position.
    pub fn rehydrate(&self, language: &str, translated: Vec<String>) -> Result<Vec<String>, Error> {
        if translated.len() != self.groups.len() {
            return Err(Error::count_mismatch(
                language,
                CountStage::Provider,
                self.groups.len(),
                translated,
            ));
        }

        let mut slots: Vec<Option<String>> = vec![None; self.total];
        for ((_, positions), value) in self.groups.iter().zip(translated) {
            for &position in positions {
                slots[position] = Some(value.clone());
            }
        }

        let expanded: Vec<String> = slots.into_iter().flatten().collect();
        if expanded.len() != self.total {
            return Err(Error::count_mismatch(
                language,
                CountStage::Rehydrate,
                self.total,
                expanded,
            ));
        }
        Ok(expanded)
    }
}
