//! Category sum map
//!
//! Accumulated amount per category name. Entries keep the order in which
//! their key was first seen so that sorting by value breaks ties the same
//! way on every run.

use std::collections::HashMap;

use crate::error::{SankeyError, SankeyResult};

/// Bucket that collects every category below the threshold
pub const MISC: &str = "Misc";

/// Mapping from category name to total amount
///
/// Every entry and the running total fit in an `i64`; an addition that
/// would leave that range is rejected.
#[derive(Debug, Clone, Default)]
pub struct CategorySums {
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
    total: i64,
}

impl CategorySums {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from `(name, amount)` pairs, adding repeated names
    pub fn from_pairs<S, I>(pairs: I) -> SankeyResult<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, i64)>,
    {
        let mut sums = Self::new();
        for (name, amount) in pairs {
            sums.add(name.as_ref(), amount)?;
        }
        Ok(sums)
    }

    /// Add `amount` to `name`, inserting the key if it is new
    ///
    /// Fails without changing the map when the category or the map total
    /// would overflow.
    pub fn add(&mut self, name: &str, amount: i64) -> SankeyResult<()> {
        let total = self
            .total
            .checked_add(amount)
            .ok_or_else(|| overflow(name, amount))?;

        match self.index.get(name) {
            Some(&idx) => {
                let entry = &mut self.entries[idx].1;
                *entry = entry
                    .checked_add(amount)
                    .ok_or_else(|| overflow(name, amount))?;
            }
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), amount));
            }
        }

        self.total = total;
        Ok(())
    }

    /// Total for a category
    pub fn get(&self, name: &str) -> Option<i64> {
        self.index.get(name).map(|&idx| self.entries[idx].1)
    }

    /// Check if a category is present
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every category
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    /// Entries sorted by amount, largest first
    ///
    /// The sort is stable, so equal amounts stay in first-seen order.
    pub fn sorted_desc(&self) -> Vec<(&str, i64)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Fold every category strictly below `threshold` into [`MISC`]
    ///
    /// The folded amount is added to an existing `Misc` entry if one
    /// survives, so the map total never changes. On overflow the map is
    /// left as it was.
    pub fn collapse_below(&mut self, threshold: i64) -> SankeyResult<()> {
        let (kept, folded): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .cloned()
            .partition(|(_, amount)| *amount >= threshold);

        let folded_sum: i128 = folded.iter().map(|(_, amount)| i128::from(*amount)).sum();
        let existing = kept
            .iter()
            .find(|(name, _)| name == MISC)
            .map_or(0, |(_, amount)| i128::from(*amount));
        let misc = i64::try_from(folded_sum + existing)
            .map_err(|_| SankeyError::Overflow(format!("'{}' total does not fit", MISC)))?;

        self.entries = kept;
        if folded_sum != 0 {
            match self.entries.iter_mut().find(|(name, _)| name == MISC) {
                Some(entry) => entry.1 = misc,
                None => self.entries.push((MISC.to_string(), misc)),
            }
        }
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| (name.clone(), idx))
            .collect();
    }
}

impl PartialEq for CategorySums {
    /// Maps are equal when they hold the same key → amount pairs, whatever
    /// order the keys were first seen in
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, amount)| other.get(name) == Some(amount))
    }
}

impl Eq for CategorySums {}

fn overflow(name: &str, amount: i64) -> SankeyError {
    SankeyError::Overflow(format!("adding {} to '{}' does not fit", amount, name))
}
