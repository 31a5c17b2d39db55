//! Display order of outcome tables

use serde::{Deserialize, Serialize};

use crate::record::OutcomeRecord;

/// Ordered list of unique outcome names
///
/// Every operation keeps the list free of duplicates, so the order can be
/// passed between renders and stays stable for names that persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOrder {
    names: Vec<String>,
}

impl DisplayOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an order from names, keeping the first occurrence of each
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Self::new();
        for name in names {
            order.push(name.into());
        }
        order
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn push(&mut self, name: String) {
        if self.position(&name).is_none() {
            self.names.push(name);
        }
    }

    /// Reconcile with the current set of outcome names
    ///
    /// Names still present keep their relative order, new names are appended
    /// in the order given, and names no longer present are dropped.
    pub fn sync<I, S>(&mut self, current: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let current: Vec<String> = current.into_iter().map(Into::into).collect();
        self.names.retain(|name| current.contains(name));
        for name in current {
            self.push(name);
        }
    }

    /// Move the entry at `from` to index `to`. Returns false if `from` is out of range.
    ///
    /// `to` past the end moves the entry to the end.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.names.len() {
            return false;
        }
        let name = self.names.remove(from);
        let to = to.min(self.names.len());
        self.names.insert(to, name);
        true
    }

    /// Move a named entry to index `to`. Returns false if the name is unknown.
    pub fn move_name(&mut self, name: &str, to: usize) -> bool {
        match self.position(name) {
            Some(from) => self.move_item(from, to),
            None => false,
        }
    }

    /// Records in display order. Records not named in the order follow, in input order.
    pub fn arrange<'a>(&self, records: &'a [OutcomeRecord]) -> Vec<&'a OutcomeRecord> {
        let mut ordered: Vec<&OutcomeRecord> = Vec::with_capacity(records.len());
        let mut placed = vec![false; records.len()];

        for name in &self.names {
            for (index, record) in records.iter().enumerate() {
                if !placed[index] && &record.outcome_name == name {
                    placed[index] = true;
                    ordered.push(record);
                }
            }
        }
        for (index, record) in records.iter().enumerate() {
            if !placed[index] {
                ordered.push(record);
            }
        }
        ordered
    }
}
