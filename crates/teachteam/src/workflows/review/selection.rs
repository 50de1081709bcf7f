use std::collections::BTreeMap;

use super::domain::{Rank, Selection, SelectionEntry};

/// In-memory selections keyed by applicant name; at most one record per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    records: BTreeMap<String, Selection>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries, keeping the first record seen for each name.
    pub fn from_entries(entries: impl IntoIterator<Item = SelectionEntry>) -> (Self, usize) {
        let mut records = BTreeMap::new();
        let mut duplicates = 0;
        for entry in entries {
            let (name, selection) = entry.into_parts();
            if records.contains_key(&name) {
                duplicates += 1;
                continue;
            }
            records.insert(name, selection);
        }
        (Self { records }, duplicates)
    }

    pub fn entries(&self) -> Vec<SelectionEntry> {
        self.records
            .iter()
            .map(|(name, selection)| SelectionEntry::new(name.clone(), selection))
            .collect()
    }

    pub fn records(&self) -> &BTreeMap<String, Selection> {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&Selection> {
        self.records.get(name)
    }

    /// Selection for `name` only when it currently counts as selected.
    pub fn active(&self, name: &str) -> Option<&Selection> {
        self.get(name).filter(|selection| selection.is_active())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Create an active record, or flip an existing one. Either way comment and rank reset.
    pub fn toggle(&mut self, name: &str) -> &Selection {
        let selection = self
            .records
            .entry(name.to_string())
            .and_modify(|selection| {
                selection.unselected = !selection.unselected;
                selection.comment.clear();
                selection.rank = Rank::DEFAULT;
            })
            .or_insert_with(Selection::fresh);
        &*selection
    }

    pub fn update_comment(
        &mut self,
        name: &str,
        comment: impl Into<String>,
    ) -> Result<&Selection, SelectionError> {
        let selection = self.existing_mut(name)?;
        selection.comment = comment.into();
        Ok(&*selection)
    }

    /// Stores the rank as given; range checks belong to the input layer.
    pub fn update_rank(&mut self, name: &str, rank: Rank) -> Result<&Selection, SelectionError> {
        let selection = self.existing_mut(name)?;
        selection.rank = rank;
        Ok(&*selection)
    }

    fn existing_mut(&mut self, name: &str) -> Result<&mut Selection, SelectionError> {
        self.records
            .get_mut(name)
            .ok_or_else(|| SelectionError::UnknownApplicant(name.to_string()))
    }
}

/// Mutation rejected by the selection store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no selection recorded for applicant '{0}'")]
    UnknownApplicant(String),
}
