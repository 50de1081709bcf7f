use serde::Serialize;
use tracing::{info, warn};

use super::classifier::classify;
use super::domain::{ApplicantStats, Rank, Selection};
use super::persistence::{PersistError, PersistOutcome, SelectionSync, SyncState};
use super::roster::Roster;
use super::selection::{SelectionError, SelectionStore};
use crate::storage::KeyValueStore;

/// Service composing the roster, selection store, write-back sync, and classifier.
pub struct ReviewPanel<S> {
    roster: Roster,
    selections: SelectionStore,
    sync: SelectionSync<S>,
}

impl<S: KeyValueStore> ReviewPanel<S> {
    /// Hydrate the roster but leave the selections unloaded. Mutations made before
    /// [`ReviewPanel::load`] are kept in memory only and are replaced by the load.
    pub fn new(storage: S) -> Self {
        let roster = Roster::hydrate(&storage);
        Self::with_roster(roster, storage)
    }

    pub fn with_roster(roster: Roster, storage: S) -> Self {
        Self {
            roster,
            selections: SelectionStore::new(),
            sync: SelectionSync::new(storage),
        }
    }

    /// Hydrate the roster and load persisted selections.
    pub fn open(storage: S) -> Self {
        let mut panel = Self::new(storage);
        panel.load();
        panel
    }

    pub fn load(&mut self) {
        self.selections = self.sync.load();
        info!(
            applicants = self.roster.len(),
            selections = self.selections.len(),
            "review panel ready"
        );
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    pub fn storage(&self) -> &S {
        self.sync.storage()
    }

    pub fn toggle(&mut self, name: &str) -> Result<Selection, ReviewError> {
        if !self.roster.contains(name) {
            return Err(ReviewError::NotOnRoster(name.to_string()));
        }
        let selection = self.selections.toggle(name).clone();
        self.commit()?;
        Ok(selection)
    }

    pub fn update_comment(&mut self, name: &str, comment: &str) -> Result<Selection, ReviewError> {
        let selection = self.selections.update_comment(name, comment)?.clone();
        self.commit()?;
        Ok(selection)
    }

    pub fn update_rank(&mut self, name: &str, rank: Rank) -> Result<Selection, ReviewError> {
        let selection = self.selections.update_rank(name, rank)?.clone();
        if rank.is_not_a_number() {
            warn!(applicant = name, "rank input was not numeric");
        }
        self.commit()?;
        Ok(selection)
    }

    fn commit(&self) -> Result<PersistOutcome, ReviewError> {
        Ok(self.sync.persist(&self.selections)?)
    }

    /// Labels recomputed from the current roster and selections.
    pub fn stats(&self) -> Vec<ApplicantStats> {
        classify(self.roster.applicants(), self.selections.records())
    }

    /// Everything the panel shows per applicant.
    pub fn rows(&self) -> Vec<ReviewRow> {
        self.stats()
            .into_iter()
            .map(|stats| {
                let selection = self
                    .selections
                    .active(&stats.applicant.name)
                    .map(|selection| ActiveSelectionView {
                        comment: selection.comment.clone(),
                        rank: selection.rank,
                    });
                let skill_tags = stats
                    .applicant
                    .skill_tags()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                ReviewRow {
                    stats,
                    skill_tags,
                    selection,
                }
            })
            .collect()
    }
}

/// One rendered row of the review panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRow {
    #[serde(flatten)]
    pub stats: ApplicantStats,
    pub skill_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<ActiveSelectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSelectionView {
    pub comment: String,
    pub rank: Rank,
}

/// Error raised by the review panel.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("applicant '{0}' is not on the roster")]
    NotOnRoster(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
