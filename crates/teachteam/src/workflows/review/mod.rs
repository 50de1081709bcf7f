//! Lecturer review panel: selections, ranks, and the derived shortlist labels.
//!
//! The roster is composed once at startup, the selection store is hydrated from the
//! `selectedReviewData` key and written back after every mutation, and labels are recomputed
//! from scratch on every read.

pub mod classifier;
pub mod domain;
pub mod panel;
pub mod persistence;
pub mod roster;
pub mod router;
pub mod selection;

#[cfg(test)]
mod tests;

pub use classifier::{classify, RankSummary};
pub use domain::{Applicant, ApplicantStats, Classification, Rank, Selection, SelectionEntry};
pub use panel::{ActiveSelectionView, ReviewError, ReviewPanel, ReviewRow};
pub use persistence::{
    decode_selections, encode_selections, DecodeError, PersistError, PersistOutcome,
    SelectionSync, SyncState,
};
pub use roster::{seed_applicants, Roster, RosterQuery, SortField, FALLBACK_APPLICANT_NAME};
pub use router::{review_router, SharedPanel};
pub use selection::{SelectionError, SelectionStore};
