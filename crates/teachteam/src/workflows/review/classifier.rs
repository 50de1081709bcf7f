use std::collections::BTreeMap;

use super::domain::{Applicant, ApplicantStats, Classification, Rank, Selection};

/// Rank statistics over the active selections.
///
/// `active` counts every active record, including those whose rank is not-a-number; those
/// ranks are left out of the bounds and groups so they never match either bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankSummary {
    pub active: usize,
    pub min_rank: Option<i64>,
    pub max_rank: Option<i64>,
    pub rank_groups: BTreeMap<i64, Vec<String>>,
}

impl RankSummary {
    pub fn from_selections<'a, I>(selections: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Selection)>,
    {
        let mut summary = Self::default();
        for (name, selection) in selections {
            if !selection.is_active() {
                continue;
            }
            summary.active += 1;

            let Some(rank) = selection.rank.value() else {
                continue;
            };
            summary.min_rank = Some(summary.min_rank.map_or(rank, |min| min.min(rank)));
            summary.max_rank = Some(summary.max_rank.map_or(rank, |max| max.max(rank)));
            summary
                .rank_groups
                .entry(rank)
                .or_default()
                .push(name.clone());
        }
        summary
    }

    fn group_size(&self, rank: i64) -> usize {
        self.rank_groups.get(&rank).map_or(0, Vec::len)
    }

    /// Label for one active selection, following the per-count rule table.
    pub fn classify_active(&self, rank: Rank) -> Classification {
        let rank = rank.value();
        let is_min = rank.is_some() && rank == self.min_rank;
        let is_max = rank.is_some() && rank == self.max_rank;

        match self.active {
            1 => Classification::MostChosen,
            2 if is_min => Classification::MostChosen,
            3 if is_min => Classification::MostChosen,
            3 if is_max && rank.is_some_and(|value| self.group_size(value) == 2) => {
                Classification::LeastChosen
            }
            // Four or more active selections have no labelling rule.
            _ => Classification::Unlabeled,
        }
    }
}

/// Pure classification of every roster applicant against the current selections.
pub fn classify(
    roster: &[Applicant],
    selections: &BTreeMap<String, Selection>,
) -> Vec<ApplicantStats> {
    let summary = RankSummary::from_selections(selections);

    roster
        .iter()
        .map(|applicant| {
            let classification = if summary.active == 0 {
                Classification::Unchosen
            } else {
                match selections.get(&applicant.name) {
                    Some(selection) if selection.is_active() => {
                        summary.classify_active(selection.rank)
                    }
                    _ => Classification::Unchosen,
                }
            };
            ApplicantStats::new(applicant.clone(), classification)
        })
        .collect()
}
