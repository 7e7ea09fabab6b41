use std::collections::BTreeMap;

use liuyao_types::{BranchSet, EarthlyBranch, SymbolicStar};
use serde::Serialize;

/// Symbolic stars that applied to a reading, each with its non-empty set of
/// branches. Iterates in star identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolicStarCollection {
    stars: BTreeMap<SymbolicStar, BranchSet>,
}

impl SymbolicStarCollection {
    /// Empty branch sets are dropped.
    pub(crate) fn new(stars: impl IntoIterator<Item = (SymbolicStar, BranchSet)>) -> Self {
        Self {
            stars: stars
                .into_iter()
                .filter(|(_, branches)| !branches.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, star: &SymbolicStar) -> Option<BranchSet> {
        self.stars.get(star).copied()
    }

    /// Whether `star` falls on `branch`.
    #[must_use]
    pub fn has_star(&self, branch: EarthlyBranch, star: &SymbolicStar) -> bool {
        self.get(star).is_some_and(|branches| branches.contains(branch))
    }

    /// Every star that falls on `branch`.
    pub fn stars_for_branch(&self, branch: EarthlyBranch) -> impl Iterator<Item = &SymbolicStar> {
        self.stars
            .iter()
            .filter(move |(_, branches)| branches.contains(branch))
            .map(|(star, _)| star)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolicStar, BranchSet)> {
        self.stars.iter().map(|(star, branches)| (star, *branches))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
