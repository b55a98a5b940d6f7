//! Repository filter over a loaded contributions list.
//!
//! Selecting a filter updates the highlighted button straight away but the
//! displayed cards only change once the returned [`PendingFilter`] is applied,
//! which the view does after [`FILTER_DEBOUNCE`]. Every selection bumps a
//! generation counter and only the newest ticket is honoured, so rapid clicks
//! always settle on the last one.

use std::time::Duration;

use super::model::{Contribution, FetchFailure, FetchResult};

/// Label of the filter that shows every contribution
pub const ALL_FILTER: &str = "All";

/// Delay between selecting a filter and the cards being recomputed
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);

/// A filter selection waiting for its debounce to elapse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFilter {
    generation: u64,
    filter: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Loading,
    Loaded(Vec<Contribution>),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterEngine {
    phase: Phase,
    filters: Vec<String>,
    active: String,
    visible: Vec<Contribution>,
    generation: u64,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            filters: vec![ALL_FILTER.to_string()],
            active: ALL_FILTER.to_string(),
            visible: Vec::new(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn from_result(result: FetchResult) -> Self {
        let mut engine = Self::new();
        engine.load(result);
        engine
    }

    /// Replace the engine's contents with a fetch outcome.
    ///
    /// Resets the selection to "All" and invalidates any pending filter.
    pub fn load(&mut self, result: FetchResult) {
        self.generation += 1;
        self.active = ALL_FILTER.to_string();

        match result {
            FetchResult::Loaded(contributions) => {
                self.filters = std::iter::once(ALL_FILTER.to_string())
                    .chain(distinct_repos(&contributions))
                    .collect();
                self.visible.clone_from(&contributions);
                self.phase = Phase::Loaded(contributions);
            }
            FetchResult::Failed(failure) => {
                self.filters = vec![ALL_FILTER.to_string()];
                self.visible.clear();
                self.phase = Phase::Failed(failure);
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FetchFailure> {
        match &self.phase {
            Phase::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The full list as fetched, or `None` while loading.
    ///
    /// A failed fetch reports the failure for both this and [`Self::displayed`].
    #[must_use]
    pub fn contributions(&self) -> Option<FetchResult> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Loaded(all) => Some(FetchResult::Loaded(all.clone())),
            Phase::Failed(failure) => Some(FetchResult::Failed(failure.clone())),
        }
    }

    #[must_use]
    pub fn displayed(&self) -> Option<FetchResult> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Loaded(_) => Some(FetchResult::Loaded(self.visible.clone())),
            Phase::Failed(failure) => Some(FetchResult::Failed(failure.clone())),
        }
    }

    /// Cards currently on screen; empty while loading or after a failure
    #[must_use]
    pub fn visible(&self) -> &[Contribution] {
        &self.visible
    }

    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    #[must_use]
    pub fn active_filter(&self) -> &str {
        &self.active
    }

    /// Number of contributions a filter would display
    #[must_use]
    pub fn repo_count(&self, filter: &str) -> usize {
        match &self.phase {
            Phase::Loaded(all) if filter == ALL_FILTER => all.len(),
            Phase::Loaded(all) => all.iter().filter(|c| matches_repo(c, filter)).count(),
            _ => 0,
        }
    }

    /// Mark `filter` as active and hand back the ticket that applies it.
    ///
    /// Returns `None` for a label that is not one of [`Self::filters`], which
    /// keeps the active filter a member of the filter list.
    pub fn select(&mut self, filter: &str) -> Option<PendingFilter> {
        if !self.filters.iter().any(|f| f == filter) {
            return None;
        }

        self.generation += 1;
        self.active = filter.to_string();

        Some(PendingFilter {
            generation: self.generation,
            filter: filter.to_string(),
        })
    }

    /// Recompute the visible cards for a pending selection.
    ///
    /// Returns `false` and changes nothing when a newer selection or a reload
    /// has superseded the ticket.
    pub fn apply(&mut self, pending: &PendingFilter) -> bool {
        if pending.generation != self.generation {
            return false;
        }

        if let Phase::Loaded(all) = &self.phase {
            self.visible = filter_by_repo(all, &pending.filter);
        }
        true
    }
}

/// Repository names in order of first appearance, duplicates removed
#[must_use]
pub fn distinct_repos(contributions: &[Contribution]) -> Vec<String> {
    let mut repos: Vec<String> = Vec::new();
    for c in contributions {
        if !repos.contains(&c.repo) {
            repos.push(c.repo.clone());
        }
    }
    repos
}

/// Case-insensitive repository match
#[must_use]
pub fn matches_repo(contribution: &Contribution, filter: &str) -> bool {
    contribution.repo.to_lowercase() == filter.to_lowercase()
}

#[must_use]
pub fn filter_by_repo(contributions: &[Contribution], filter: &str) -> Vec<Contribution> {
    if filter == ALL_FILTER {
        return contributions.to_vec();
    }

    contributions
        .iter()
        .filter(|c| matches_repo(c, filter))
        .cloned()
        .collect()
}
