mod api;
mod filter;
mod model;

pub use api::get_contributions;
pub use filter::{
    distinct_repos, filter_by_repo, matches_repo, FilterEngine, PendingFilter, ALL_FILTER,
    FILTER_DEBOUNCE,
};
pub use model::{Contribution, ContributionId, ContributionStatus, FetchFailure, FetchResult};
