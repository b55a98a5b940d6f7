mod contribution_card;
mod contributions_error;
mod filter_bar;
mod header;
mod icons;
mod open_source;
mod theme_toggle;

pub use contribution_card::ContributionCard;
pub use contributions_error::ContributionsError;
pub use filter_bar::{FilterBar, FilterOption};
pub use header::Header;
pub use icons::{AlertIcon, MergeIcon, PullRequestIcon};
pub use open_source::OpenSource;
pub use theme_toggle::ThemeToggle;
