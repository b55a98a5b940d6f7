use serde::{Deserialize, Serialize};

/// Identifier assigned by the contributions API.
///
/// The upstream service has shipped both numeric and string ids, so either
/// form is accepted and kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContributionId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ContributionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContributionId::Number(n) => write!(f, "{n}"),
            ContributionId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// State of a pull request as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContributionStatus {
    Merged,
    Open,
    #[serde(other)]
    Other,
}

impl ContributionStatus {
    #[must_use]
    pub fn is_merged(self) -> bool {
        matches!(self, ContributionStatus::Merged)
    }
}

/// A pull request or merge authored against an external repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: ContributionId,
    #[serde(default)]
    pub organisation: String,
    pub repo: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    pub status: ContributionStatus,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub lines_added: Option<u64>,
    #[serde(default)]
    pub lines_deleted: Option<u64>,
}

impl Contribution {
    /// `organisation/repo`, as shown under the card title
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.organisation, self.repo)
    }

    /// Line-change counts for the `+added -deleted` summary.
    ///
    /// Only present when at least one count is known and non-zero; a missing
    /// counterpart is reported as zero.
    #[must_use]
    pub fn diff_summary(&self) -> Option<(u64, u64)> {
        let added = self.lines_added.unwrap_or(0);
        let deleted = self.lines_deleted.unwrap_or(0);
        if added == 0 && deleted == 0 {
            None
        } else {
            Some((added, deleted))
        }
    }
}

/// Why the contributions could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub attempts: u32,
    pub reason: String,
}

/// Outcome of loading the contributions list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "lowercase")]
pub enum FetchResult {
    Loaded(Vec<Contribution>),
    Failed(FetchFailure),
}

impl FetchResult {
    #[must_use]
    pub fn failed(attempts: u32, reason: impl Into<String>) -> Self {
        FetchResult::Failed(FetchFailure {
            attempts,
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchResult::Failed(_))
    }
}
