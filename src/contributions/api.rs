use leptos::prelude::*;

use super::model::FetchResult;

/// Load the contributions list through the server's fetcher.
///
/// Failures are reported inside [`FetchResult`], so the only `Err` a caller
/// sees is a transport problem between browser and server.
#[server]
pub async fn get_contributions() -> Result<FetchResult, ServerFnError> {
    use crate::fetch::ContributionFetcher;

    let Some(fetcher) = use_context::<ContributionFetcher>() else {
        tracing::warn!("no contributions endpoint configured");
        return Ok(FetchResult::failed(0, "contributions endpoint not configured"));
    };

    Ok(fetcher.fetch_with_retry().await)
}
