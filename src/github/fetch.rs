use anyhow::Result;
use tracing::info;

use crate::github::issues::{Issue, IssueState};

/// Filter for one repository's issue listing.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueQuery {
    pub owner: String,
    pub repo: String,
    pub state: IssueState,
    /// Comma-separated label names, empty for no filter.
    pub labels: String,
}

/// Anything that can return one page of issues.
pub trait IssueSource {
    /// Returns page `page` (1-indexed). An empty page marks the end.
    fn list_issues(
        &self,
        query: &IssueQuery,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Issue>>>;
}

/// Requests pages until the first empty one and returns every issue in order.
///
/// Errors from the source are returned as they are; there is no retry.
pub async fn fetch_all_issues<S: IssueSource>(
    source: &S,
    query: &IssueQuery,
) -> Result<Vec<Issue>> {
    let mut all_issues = Vec::new();
    let mut page = 1;

    loop {
        let issues = source.list_issues(query, page).await?;

        if issues.is_empty() {
            break;
        }

        info!("Retrieved page {page}");
        all_issues.extend(issues);
        page += 1;
    }

    Ok(all_issues)
}
