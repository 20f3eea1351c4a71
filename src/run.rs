use std::io::Write;

use tracing::info;

use crate::cli::parser::Args;
use crate::config::Config;
use crate::doxygen::document::Document;
use crate::github::client::GitHubClient;
use crate::github::fetch::{IssueSource, fetch_all_issues};
use crate::output;

/// Resolves the configuration and exports the issues through the GitHub API.
pub async fn run(args: Args, mut stdout_additional: Option<&mut dyn Write>) -> anyhow::Result<()> {
    let config = Config::resolve(&args)?;
    let client = GitHubClient::new(&config.api_url, config.token.clone())?;
    export(&config, &client, &mut stdout_additional).await
}

/// Fetches every issue, formats the requirements page and writes it to
/// `config.output_path`.
///
/// The file is only touched once all pages have been fetched, so a failed
/// fetch leaves any previous output in place.
pub async fn export<S: IssueSource>(
    config: &Config,
    source: &S,
    stdout_additional: &mut Option<&mut dyn Write>,
) -> anyhow::Result<()> {
    output::println(
        &format!(
            "Getting {} issues from https://github.com/{}/{}",
            config.state, config.user, config.repo
        ),
        stdout_additional,
    )?;

    let issues = fetch_all_issues(source, &config.issue_query()).await?;
    info!("retrieved {} issue(s)", issues.len());

    let mut document = Document::new();
    for issue in &issues {
        document.push_issue(issue);
    }
    info!("registered {} link(s)", document.links().len());
    let page = document.finish();

    output::println(
        &format!("Writing issues to {}", config.output_path.display()),
        stdout_additional,
    )?;
    output::write_document(&config.output_path, &page)?;
    info!(path = %config.output_path.display(), bytes = page.len(), "requirements page written");

    Ok(())
}
