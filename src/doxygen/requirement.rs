use tracing::debug;

use super::body::{EMPTY_ROW, format_body};
use super::links::LinkRegistry;
use super::wrap::char_len;
use crate::github::issues::Issue;

/// Formats the issue as a requirement table and registers its links.
///
/// The header row is `requirement:title labels`, followed by a dash row of
/// the same width and the wrapped body. An issue without labels still keeps
/// the space before the closing pipe.
pub fn format_issue(issue: &Issue, links: &mut LinkRegistry) -> String {
    let requirement = format_requirement(issue, links);
    let labels = format_labels(issue, links);

    let width_col = char_len(&requirement) + char_len(&labels) + char_len(&issue.title) + 2;
    let body = format_body(issue.body_text(), EMPTY_ROW, width_col);
    let sep_col = "-".repeat(width_col);

    debug!(number = issue.number, width_col, "formatted requirement");

    format!(
        "\n    | {requirement}:{title} {labels} |\n    |-{sep_col}-|\n{body}\n",
        title = issue.title,
    )
}

/// Link to the issue page, keyed `req_{number}_url`.
pub fn format_requirement(issue: &Issue, links: &mut LinkRegistry) -> String {
    let ref_key = format!("req_{}_url", issue.number);
    let name = format!("requirement {}", issue.number);
    links.create_link(&name, &ref_key, &issue.html_url)
}

/// Space-separated label links, each keyed `{name}_url`.
pub fn format_labels(issue: &Issue, links: &mut LinkRegistry) -> String {
    issue
        .labels
        .iter()
        .map(|label| {
            let ref_key = format!("{}_url", label.name);
            if links
                .get(&ref_key)
                .is_some_and(|previous| previous != label.url)
            {
                debug!(%ref_key, url = %label.url, "overwriting label link");
            }
            links.create_link(&label.name, &ref_key, &label.url)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
