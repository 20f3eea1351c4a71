use super::links::LinkRegistry;
use super::requirement::format_issue;
use crate::github::issues::Issue;

/// Doxygen page directive that opens the comment block.
pub fn create_header() -> String {
    "/*! \\page requirements Requirements\n\n".to_string()
}

/// Inserted after each requirement block.
pub fn create_separator() -> String {
    "\n".to_string()
}

/// Link definitions in registration order, then the end of the comment block.
pub fn create_footer(links: &LinkRegistry) -> String {
    let mut footer = String::from("\n");
    for (ref_key, url) in links.iter() {
        footer.push_str(&format!("[{ref_key}]: {url}\n"));
    }
    footer.push_str("\n*/\n");
    footer
}

/// Builds the requirements page one issue at a time.
///
/// The document owns the single link registry of a run. Issue text is
/// inserted verbatim.
#[derive(Debug, Clone)]
pub struct Document {
    contents: String,
    links: LinkRegistry,
}

impl Document {
    pub fn new() -> Self {
        Document {
            contents: create_header(),
            links: LinkRegistry::new(),
        }
    }

    pub fn push_issue(&mut self, issue: &Issue) {
        self.contents.push_str(&format_issue(issue, &mut self.links));
        self.contents.push_str(&create_separator());
    }

    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// Appends the footer and returns the finished page.
    pub fn finish(mut self) -> String {
        self.contents.push_str(&create_footer(&self.links));
        self.contents
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub fn assemble_document(issues: &[Issue]) -> String {
    let mut document = Document::new();
    for issue in issues {
        document.push_issue(issue);
    }
    document.finish()
}
