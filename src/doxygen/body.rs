use super::wrap::{TextWrapper, char_len};

/// Left margin of every table row below the header row.
pub const EMPTY_ROW: &str = "    | ";

/// Wraps an issue body into table rows of a fixed column width.
///
/// Newlines are replaced by `width` spaces, which makes the wrapper start a
/// new row wherever the body had a line break. Each row starts with `margin`,
/// is padded to `len(margin) + width` chars and is closed with `" |"`.
pub fn format_body(body: &str, margin: &str, width: usize) -> String {
    let row_width = char_len(margin) + width;
    let flattened = body.replace('\n', &" ".repeat(width));

    TextWrapper::new(row_width)
        .with_indent(margin)
        .wrap(&flattened)
        .iter()
        .map(|line| format!("{line:<row_width$} |\n"))
        .collect()
}
