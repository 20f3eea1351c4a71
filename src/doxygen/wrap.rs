//! Greedy word wrapping that keeps whitespace runs intact.
//!
//! Text is cut into chunks (whitespace runs, words, hyphenated word parts and
//! em-dashes) and lines are filled greedily. Whitespace at a line boundary is
//! dropped, except for leading whitespace on the very first line. Widths are
//! counted in chars.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

const TAB_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct TextWrapper {
    /// Maximum line length, indent included.
    pub width: usize,
    pub initial_indent: String,
    pub subsequent_indent: String,
}

impl TextWrapper {
    pub fn new(width: usize) -> Self {
        TextWrapper {
            width,
            initial_indent: String::new(),
            subsequent_indent: String::new(),
        }
    }

    /// Uses the same indent for the first and the following lines.
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.initial_indent = indent.to_string();
        self.subsequent_indent = indent.to_string();
        self
    }

    pub fn wrap(&self, text: &str) -> Vec<String> {
        let expanded = expand_tabs(text);
        let mut chunks = split_chunks(&expanded);
        // Consumed from the back.
        chunks.reverse();

        let mut lines: Vec<String> = Vec::new();
        while !chunks.is_empty() {
            let indent = if lines.is_empty() {
                &self.initial_indent
            } else {
                &self.subsequent_indent
            };
            let width = self.width.saturating_sub(char_len(indent));

            if !lines.is_empty() && chunks.last().is_some_and(|chunk| is_blank(chunk)) {
                chunks.pop();
            }

            let mut cur_line: Vec<String> = Vec::new();
            let mut cur_len = 0;
            while let Some(chunk) = chunks.last() {
                let len = char_len(chunk);
                if cur_len + len > width {
                    break;
                }
                cur_len += len;
                if let Some(chunk) = chunks.pop() {
                    cur_line.push(chunk);
                }
            }

            if chunks.last().is_some_and(|chunk| char_len(chunk) > width) {
                break_long_chunk(&mut chunks, &mut cur_line, cur_len, width);
            }

            if cur_line.last().is_some_and(|chunk| is_blank(chunk)) {
                cur_line.pop();
            }

            if !cur_line.is_empty() {
                lines.push(format!("{indent}{}", cur_line.concat()));
            }
        }

        lines
    }
}

/// Splits the chunk on top of the stack so that its head fills the rest of
/// the current line, preferring a break right after a hyphen.
fn break_long_chunk(
    chunks: &mut [String],
    cur_line: &mut Vec<String>,
    cur_len: usize,
    width: usize,
) {
    let Some(chunk) = chunks.last_mut() else {
        return;
    };
    let space_left = if width < 1 { 1 } else { width.saturating_sub(cur_len) };
    let chars: Vec<char> = chunk.chars().collect();

    let mut end = space_left.min(chars.len());
    if chars.len() > space_left {
        if let Some(hyphen) = chars[..space_left].iter().rposition(|&c| c == '-') {
            if hyphen > 0 && chars[..hyphen].iter().any(|&c| c != '-') {
                end = hyphen + 1;
            }
        }
    }

    cur_line.push(chars[..end].iter().collect());
    *chunk = chars[end..].iter().collect();
}

fn expand_tabs(text: &str) -> Vec<char> {
    let mut expanded = Vec::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = TAB_SIZE - column % TAB_SIZE;
                expanded.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                expanded.push(c);
                column = 0;
            }
            _ => {
                expanded.push(c);
                column += 1;
            }
        }
    }
    expanded
}

fn split_chunks(text: &[char]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let end = if is_wrap_whitespace(text[start]) {
            text[start..]
                .iter()
                .position(|&c| !is_wrap_whitespace(c))
                .map_or(text.len(), |offset| start + offset)
        } else if let Some(end) = em_dash_at(text, start) {
            end
        } else {
            word_end(text, start)
        };
        chunks.push(text[start..end].iter().collect());
        start = end;
    }
    chunks
}

/// End of the word starting at `start`. A word ends at whitespace, at the end
/// of the text, after a hyphen joining two letter runs, or before an em-dash.
fn word_end(text: &[char], start: usize) -> usize {
    let mut end = start + 1;
    loop {
        if text.get(end) == Some(&'-') && is_hyphen_break(text, end) {
            return end + 1;
        }
        if end == text.len() || is_wrap_whitespace(text[end]) {
            return end;
        }
        if is_word_punct(text[end - 1]) && hyphen_run_before_word(text, end).is_some() {
            return end;
        }
        end += 1;
    }
}

/// `well-known` may break after the hyphen: two letters (or `x-y`) before
/// it and a letter pair, optionally hyphenated, after it.
fn is_hyphen_break(text: &[char], hyphen: usize) -> bool {
    let at = |i: usize| text.get(i).copied();
    let letter = |i: Option<usize>| i.and_then(at).is_some_and(is_letter);

    let before = (letter(hyphen.checked_sub(2)) && letter(hyphen.checked_sub(1)))
        || (letter(hyphen.checked_sub(3))
            && hyphen.checked_sub(2).and_then(at) == Some('-')
            && letter(hyphen.checked_sub(1)));
    let after = letter(Some(hyphen + 1))
        && ((at(hyphen + 2) == Some('-') && letter(Some(hyphen + 3))) || letter(Some(hyphen + 2)));

    before && after
}

/// An em-dash chunk: two or more hyphens between a word character and a
/// word-like character.
fn em_dash_at(text: &[char], start: usize) -> Option<usize> {
    if start == 0 || !is_word_punct(text[start - 1]) {
        return None;
    }
    hyphen_run_before_word(text, start)
}

fn hyphen_run_before_word(text: &[char], start: usize) -> Option<usize> {
    let run = text[start..].iter().take_while(|&&c| c == '-').count();
    let end = start + run;
    (run >= 2 && text.get(end).is_some_and(|&c| is_word_char(c))).then_some(end)
}

fn is_wrap_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0b' | '\x0c' | '\r' | ' ')
}

/// Letters (`L*`), numbers (`N*`) and the underscore. Combining marks are
/// not word characters.
fn is_word_char(c: char) -> bool {
    c == '_'
        || matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number
        )
}

/// A word character that is not a decimal digit, so `²` and `Ⅳ` count.
fn is_letter(c: char) -> bool {
    is_word_char(c) && c.general_category() != GeneralCategory::DecimalNumber
}

fn is_word_punct(c: char) -> bool {
    is_word_char(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn is_blank(chunk: &str) -> bool {
    chunk.trim().is_empty()
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
