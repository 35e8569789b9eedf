use std::sync::LazyLock;

use regex::Regex;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\n|\r").expect("valid line break pattern"));

/// One physical line of input, tagged with whether it continues the line
/// before it.
///
/// Folded lines aren't merged here: the scanner appends a continuation's
/// content to whichever property was written last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalLine<'src> {
    /// 1-based physical line number.
    pub number: usize,
    /// The raw line, leading space included for continuations.
    pub text: &'src str,
    pub is_continuation: bool,
}

impl<'src> LogicalLine<'src> {
    /// The text a continuation contributes, i.e. without its single leading
    /// space. Non-continuation lines are returned unchanged.
    pub fn continuation_content(&self) -> &'src str {
        if self.is_continuation {
            // The first char is an ASCII space, so we are on a char boundary.
            &self.text[1..]
        } else {
            self.text
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split raw text into lines, accepting `\r\n`, `\n` and `\r` as line breaks
/// (even mixed within one input).
///
/// A line is a continuation iff it starts with a single space. Tabs do not
/// fold.
pub fn unfold(text: &str) -> Vec<LogicalLine<'_>> {
    LINE_BREAK
        .split(text)
        .enumerate()
        .map(|(idx, text)| LogicalLine {
            number: idx + 1,
            text,
            is_continuation: text.starts_with(' '),
        })
        .collect()
}
