use std::str;

use tracing::debug;

use crate::{
    config::ParseOptions, error::ParseResult, reconcile::reconcile, scan::scan, tree::Tree,
    unfold::unfold, FormatError,
};

/// Turns calendar text into a [`Tree`].
///
/// A parser holds no state between calls, so one value can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a complete document.
    ///
    /// Either the whole text is turned into a tree or an error is returned;
    /// there are no partial results.
    pub fn parse(&self, text: &str) -> ParseResult<Tree> {
        if text.trim().is_empty() {
            return Err(FormatError::empty("no text to parse"));
        }

        let lines = unfold(text);
        let flat = scan(&lines, self.options.colon_split)?;
        let blocks = flat.blocks.len();
        let tree = reconcile(flat, self.options.end_matching)?;

        debug!(
            root = tree.name(),
            blocks,
            events = tree.event_count(),
            "parsed calendar text"
        );

        Ok(tree)
    }

    /// Parse a document that hasn't been decoded yet, e.g. a response body.
    pub fn parse_bytes(&self, data: &[u8]) -> ParseResult<Tree> {
        let text = str::from_utf8(data).map_err(|e| {
            FormatError::empty(format!(
                "invalid UTF-8 after {} bytes",
                e.valid_up_to()
            ))
        })?;

        self.parse(text)
    }
}

/// Parse `text` with the default [`ParseOptions`].
pub fn parse(text: &str) -> ParseResult<Tree> {
    Parser::default().parse(text)
}

/// Parse UTF-8 encoded `data` with the default [`ParseOptions`].
pub fn parse_bytes(data: &[u8]) -> ParseResult<Tree> {
    Parser::default().parse_bytes(data)
}
