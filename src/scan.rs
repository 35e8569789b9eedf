//! Single pass over the logical lines that records every block's properties
//! without nesting them.
//!
//! Each `BEGIN` starts a new [`PropertyMap`]; `END` lines are only queued.
//! Nesting is worked out afterwards by [`reconcile`](crate::reconcile).

use std::collections::VecDeque;

use tracing::trace;

use crate::{
    config::ColonSplit, error::ParseResult, tree::PropertyMap, unfold::LogicalLine, FormatError,
};

/// A `BEGIN` or `END` line: the block type and where it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub line: usize,
}

impl Marker {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Marker {
            name: name.into(),
            line,
        }
    }
}

/// The scanner's output.
///
/// `blocks[i]` holds the properties of the block opened by `start_keys[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatScan {
    pub blocks: Vec<PropertyMap>,
    pub start_keys: Vec<Marker>,
    pub end_keys: VecDeque<Marker>,
}

#[derive(Debug, Default)]
struct ParseState {
    current: PropertyMap,
    start_keys: Vec<Marker>,
    blocks: Vec<PropertyMap>,
    end_keys: VecDeque<Marker>,
    /// The property a continuation line extends.
    prev_key: Option<String>,
}

impl ParseState {
    fn begin(&mut self, name: &str, line: usize) {
        let finished = std::mem::take(&mut self.current);
        if self.start_keys.is_empty() {
            if !finished.is_empty() {
                trace!(line, "discarding properties before first BEGIN");
            }
        } else {
            self.blocks.push(finished);
        }
        self.start_keys.push(Marker::new(name, line));
        self.prev_key = None;
    }

    fn end(&mut self, name: &str, line: usize) {
        // The current map and `prev_key` stay as they are: anything until the
        // next BEGIN, folded lines included, still goes to this map.
        self.end_keys.push_back(Marker::new(name, line));
    }

    fn property(&mut self, name: &str, value: &str) {
        self.current.set_text(name, value);
        self.prev_key = Some(name.to_string());
    }

    fn continuation(&mut self, line: &LogicalLine<'_>) -> ParseResult<()> {
        let extended = match &self.prev_key {
            Some(key) => self.current.append_text(key, line.continuation_content()),
            None => false,
        };

        if extended {
            Ok(())
        } else {
            Err(FormatError::DanglingContinuation { line: line.number })
        }
    }

    fn finish(mut self) -> FlatScan {
        if !self.start_keys.is_empty() {
            self.blocks.push(self.current);
        }

        FlatScan {
            blocks: self.blocks,
            start_keys: self.start_keys,
            end_keys: self.end_keys,
        }
    }
}

/// Walk `lines` once, collecting one [`PropertyMap`] per `BEGIN` in document
/// order plus the queues of `BEGIN` and `END` names.
///
/// Blank lines are skipped. A continuation line appends to the last
/// property written in the current block and fails if there is none.
pub fn scan(lines: &[LogicalLine<'_>], colon_split: ColonSplit) -> ParseResult<FlatScan> {
    let mut state = ParseState::default();

    for line in lines {
        if line.is_continuation {
            state.continuation(line)?;
            continue;
        }
        if line.is_blank() {
            continue;
        }

        let (name, value) =
            colon_split
                .split(line.text)
                .ok_or_else(|| FormatError::MalformedLine {
                    content: line.text.to_string(),
                    line: line.number,
                })?;

        match name {
            "BEGIN" => state.begin(value, line.number),
            "END" => state.end(value, line.number),
            _ => state.property(name, value),
        }
    }

    Ok(state.finish())
}
