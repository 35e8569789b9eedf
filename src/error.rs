//! Error types for turning calendar text into a [`Tree`](crate::Tree).
//!
//! Parsing is all-or-nothing: every failure is reported as a [`FormatError`]
//! and no partial tree is ever returned alongside it.

use std::fmt;

use thiserror::Error;

/// The category of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatErrorKind {
    /// The input was empty, blank, or not valid UTF-8.
    EmptyOrNonTextInput,
    /// A folded line appeared with no property before it to extend.
    DanglingContinuation,
    /// A `BEGIN` was never closed by a matching `END`.
    UnterminatedBlock,
    /// An `END` named a block type that isn't open.
    UnmatchedEnd,
    /// A property line without a `:` separator.
    MalformedLine,
    /// The input held no `BEGIN` line at all.
    NoRootBlock,
    /// A child block's type collides with a scalar property of its parent.
    BlockNameConflict,
}

impl FormatErrorKind {
    /// Returns a stable, machine-friendly name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyOrNonTextInput => "empty_or_non_text_input",
            Self::DanglingContinuation => "dangling_continuation",
            Self::UnterminatedBlock => "unterminated_block",
            Self::UnmatchedEnd => "unmatched_end",
            Self::MalformedLine => "malformed_line",
            Self::NoRootBlock => "no_root_block",
            Self::BlockNameConflict => "block_name_conflict",
        }
    }
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Couldn't turn the input into a tree.
///
/// Line numbers are 1-based and count physical lines, so they match what an
/// editor shows for the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("input is empty or not text: {reason}")]
    EmptyOrNonTextInput { reason: String },

    #[error("line {line}: continuation line has no preceding property to extend")]
    DanglingContinuation { line: usize },

    #[error("line {line}: BEGIN:{name} is never closed")]
    UnterminatedBlock { name: String, line: usize },

    #[error("line {line}: END:{name} does not match any open block")]
    UnmatchedEnd { name: String, line: usize },

    #[error("line {line}: expected NAME:VALUE, found {content:?}")]
    MalformedLine { content: String, line: usize },

    #[error("no BEGIN line found in input")]
    NoRootBlock,

    #[error("line {line}: block {name} clashes with a property of the same name in its parent")]
    BlockNameConflict { name: String, line: usize },
}

impl FormatError {
    /// Returns the category of this error.
    pub fn kind(&self) -> FormatErrorKind {
        match self {
            Self::EmptyOrNonTextInput { .. } => FormatErrorKind::EmptyOrNonTextInput,
            Self::DanglingContinuation { .. } => FormatErrorKind::DanglingContinuation,
            Self::UnterminatedBlock { .. } => FormatErrorKind::UnterminatedBlock,
            Self::UnmatchedEnd { .. } => FormatErrorKind::UnmatchedEnd,
            Self::MalformedLine { .. } => FormatErrorKind::MalformedLine,
            Self::NoRootBlock => FormatErrorKind::NoRootBlock,
            Self::BlockNameConflict { .. } => FormatErrorKind::BlockNameConflict,
        }
    }

    /// The offending physical line, where one is known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DanglingContinuation { line }
            | Self::UnterminatedBlock { line, .. }
            | Self::UnmatchedEnd { line, .. }
            | Self::MalformedLine { line, .. }
            | Self::BlockNameConflict { line, .. } => Some(*line),
            Self::EmptyOrNonTextInput { .. } | Self::NoRootBlock => None,
        }
    }

    /// The block type involved, for marker related errors.
    pub fn block_name(&self) -> Option<&str> {
        match self {
            Self::UnterminatedBlock { name, .. }
            | Self::UnmatchedEnd { name, .. }
            | Self::BlockNameConflict { name, .. } => Some(name),
            _ => None,
        }
    }

    pub(crate) fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyOrNonTextInput {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for parse operations.
pub type ParseResult<T> = Result<T, FormatError>;

/// A TEXT value held an escape sequence RFC 5545 doesn't define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    #[error("unexpected escape sequence \\{0}")]
    UnknownEscape(char),
    #[error("string ends in \\")]
    TrailingBackslash,
}
