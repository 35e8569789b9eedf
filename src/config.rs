//! Parser configuration.
//!
//! The defaults keep the tree shape existing callers rely on, except for
//! colon handling where the older behavior loses data. It stays available
//! as [`ColonSplit::Truncate`].

use serde::{Deserialize, Serialize};

use crate::scan::Marker;

/// How an `END` marker picks the open block it closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndMatching {
    /// The first still-open block of that type, counting from the document
    /// root. Two blocks of one type at different depths can be mismatched.
    #[default]
    Earliest,
    /// The most recently opened block of that type.
    Innermost,
}

impl EndMatching {
    /// Index into `open` of the block an `END:name` closes.
    pub(crate) fn find(&self, open: &[Marker], name: &str) -> Option<usize> {
        match self {
            EndMatching::Earliest => open.iter().position(|m| m.name == name),
            EndMatching::Innermost => open.iter().rposition(|m| m.name == name),
        }
    }
}

/// How a line is split into property name and value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColonSplit {
    /// Split on the first colon and keep the rest of the line verbatim, so
    /// `ORGANIZER:mailto:a@b` has the value `mailto:a@b`.
    #[default]
    FirstColon,
    /// Keep only the text between the first and second colon, so
    /// `ORGANIZER:mailto:a@b` has the value `mailto`.
    Truncate,
}

impl ColonSplit {
    /// Split `line` into `(name, value)`, or `None` if it has no colon.
    pub fn split<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let (name, rest) = line.split_once(':')?;
        match self {
            ColonSplit::FirstColon => Some((name, rest)),
            ColonSplit::Truncate => Some((name, rest.split(':').next().unwrap_or(rest))),
        }
    }
}

/// Options for [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    pub end_matching: EndMatching,
    pub colon_split: ColonSplit,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set how END markers are matched.
    pub fn with_end_matching(mut self, end_matching: EndMatching) -> Self {
        self.end_matching = end_matching;
        self
    }

    /// Builder: set how lines are split on colons.
    pub fn with_colon_split(mut self, colon_split: ColonSplit) -> Self {
        self.colon_split = colon_split;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_colon_keeps_remainder() {
        assert_eq!(
            ColonSplit::FirstColon.split("ORGANIZER;CN=Foo:mailto:foo@example.org"),
            Some(("ORGANIZER;CN=Foo", "mailto:foo@example.org"))
        );
        assert_eq!(ColonSplit::FirstColon.split("DESCRIPTION:"), Some(("DESCRIPTION", "")));
        assert_eq!(ColonSplit::FirstColon.split("NO SEPARATOR"), None);
    }

    #[test]
    fn truncate_drops_after_second_colon() {
        assert_eq!(
            ColonSplit::Truncate.split("ORGANIZER;CN=Foo:mailto:foo@example.org"),
            Some(("ORGANIZER;CN=Foo", "mailto"))
        );
        assert_eq!(ColonSplit::Truncate.split("SUMMARY:Lunch"), Some(("SUMMARY", "Lunch")));
    }

    #[test]
    fn end_matching_direction() {
        let open: Vec<_> = ["VCALENDAR", "X", "VEVENT", "X"]
            .iter()
            .enumerate()
            .map(|(idx, name)| Marker::new(*name, idx + 1))
            .collect();
        assert_eq!(EndMatching::Earliest.find(&open, "X"), Some(1));
        assert_eq!(EndMatching::Innermost.find(&open, "X"), Some(3));
        assert_eq!(EndMatching::Earliest.find(&open, "VTODO"), None);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"end-matching": "innermost"}"#).unwrap();
        assert_eq!(
            options,
            ParseOptions::new().with_end_matching(EndMatching::Innermost)
        );

        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
    }
}
