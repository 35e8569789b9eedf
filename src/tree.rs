//! The nested property tree produced by a parse.
//!
//! A [`PropertyMap`] holds one block's properties in the order they were
//! first written, plus one list per child block type. Scalar keys keep their
//! names exactly as written, parameter suffix and all (`DTSTART;TZID=...`).

use std::{slice, str::FromStr};

use itertools::Itertools;
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{error::UnescapeError, unescape::unescape, FormatError};

/// The value stored under a key of a [`PropertyMap`].
///
/// A key only ever holds [`Value::Blocks`] if it was populated by nested
/// blocks of that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Blocks(Vec<PropertyMap>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Blocks(_) => None,
        }
    }

    pub fn as_blocks(&self) -> Option<&[PropertyMap]> {
        match self {
            Value::Text(_) => None,
            Value::Blocks(blocks) => Some(blocks),
        }
    }
}

/// The properties and child blocks of one BEGIN/END block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, Value)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// The scalar stored under exactly `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// The child blocks of type `name`, in document order. Empty if there
    /// are none.
    pub fn blocks(&self, name: &str) -> &[PropertyMap] {
        self.get(name).and_then(Value::as_blocks).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Find a scalar property by its name, ignoring any parameter suffix on
    /// the key and ASCII case.
    ///
    /// Returns the full key alongside the value, so the caller can still get
    /// at the parameters with [`property_params`] or [`PropertyMap::params`].
    pub fn property(&self, name: &str) -> Option<(&str, &str)> {
        self.entries.iter().find_map(|(key, value)| match value {
            Value::Text(text) if property_name(key).eq_ignore_ascii_case(name) => {
                Some((key.as_str(), text.as_str()))
            }
            _ => None,
        })
    }

    /// The parameters of the property [`property`](Self::property) finds for
    /// `name`, e.g. `[("TZID", "Europe/London")]` for
    /// `DTSTART;TZID=Europe/London`.
    pub fn params(&self, name: &str) -> Option<Vec<(&str, &str)>> {
        self.property(name).map(|(key, _)| property_params(key))
    }

    /// The scalar under `key` with TEXT escapes (`\n`, `\,` etc.) resolved.
    pub fn unescaped_text(&self, key: &str) -> Option<Result<String, UnescapeError>> {
        self.text(key).map(unescape)
    }

    /// Store `value` under `key`, overwriting in place if it already exists.
    pub(crate) fn set_text(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = Value::Text(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), Value::Text(value.to_string()))),
        }
    }

    /// Append to the scalar under `key`. Returns false if there is no such
    /// scalar.
    pub(crate) fn append_text(&mut self, key: &str, content: &str) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, Value::Text(text))) => {
                text.push_str(content);
                true
            }
            _ => false,
        }
    }

    /// Add `child` to the list of `name` blocks, creating the list if absent.
    ///
    /// Hands the child back if `name` already holds a scalar.
    pub(crate) fn push_block(&mut self, name: &str, child: PropertyMap) -> Result<(), PropertyMap> {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, Value::Blocks(blocks))) => blocks.push(child),
            Some((_, Value::Text(_))) => return Err(child),
            None => self
                .entries
                .push((name.to_string(), Value::Blocks(vec![child]))),
        }
        Ok(())
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The name part of a property key, e.g. `DTSTART` for
/// `DTSTART;TZID=Europe/London`.
pub fn property_name(key: &str) -> &str {
    key.split(';').next().unwrap_or(key)
}

/// The parameters of a property key as `(name, value)` pairs. A parameter
/// without `=` gets an empty value.
///
/// Quoted parameter values containing `;` are not understood.
pub fn property_params(key: &str) -> Vec<(&str, &str)> {
    key.split(';')
        .skip(1)
        .map(|param| {
            param
                .splitn(2, '=')
                .collect_tuple()
                .unwrap_or((param, ""))
        })
        .collect()
}

/// A parsed document: the single top-level block and its type name.
///
/// Serializes as `{ NAME: [ root ] }`, a one-element list for symmetry with
/// nested block collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    name: String,
    root: PropertyMap,
}

impl Tree {
    pub(crate) fn new(name: String, root: PropertyMap) -> Self {
        Tree { name, root }
    }

    /// Type name of the top-level block, usually `VCALENDAR`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &PropertyMap {
        &self.root
    }

    /// Mirrors [`PropertyMap::blocks`] for the single-key top level, so
    /// `tree.blocks("VCALENDAR")[0].blocks("VEVENT")` walks the tree.
    pub fn blocks(&self, name: &str) -> &[PropertyMap] {
        if name == self.name {
            slice::from_ref(&self.root)
        } else {
            &[]
        }
    }

    /// Split into the root block's type name and its property map.
    pub fn into_parts(self) -> (String, PropertyMap) {
        (self.name, self.root)
    }

    /// The tree as a plain single-key map.
    pub fn into_property_map(self) -> PropertyMap {
        PropertyMap {
            entries: vec![(self.name, Value::Blocks(vec![self.root]))],
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, slice::from_ref(&self.root))?;
        map.end()
    }
}

impl FromStr for Tree {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_keeps_position() {
        let mut map = PropertyMap::new();
        map.set_text("A", "1");
        map.set_text("B", "2");
        map.set_text("A", "3");

        assert_eq!(map.keys().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(map.text("A"), Some("3"));
    }

    #[test]
    fn append_needs_existing_scalar() {
        let mut map = PropertyMap::new();
        assert!(!map.append_text("SUMMARY", "x"));

        map.set_text("SUMMARY", "Long ");
        assert!(map.append_text("SUMMARY", "text"));
        assert_eq!(map.text("SUMMARY"), Some("Long text"));
    }

    #[test]
    fn push_block_rejects_scalar_key() {
        let mut map = PropertyMap::new();
        map.set_text("VALARM", "oops");
        assert!(map.push_block("VALARM", PropertyMap::new()).is_err());

        map.push_block("VEVENT", PropertyMap::new()).unwrap();
        map.push_block("VEVENT", PropertyMap::new()).unwrap();
        assert_eq!(map.blocks("VEVENT").len(), 2);
        assert!(map.blocks("VTODO").is_empty());
        assert_eq!(map.text("VEVENT"), None);
    }

    #[test]
    fn property_lookup_ignores_params_and_case() {
        let mut map = PropertyMap::new();
        map.set_text("DTSTART;TZID=Europe/London", "20220208T153000");

        assert_eq!(
            map.property("dtstart"),
            Some(("DTSTART;TZID=Europe/London", "20220208T153000"))
        );
        assert_eq!(map.property("DTEND"), None);
    }

    #[test]
    fn params_of_key() {
        assert_eq!(
            property_params("ATTENDEE;CN=Foo;RSVP=TRUE;X-FLAG"),
            [("CN", "Foo"), ("RSVP", "TRUE"), ("X-FLAG", "")]
        );
        assert!(property_params("SUMMARY").is_empty());
        assert_eq!(property_name("SUMMARY"), "SUMMARY");
    }

    #[test]
    fn params_through_lookup() {
        let mut map = PropertyMap::new();
        map.set_text("ATTENDEE;CN=Foo;RSVP=TRUE", "mailto:foo@example.org");

        assert_eq!(
            map.params("attendee"),
            Some(vec![("CN", "Foo"), ("RSVP", "TRUE")])
        );
        assert_eq!(map.params("ORGANIZER"), None);
    }

    #[test]
    fn unescaped_description_from_parsed_tree() {
        let tree = crate::parse(
            "BEGIN:VCALENDAR\nBEGIN:VEVENT\nDESCRIPTION:Room 1\\, Floor 2\\nBring\\; snacks\nSUMMARY:bad \\q\nEND:VEVENT\nEND:VCALENDAR",
        )
        .unwrap();
        let event = &tree.root().blocks("VEVENT")[0];

        assert_eq!(
            event.text("DESCRIPTION"),
            Some(r"Room 1\, Floor 2\nBring\; snacks")
        );
        assert_eq!(
            event.unescaped_text("DESCRIPTION"),
            Some(Ok("Room 1, Floor 2\nBring; snacks".to_string()))
        );
        assert_eq!(
            event.unescaped_text("SUMMARY"),
            Some(Err(UnescapeError::UnknownEscape('q')))
        );
        assert_eq!(event.unescaped_text("LOCATION"), None);
    }

    #[test]
    fn into_parts_gives_root_name_and_map() {
        let mut root = PropertyMap::new();
        root.set_text("VERSION", "2.0");

        let (name, map) = Tree::new("VCALENDAR".to_string(), root.clone()).into_parts();
        assert_eq!(name, "VCALENDAR");
        assert_eq!(map, root);
    }

    #[test]
    fn tree_blocks_only_match_root_name() {
        let tree = Tree::new("VCALENDAR".to_string(), PropertyMap::new());
        assert_eq!(tree.blocks("VCALENDAR").len(), 1);
        assert!(tree.blocks("VEVENT").is_empty());

        let map = tree.into_property_map();
        assert_eq!(map.blocks("VCALENDAR").len(), 1);
    }
}
