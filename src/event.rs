use serde::Serialize;

use crate::tree::{PropertyMap, Tree};

const VEVENT: &str = "VEVENT";

/// The handful of event fields most callers want, as raw property values.
///
/// Values are not interpreted: dates stay in their iCalendar form and any
/// `TZID` parameter is left on the property key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub start: Option<String>,
    pub end: Option<String>,
    pub summary: Option<String>,
}

impl EventSummary {
    pub fn from_block(block: &PropertyMap) -> Self {
        let value = |name: &str| block.property(name).map(|(_, value)| value.to_string());

        EventSummary {
            start: value("DTSTART"),
            end: value("DTEND"),
            summary: value("SUMMARY"),
        }
    }
}

impl Tree {
    /// The `VEVENT` blocks directly under the root, in document order.
    pub fn events(&self) -> impl Iterator<Item = EventSummary> + '_ {
        self.root()
            .blocks(VEVENT)
            .iter()
            .map(EventSummary::from_block)
    }

    pub fn event_count(&self) -> usize {
        self.root().blocks(VEVENT).len()
    }
}
