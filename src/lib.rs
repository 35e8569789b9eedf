//! Parse line-oriented, BEGIN/END delimited calendar text (iCalendar and
//! friends) into a nested tree of property maps.
//!
//! ```
//! let tree = ics_tree::parse(
//!     "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Lunch\nEND:VEVENT\nEND:VCALENDAR",
//! )?;
//!
//! let event = &tree.blocks("VCALENDAR")[0].blocks("VEVENT")[0];
//! assert_eq!(event.text("SUMMARY"), Some("Lunch"));
//! # Ok::<(), ics_tree::FormatError>(())
//! ```
//!
//! Parsing runs in three stages: [`unfold`] splits the text into lines,
//! [`scan`] collects one property map per block, and [`reconcile`] nests
//! them. Block types are not a fixed set and property values are not
//! interpreted beyond what delimiting needs.

pub mod config;
pub mod error;
pub mod event;
pub mod parser;
pub mod reconcile;
pub mod scan;
pub mod tree;
pub mod unescape;
pub mod unfold;

pub use config::{ColonSplit, EndMatching, ParseOptions};
pub use error::{FormatError, FormatErrorKind, ParseResult, UnescapeError};
pub use event::EventSummary;
pub use parser::{parse, parse_bytes, Parser};
pub use tree::{property_name, property_params, PropertyMap, Tree, Value};
