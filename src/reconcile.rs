//! Folding the scanner's flat block list into a nested [`Tree`].

use tracing::trace;

use crate::{
    config::EndMatching,
    error::ParseResult,
    scan::{FlatScan, Marker},
    tree::Tree,
    FormatError,
};

/// Nest the blocks of `scan` by consuming its `END` queue oldest first.
///
/// Each `END:name` is matched to an open `BEGIN:name` (which one depends on
/// `matching`). The matched block is removed and appended to its parent's
/// list under `name`; the parent is the block opened just before it among
/// those still open. A match at index 0 closes the root, which is kept
/// until everything else has been folded.
///
/// Every fold does a linear search and a `Vec::remove`, so this is O(n²) in
/// the number of blocks. That is fine for calendars with up to a few
/// thousand components.
pub fn reconcile(scan: FlatScan, matching: EndMatching) -> ParseResult<Tree> {
    let FlatScan {
        mut blocks,
        mut start_keys,
        mut end_keys,
    } = scan;

    if blocks.len() != start_keys.len() {
        // Can only happen with a hand built `FlatScan`.
        let marker = start_keys.last().or_else(|| end_keys.front());
        return Err(match marker {
            Some(marker) => FormatError::UnterminatedBlock {
                name: marker.name.clone(),
                line: marker.line,
            },
            None => FormatError::NoRootBlock,
        });
    }

    let mut root_end: Option<Marker> = None;

    while let Some(end) = end_keys.pop_front() {
        let unmatched = || FormatError::UnmatchedEnd {
            name: end.name.clone(),
            line: end.line,
        };

        let index = matching.find(&start_keys, &end.name).ok_or_else(unmatched)?;

        if index == 0 {
            if root_end.is_some() {
                return Err(unmatched());
            }
            trace!(name = %end.name, line = end.line, "root block closed");
            root_end = Some(end);
            continue;
        }

        let child = blocks.remove(index);
        let opened = start_keys.remove(index);
        let parent = blocks.get_mut(index - 1).ok_or_else(unmatched)?;

        parent
            .push_block(&opened.name, child)
            .map_err(|_| FormatError::BlockNameConflict {
                name: opened.name.clone(),
                line: opened.line,
            })?;

        trace!(
            name = %opened.name,
            parent = %start_keys[index - 1].name,
            "folded block into parent"
        );
    }

    let mut open = start_keys.into_iter();
    let root_start = open.next().ok_or(FormatError::NoRootBlock)?;

    if root_end.is_none() {
        return Err(FormatError::UnterminatedBlock {
            name: root_start.name,
            line: root_start.line,
        });
    }

    if let Some(leftover) = open.next() {
        return Err(FormatError::UnterminatedBlock {
            name: leftover.name,
            line: leftover.line,
        });
    }

    let root = blocks.pop().ok_or(FormatError::NoRootBlock)?;

    Ok(Tree::new(root_start.name, root))
}
