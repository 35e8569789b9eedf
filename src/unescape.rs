use crate::error::UnescapeError;

/// Resolve the backslash escapes allowed in a TEXT value.
///
/// The parser stores values raw; this is for callers that want the text a
/// user would see.
pub fn unescape(s: &str) -> Result<String, UnescapeError> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);

        let mut after = rest[idx + 1..].chars();
        let resolved = match after.next() {
            Some('n' | 'N') => '\n',
            Some(c @ ('\\' | ';' | ',')) => c,
            Some(c) => return Err(UnescapeError::UnknownEscape(c)),
            None => return Err(UnescapeError::TrailingBackslash),
        };
        out.push(resolved);
        rest = after.as_str();
    }

    out.push_str(rest);
    Ok(out)
}
