use crate::palette::{Variable, VariableSet};
use anyhow::Context;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, warn};

/// Locate the value of the first declaration of `property` in `css`.
///
/// A declaration site is `property`, starting at a name boundary and
/// followed directly by a colon, then optional whitespace, then a value
/// running up to a semicolon on the same line.  The returned range covers
/// just the value (leading whitespace excluded, semicolon excluded).
/// Occurrences inside comments or quoted strings are ignored.
pub(crate) fn find_value_span(css: &str, property: &str) -> Option<Range<usize>> {
    let bytes = css.as_bytes();
    let needle = property.as_bytes();
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match css[i + 2..].find("*/") {
                    Some(end) => i + 2 + end + 2,
                    None => bytes.len(),
                };
            }
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'-' if bytes[i..].starts_with(needle) && !is_name_byte_before(bytes, i) => {
                let after = i + needle.len();
                if let Some(span) = value_after_colon(bytes, after) {
                    return Some(span);
                }
                i = after;
            }
            _ => i += 1,
        }
    }
    None
}

/// Replace the value of the first declaration of `var` in `css` with `value`.
/// Returns `false` if `css` has no declaration site for `var`.
pub(crate) fn apply(css: &mut String, var: Variable, value: &str) -> bool {
    match find_value_span(css, var.property()) {
        Some(span) => {
            css.replace_range(span, value);
            true
        }
        None => false,
    }
}

/// Apply every variable in `set` to `css`, returning the number of
/// declarations replaced
pub(crate) fn apply_set(css: &mut String, set: &VariableSet) -> usize {
    let mut replaced = 0;
    for (var, value) in set.iter() {
        if apply(css, var, value) {
            replaced += 1;
        } else {
            debug!(property = var.property(), "no declaration site found");
        }
    }
    replaced
}

/// Rewrite the stylesheet at `path` in place with the values in `set`
pub(crate) fn patch_file(path: &Path, set: &VariableSet) -> anyhow::Result<usize> {
    let mut css = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let replaced = apply_set(&mut css, set);
    if replaced == 0 {
        warn!(path = %path.display(), "stylesheet declares none of the palette variables");
    }
    fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), replaced, "stylesheet written");
    Ok(replaced)
}

fn value_after_colon(bytes: &[u8], mut i: usize) -> Option<Range<usize>> {
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    i += 1;
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    let start = i;
    loop {
        match bytes.get(i)? {
            b';' => return Some(start..i),
            b'\n' | b'{' | b'}' => return None,
            _ => i += 1,
        }
    }
}

fn is_name_byte_before(bytes: &[u8], i: usize) -> bool {
    i.checked_sub(1)
        .and_then(|j| bytes.get(j))
        .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// `start` is the index of the opening quote.  Returns the index just past
// the closing quote.  An unescaped newline ends an unterminated string.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while let Some(&b) = bytes.get(i) {
        if b == b'\\' {
            i += 2;
        } else if b == quote {
            return i + 1;
        } else if b == b'\n' {
            return i;
        } else {
            i += 1;
        }
    }
    bytes.len()
}
