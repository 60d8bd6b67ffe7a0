//! Single-segment glob expansion with version-aware selection.
//!
//! Install locations such as `~/.nvm/versions/node/*/bin` hold one directory
//! per installed version. Only the best entry is used: entries compare by
//! their numeric components (`v18.2.0` -> `[18, 2, 0]`), higher wins, and
//! ties (or names without digits) fall back to lexicographic order with the
//! later name winning. So `v20.11.1` beats `v9.9.9`, which a plain string
//! sort would get wrong.

use std::cmp::Ordering;

/// A path split around its first glob segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobParts<'a> {
    /// Directory to list.
    pub parent: &'a str,
    /// Segment pattern containing the `*`.
    pub pattern: &'a str,
    /// Remainder after the segment, starting with a separator (or empty).
    pub rest: &'a str,
}

fn is_separator(c: char, windows: bool) -> bool {
    c == '/' || (windows && c == '\\')
}

/// Split `path` around the segment holding its first `*`.
///
/// Returns `None` when the path has no glob or the glob is in the first
/// segment (there is no parent to list).
pub fn split_glob(path: &str, windows: bool) -> Option<GlobParts<'_>> {
    let star = path.find('*')?;
    let start = path[..star].rfind(|c: char| is_separator(c, windows))?;
    let end = path[star..]
        .find(|c: char| is_separator(c, windows))
        .map_or(path.len(), |offset| star + offset);

    // Keep the separator when the parent is the filesystem root
    let parent = if start == 0 { &path[..1] } else { &path[..start] };
    Some(GlobParts {
        parent,
        pattern: &path[start + 1..end],
        rest: &path[end..],
    })
}

/// Whether `name` matches a segment pattern with a single `*`.
pub fn segment_matches(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => pattern == name,
    }
}

/// Numeric components of an entry name, in order of appearance.
pub fn version_key(name: &str) -> Vec<u64> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse().unwrap_or(u64::MAX))
        .collect()
}

/// Order two entry names by version, then lexicographically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    version_key(a)
        .cmp(&version_key(b))
        .then_with(|| a.cmp(b))
}

/// Best entry matching `pattern`, if any.
pub fn select_best_match<'a>(pattern: &str, entries: &'a [String]) -> Option<&'a str> {
    entries
        .iter()
        .map(String::as_str)
        .filter(|name| segment_matches(pattern, name))
        .max_by(|a, b| compare_versions(a, b))
}
