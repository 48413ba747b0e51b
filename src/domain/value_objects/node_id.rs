//! Node Id Value Object
//!
//! Node ids are POSIX-like hierarchical paths:
//! - a single leading `/`
//! - no repeated separators
//! - no trailing separator
//! - the root is exactly `/`
//!
//! Parent/child relationships are derived from ids alone. There is no
//! separate pointer structure.

use std::cmp::Ordering;

/// Path separator for node ids
pub const SEPARATOR: char = '/';

/// Id of the synthetic root node
pub const ROOT_ID: &str = "/";

/// Normalize a path into a valid node id.
///
/// Collapses repeated separators and strips a trailing separator. The empty
/// result is the root id. Total over any input and idempotent.
pub fn valid_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_sep = false;
    for c in path.chars() {
        if c == SEPARATOR {
            if !prev_sep {
                out.push(c);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }
    if out.ends_with(SEPARATOR) {
        out.pop();
    }
    if out.is_empty() {
        ROOT_ID.to_string()
    } else {
        out
    }
}

/// Derive a node id from its parent path and its name
pub fn join_id(parent_path: &str, name: &str) -> String {
    valid_path(&format!("{parent_path}{SEPARATOR}{name}"))
}

/// Canonical form of a parent path as stored on a node.
///
/// Direct children of the root carry an empty parent path.
pub fn parent_path(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let normalized = valid_path(raw);
    if normalized == ROOT_ID {
        String::new()
    } else {
        normalized
    }
}

/// Depth of an id: 0 for the root, otherwise the number of non-empty segments
pub fn id_level(id: &str) -> usize {
    if id == ROOT_ID {
        return 0;
    }
    segments(id).count()
}

fn segments(id: &str) -> impl Iterator<Item = &str> {
    id.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Whether `id` equals `ancestor` or lies below it.
///
/// Matching is per segment: `/a` covers `/a/b` but not `/ab`.
pub fn is_self_or_descendant(id: &str, ancestor: &str) -> bool {
    if ancestor == ROOT_ID {
        return true;
    }
    match id.strip_prefix(ancestor) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Cumulative prefixes of an id, root excluded.
///
/// `/a/b` yields `["/a", "/a/b"]`. Used to pre-expand the ancestor chain of a
/// default selection.
pub fn ancestor_ids(id: &str) -> Vec<String> {
    let id = valid_path(id);
    let mut result = Vec::new();
    let mut path = String::new();
    for segment in segments(&id) {
        path.push(SEPARATOR);
        path.push_str(segment);
        result.push(path.clone());
    }
    result
}

/// Ordering used for the flat node list.
///
/// Ids are compared segment by segment so that a node is always directly
/// followed by its own subtree. Within a segment the comparison is
/// case-insensitive first and falls back to the raw text.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = compare_segment(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}
