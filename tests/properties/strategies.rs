//! Shared input generators.

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::{json, Value};

/// Ids of a random tree, closed under prefixes so every parent exists
pub fn tree_ids() -> impl Strategy<Value = BTreeSet<String>> {
    let segment = proptest::string::string_regex("[a-cA-C]{1,2}").unwrap();
    let path = proptest::collection::vec(segment, 1..=4);
    proptest::collection::vec(path, 1..24).prop_map(|paths| {
        let mut ids = BTreeSet::new();
        for segments in paths {
            let mut id = String::new();
            for segment in segments {
                id.push('/');
                id.push_str(&segment);
                ids.insert(id.clone());
            }
        }
        ids
    })
}

/// `{path, name}` records for `ids`, in the order given
pub fn records(ids: &BTreeSet<String>) -> Vec<Value> {
    ids.iter()
        .map(|id| {
            let (parent, name) = id.rsplit_once('/').unwrap_or(("", id.as_str()));
            json!({ "path": parent, "name": name })
        })
        .collect()
}
