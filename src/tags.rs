//! Tag index derived from the note collection.

use std::collections::BTreeSet;

use crate::entity::Note;

/// Selector entry meaning "no tag filter".
pub const ALL_TAGS: &str = "All";

/// Every distinct tag across `notes`, sorted lexicographically.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|n| n.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tag selector options: [`ALL_TAGS`] followed by [`all_tags`].
pub fn tag_options(notes: &[Note]) -> Vec<String> {
    std::iter::once(ALL_TAGS.to_string())
        .chain(all_tags(notes))
        .collect()
}
