//! Tag extraction.
//!
//! A note's tags come from two places in its cached metadata: inline `#tags` in
//! the body and the frontmatter `tags` field. They are reported in the order they
//! were encountered (inline first, then frontmatter) with the leading `#` removed.
//! Nothing is deduplicated; a tag present in both places appears twice.

use crate::model::NoteMetadata;

const TAG_MARKER: char = '#';

/// Returns the plain tag strings of a document. Missing metadata means no tags.
pub fn extract_tags(metadata: Option<&NoteMetadata>) -> Vec<String> {
    let Some(metadata) = metadata else {
        return Vec::new();
    };

    let inline = metadata.tags.iter().map(|occurrence| occurrence.tag.clone());
    let frontmatter = metadata
        .frontmatter_tags
        .clone()
        .map(|tags| tags.into_vec())
        .unwrap_or_default();

    inline
        .chain(frontmatter)
        .map(|tag| strip_marker(&tag).to_string())
        .collect()
}

/// Removes a single leading `#`.
pub fn strip_marker(tag: &str) -> &str {
    tag.strip_prefix(TAG_MARKER).unwrap_or(tag)
}
