use super::{CmdMessage, TaggedFile};
use crate::model::Document;
use crate::plist::encode_tags;
use crate::tags::extract_tags;
use crate::vault::Vault;
use crate::xattr::{AttributeWriter, PendingWrite};

/// Extract, encode and start writing the tags of one document.
pub fn tag_document<V: Vault, W: AttributeWriter>(
    vault: &V,
    writer: &W,
    document: Document,
) -> (TaggedFile, PendingWrite) {
    let tags = extract_tags(vault.metadata(&document).as_ref());
    let absolute_path = vault.absolute_path(&document);
    let pending = writer.write(&absolute_path, &encode_tags(&tags));

    let file = TaggedFile {
        document,
        absolute_path,
        tags,
    };
    (file, pending)
}

pub fn describe_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "no tags".to_string()
    } else {
        tags.join(", ")
    }
}

pub fn tagging_message(file: &TaggedFile) -> CmdMessage {
    CmdMessage::success(format!(
        "Tagging {} ({})",
        file.document,
        describe_tags(&file.tags)
    ))
}
