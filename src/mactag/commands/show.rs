use super::helpers::describe_tags;
use super::TaggedFile;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::plist::encode_tags;
use crate::tags::extract_tags;
use crate::vault::Vault;
use std::path::Path;

/// Report what would be written for the current file, without writing.
pub fn run<V: Vault>(vault: &V, current: &Path) -> Result<CmdResult> {
    let document = vault.resolve(current)?;
    let tags = extract_tags(vault.metadata(&document).as_ref());
    let encoded = encode_tags(&tags);

    let mut result = CmdResult::default().with_encoded(encoded);
    result.add_message(CmdMessage::info(format!(
        "{}: {}",
        document,
        describe_tags(&tags)
    )));
    result.tagged.push(TaggedFile {
        absolute_path: vault.absolute_path(&document),
        document,
        tags,
    });
    Ok(result)
}
