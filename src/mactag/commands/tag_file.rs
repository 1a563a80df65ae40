use super::helpers::{tag_document, tagging_message};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::vault::Vault;
use crate::xattr::AttributeWriter;
use std::path::Path;

/// Write the OS tags of the current file.
pub fn run<V: Vault, W: AttributeWriter>(vault: &V, writer: &W, current: &Path) -> Result<CmdResult> {
    let document = vault.resolve(current)?;
    let (file, pending) = tag_document(vault, writer, document);

    let mut result = CmdResult::default();
    result.add_message(tagging_message(&file));
    result.add_tagged(file, pending);
    Ok(result)
}
