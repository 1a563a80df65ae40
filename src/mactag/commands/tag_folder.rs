use super::helpers::{tag_document, tagging_message};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::VaultEntry;
use crate::vault::Vault;
use crate::xattr::AttributeWriter;
use std::path::Path;

/// Write the OS tags of every file next to the current file.
///
/// Only direct children of the parent folder are visited; sub-folders are
/// skipped without a message. Writes are started back-to-back without waiting.
pub fn run<V: Vault, W: AttributeWriter>(vault: &V, writer: &W, current: &Path) -> Result<CmdResult> {
    let document = vault.resolve(current)?;
    let folder = vault.parent(&document);

    let mut result = CmdResult::default();
    for entry in vault.children(&folder)? {
        if let VaultEntry::File(child) = entry {
            let (file, pending) = tag_document(vault, writer, child);
            result.add_message(tagging_message(&file));
            result.add_tagged(file, pending);
        }
    }

    result.add_message(CmdMessage::info(format!(
        "{} file(s) in {}",
        result.tagged.len(),
        folder
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteMetadata;
    use crate::vault::memory::InMemoryVault;
    use crate::xattr::RecordingWriter;
    use std::path::PathBuf;

    #[test]
    fn test_writes_once_per_file_and_skips_subfolders() {
        let vault = InMemoryVault::new("/vault")
            .with_note("notes/a.md", NoteMetadata::default().with_inline(["#a"]))
            .with_note("notes/b.md", NoteMetadata::default().with_inline(["#b"]))
            .with_folder("notes/archive");
        let writer = RecordingWriter::new();

        let res = run(&vault, &writer, Path::new("notes/a.md")).unwrap();

        assert_eq!(
            writer.paths(),
            vec![
                PathBuf::from("/vault/notes/a.md"),
                PathBuf::from("/vault/notes/b.md"),
            ]
        );
        assert_eq!(res.tagged.len(), 2);
        assert_eq!(res.pending.len(), 2);
    }

    #[test]
    fn test_not_recursive() {
        let vault = InMemoryVault::new("/vault")
            .with_file("notes/a.md")
            .with_file("notes/archive/old.md");
        let writer = RecordingWriter::new();

        run(&vault, &writer, Path::new("notes/a.md")).unwrap();

        assert_eq!(writer.paths(), vec![PathBuf::from("/vault/notes/a.md")]);
    }

    #[test]
    fn test_root_folder() {
        let vault = InMemoryVault::new("/vault")
            .with_file("a.md")
            .with_file("b.md")
            .with_file("notes/c.md");
        let writer = RecordingWriter::new();

        let res = run(&vault, &writer, Path::new("b.md")).unwrap();

        assert_eq!(res.tagged.len(), 2);
        assert_eq!(writer.paths().len(), 2);
    }

    #[test]
    fn test_attachments_get_an_empty_list() {
        let vault = InMemoryVault::new("/vault")
            .with_note("notes/a.md", NoteMetadata::default().with_inline(["#a"]))
            .with_file("notes/photo.jpg");
        let writer = RecordingWriter::new();

        let res = run(&vault, &writer, Path::new("notes/a.md")).unwrap();

        let photo = &res.tagged[1];
        assert_eq!(photo.document.path, "notes/photo.jpg");
        assert!(photo.tags.is_empty());
    }

    #[test]
    fn test_summary_message() {
        let vault = InMemoryVault::new("/vault").with_file("notes/a.md");
        let writer = RecordingWriter::new();

        let res = run(&vault, &writer, Path::new("notes/a.md")).unwrap();

        let last = res.messages.last().unwrap();
        assert_eq!(last.content, "1 file(s) in notes");
    }
}
