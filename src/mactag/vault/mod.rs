//! # Vault Layer
//!
//! The vault is the note collection mactag reads from. It is owned by the notes
//! application, so mactag only ever *looks things up* in it: the [`Vault`] trait
//! is a read-only capability, never an owned tree.
//!
//! ## Capabilities
//!
//! - **Current-file resolution**: [`Vault::resolve`] turns a user-supplied path into a
//!   [`Document`] (vault-relative path).
//! - **Metadata cache**: [`Vault::metadata`] returns the inline tags and frontmatter tags
//!   of a document. A missing entry is `None`, never an error.
//! - **Tree lookups**: [`Vault::parent`] and [`Vault::children`] walk one level of the
//!   folder hierarchy.
//!
//! ## Implementations
//!
//! - [`fs::FsVault`]: A directory on disk. Markdown files are parsed on lookup
//!   (see [`markdown`]). Dot-entries such as `.obsidian/` and `.mactag/` are hidden.
//! - [`memory::InMemoryVault`]: For testing command logic without filesystem I/O.

use crate::error::Result;
use crate::model::{Document, Folder, NoteMetadata, VaultEntry};
use std::path::{Path, PathBuf};

pub mod fs;
pub mod markdown;
pub mod memory;

/// Read-only access to the host's note collection.
pub trait Vault {
    /// Absolute path of the vault root.
    fn base_path(&self) -> &Path;

    /// Resolve a path (absolute, or relative to the vault root) to a document.
    fn resolve(&self, path: &Path) -> Result<Document>;

    /// Cached metadata for a document, if the vault has any.
    fn metadata(&self, doc: &Document) -> Option<NoteMetadata>;

    /// The folder that contains `doc`.
    fn parent(&self, doc: &Document) -> Folder {
        Folder::new(doc.parent_path())
    }

    /// Direct children of `folder`. Not recursive.
    fn children(&self, folder: &Folder) -> Result<Vec<VaultEntry>>;

    /// Where the document lives on disk.
    fn absolute_path(&self, doc: &Document) -> PathBuf {
        doc.path
            .split('/')
            .fold(self.base_path().to_path_buf(), |acc, part| acc.join(part))
    }
}
