use super::Vault;
use crate::error::{MacTagError, Result};
use crate::model::{Document, Folder, NoteMetadata, VaultEntry};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A vault that only exists in memory. Files map to their cached metadata
/// (`None` for files the cache knows nothing about).
pub struct InMemoryVault {
    base: PathBuf,
    files: BTreeMap<String, Option<NoteMetadata>>,
    folders: BTreeSet<String>,
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new("/vault")
    }
}

impl InMemoryVault {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            files: BTreeMap::new(),
            folders: BTreeSet::new(),
        }
    }

    pub fn with_note(mut self, path: &str, metadata: NoteMetadata) -> Self {
        self.insert_file(path, Some(metadata));
        self
    }

    /// A file with no cache entry, e.g. an attachment.
    pub fn with_file(mut self, path: &str) -> Self {
        self.insert_file(path, None);
        self
    }

    pub fn with_folder(mut self, path: &str) -> Self {
        self.insert_folder(&Folder::new(path).path);
        self
    }

    fn insert_file(&mut self, path: &str, metadata: Option<NoteMetadata>) {
        let doc = Document::new(path);
        self.insert_folder(doc.parent_path());
        self.files.insert(doc.path, metadata);
    }

    fn insert_folder(&mut self, path: &str) {
        let mut current = String::new();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            self.folders.insert(current.clone());
        }
    }

    fn to_relative(&self, path: &Path) -> Result<String> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.base)
                .map_err(|_| MacTagError::OutsideVault(path.to_path_buf()))?
        } else {
            path
        };
        Ok(Document::new(relative.to_string_lossy()).path)
    }
}

impl Vault for InMemoryVault {
    fn base_path(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &Path) -> Result<Document> {
        let relative = self.to_relative(path)?;
        if self.files.contains_key(&relative) {
            Ok(Document::new(relative))
        } else if relative.is_empty() || self.folders.contains(&relative) {
            Err(MacTagError::NotAFile(path.to_path_buf()))
        } else {
            Err(MacTagError::NotFound(path.to_path_buf()))
        }
    }

    fn metadata(&self, doc: &Document) -> Option<NoteMetadata> {
        self.files.get(&doc.path).cloned().flatten()
    }

    fn children(&self, folder: &Folder) -> Result<Vec<VaultEntry>> {
        if !folder.is_root() && !self.folders.contains(&folder.path) {
            return Err(MacTagError::NotFound(PathBuf::from(&folder.path)));
        }

        let mut named: Vec<(&str, VaultEntry)> = Vec::new();
        for path in self.files.keys() {
            let doc = Document::new(path.as_str());
            if doc.parent_path() == folder.path {
                named.push((doc_name(path), VaultEntry::File(doc)));
            }
        }
        for path in &self.folders {
            let as_doc = Document::new(path.as_str());
            if as_doc.parent_path() == folder.path {
                named.push((doc_name(path), VaultEntry::Folder(Folder::new(path.as_str()))));
            }
        }

        named.sort_by(|a, b| a.0.cmp(b.0));
        Ok(named.into_iter().map(|(_, entry)| entry).collect())
    }
}

fn doc_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
