use super::{markdown, Vault};
use crate::error::{MacTagError, Result};
use crate::model::{Document, Folder, NoteMetadata, VaultEntry};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const NOTE_EXT: &str = "md";

/// A vault backed by a directory on disk.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    /// Open the vault rooted at `root`. The root is canonicalized so that paths
    /// handed to the OS match what [`Vault::resolve`] sees.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(MacTagError::NotFound(root.to_path_buf()));
        }
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    fn full_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    fn to_relative(&self, path: &Path) -> Result<String> {
        let stripped = path
            .strip_prefix(&self.root)
            .map_err(|_| MacTagError::OutsideVault(path.to_path_buf()))?;

        let parts: Vec<String> = stripped
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Ok(parts.join("/"))
    }
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NOTE_EXT))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

impl Vault for FsVault {
    fn base_path(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> Result<Document> {
        let candidate = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        if !candidate.exists() {
            return Err(MacTagError::NotFound(path.to_path_buf()));
        }
        let canonical = candidate.canonicalize()?;
        let relative = self.to_relative(&canonical)?;

        if relative.is_empty() || canonical.is_dir() {
            return Err(MacTagError::NotAFile(path.to_path_buf()));
        }
        Ok(Document::new(relative))
    }

    fn metadata(&self, doc: &Document) -> Option<NoteMetadata> {
        let path = self.full_path(&doc.path);
        if !is_note(&path) {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(markdown::parse_note(&content)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no metadata for unreadable note");
                None
            }
        }
    }

    fn children(&self, folder: &Folder) -> Result<Vec<VaultEntry>> {
        let dir = self.full_path(&folder.path);
        let mut named = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                continue;
            }

            let path = entry.path();
            let child = folder.child_path(&name);
            if path.is_dir() {
                named.push((name, VaultEntry::Folder(Folder::new(child))));
            } else if path.is_file() {
                named.push((name, VaultEntry::File(Document::new(child))));
            }
        }

        named.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(named.into_iter().map(|(_, entry)| entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagOccurrence;
    use tempfile::TempDir;

    fn vault_with(files: &[(&str, &str)]) -> (TempDir, FsVault) {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        let vault = FsVault::open(temp.path()).unwrap();
        (temp, vault)
    }

    #[test]
    fn test_open_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = FsVault::open(temp.path().join("nope"));
        assert!(matches!(result, Err(MacTagError::NotFound(_))));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let (temp, vault) = vault_with(&[("notes/a.md", "")]);

        let doc = vault.resolve(Path::new("notes/a.md")).unwrap();
        assert_eq!(doc.path, "notes/a.md");

        let doc = vault.resolve(&temp.path().join("notes/a.md")).unwrap();
        assert_eq!(doc.path, "notes/a.md");
    }

    #[test]
    fn test_resolve_missing_file() {
        let (_temp, vault) = vault_with(&[]);
        let result = vault.resolve(Path::new("missing.md"));
        assert!(matches!(result, Err(MacTagError::NotFound(_))));
    }

    #[test]
    fn test_resolve_folder_is_not_a_file() {
        let (_temp, vault) = vault_with(&[("notes/a.md", "")]);
        let result = vault.resolve(Path::new("notes"));
        assert!(matches!(result, Err(MacTagError::NotAFile(_))));
    }

    #[test]
    fn test_resolve_outside_vault() {
        let (_temp, vault) = vault_with(&[]);
        let other = TempDir::new().unwrap();
        let outside = other.path().join("x.md");
        fs::write(&outside, "").unwrap();

        let result = vault.resolve(&outside);
        assert!(matches!(result, Err(MacTagError::OutsideVault(_))));
    }

    #[test]
    fn test_absolute_path_joins_base() {
        let (_temp, vault) = vault_with(&[("notes/a.md", "")]);
        let doc = vault.resolve(Path::new("notes/a.md")).unwrap();
        assert_eq!(
            vault.absolute_path(&doc),
            vault.base_path().join("notes").join("a.md")
        );
    }

    #[test]
    fn test_metadata_for_note() {
        let (_temp, vault) = vault_with(&[("a.md", "hello #x\n")]);
        let meta = vault.metadata(&Document::new("a.md")).unwrap();
        assert_eq!(meta.tags, vec![TagOccurrence::new("#x")]);
    }

    #[test]
    fn test_metadata_extension_is_case_insensitive() {
        let (_temp, vault) = vault_with(&[("A.MD", "#x")]);
        assert!(vault.metadata(&Document::new("A.MD")).is_some());
    }

    #[test]
    fn test_no_metadata_for_attachments() {
        let (_temp, vault) = vault_with(&[("image.png", "#notatag")]);
        assert!(vault.metadata(&Document::new("image.png")).is_none());
    }

    #[test]
    fn test_no_metadata_for_missing_note() {
        let (_temp, vault) = vault_with(&[]);
        assert!(vault.metadata(&Document::new("gone.md")).is_none());
    }

    #[test]
    fn test_children_are_direct_and_sorted() {
        let (_temp, vault) = vault_with(&[
            ("notes/b.md", ""),
            ("notes/a.md", ""),
            ("notes/sub/deep.md", ""),
        ]);

        let children = vault.children(&Folder::new("notes")).unwrap();
        assert_eq!(
            children,
            vec![
                VaultEntry::File(Document::new("notes/a.md")),
                VaultEntry::File(Document::new("notes/b.md")),
                VaultEntry::Folder(Folder::new("notes/sub")),
            ]
        );
    }

    #[test]
    fn test_children_hide_dot_entries() {
        let (_temp, vault) = vault_with(&[
            ("a.md", ""),
            (".obsidian/app.json", "{}"),
            (".DS_Store", ""),
        ]);

        let children = vault.children(&Folder::root()).unwrap();
        assert_eq!(children, vec![VaultEntry::File(Document::new("a.md"))]);
    }

    #[test]
    fn test_parent_of_root_level_note() {
        let (_temp, vault) = vault_with(&[("a.md", "")]);
        let doc = vault.resolve(Path::new("a.md")).unwrap();
        assert!(vault.parent(&doc).is_root());
    }
}
