use serde::{Deserialize, Serialize};
use std::fmt;

/// A note (or any other file) inside the vault, addressed by its
/// vault-relative, `/`-separated path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Document {
    pub path: String,
}

impl Document {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize(path.into()),
        }
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Vault-relative path of the containing folder. The vault root is "".
    pub fn parent_path(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Folder {
    pub path: String,
}

impl Folder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize(path.into()),
        }
    }

    pub fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Vault-relative path of a direct child with the given name.
    pub fn child_path(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.path)
        }
    }
}

/// A direct child of a folder, as enumerated by the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    File(Document),
    Folder(Folder),
}

/// An inline tag found in the body of a note. `tag` keeps the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    pub tag: String,
}

impl TagOccurrence {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

/// The `tags` field of a note's frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterTags {
    One(String),
    Many(Vec<String>),
}

impl FrontmatterTags {
    /// Reads the frontmatter value. Scalars inside a sequence are kept in
    /// their text form; nulls and nested collections are dropped.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::String(s) => Some(Self::One(s.clone())),
            serde_yaml::Value::Sequence(items) => Some(Self::Many(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            _ => None,
        }
    }

    /// A bare string becomes a single entry; it is never split.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(tag) => vec![tag],
            Self::Many(tags) => tags,
        }
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Derived metadata for one document, the equivalent of the host's cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteMetadata {
    pub tags: Vec<TagOccurrence>,
    pub frontmatter_tags: Option<FrontmatterTags>,
}

impl NoteMetadata {
    pub fn with_inline<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(TagOccurrence::new));
        self
    }

    pub fn with_frontmatter_tags(mut self, tags: FrontmatterTags) -> Self {
        self.frontmatter_tags = Some(tags);
        self
    }
}

fn normalize(path: String) -> String {
    let path = path.replace('\\', "/");
    path.trim_matches('/').to_string()
}
