//! # mactag
//!
//! mactag copies the tags of a note into macOS Finder tags, so Finder and
//! Spotlight see the same tags the notes app does. Tags are written to the
//! `com.apple.metadata:_kMDItemUserTags` extended attribute through the `xattr`
//! command.
//!
//! ## Pipeline
//!
//! For every target file:
//!
//! ```text
//! Vault::metadata ──► tags::extract_tags ──► plist::encode_tags ──► AttributeWriter::write
//!  (inline + frontmatter)   (strip '#')          (XML plist)          (xattr -w, async)
//! ```
//!
//! The write is fire-and-forget. Commands return as soon as the `xattr` process
//! has been started; its outcome is only logged.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints messages, sets up logging       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) - thin facade, generic over vault and writer  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) - tag file, tag folder, show,     │
//! │  settings. Return `CmdResult`, never print.                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Vault (vault/) - read-only host capability                 │
//! │  FsVault (production), InMemoryVault (testing)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`vault`]: Vault abstraction, filesystem and in-memory implementations
//! - [`model`]: Core data types (`Document`, `Folder`, `NoteMetadata`)
//! - [`tags`]: Tag extraction
//! - [`plist`]: Property list encoding
//! - [`xattr`]: Attribute writer
//! - [`settings`]: Persisted settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod error;
pub mod model;
pub mod plist;
pub mod settings;
pub mod tags;
pub mod vault;
pub mod xattr;
