//! # Command Layer
//!
//! Business logic for each user-facing action. Commands take a [`Vault`](crate::vault::Vault)
//! and an [`AttributeWriter`](crate::xattr::AttributeWriter), return a [`CmdResult`], and
//! never print anything.
//!
//! A `CmdResult` reports writes that were *started*. The OS call finishes later
//! and its outcome only reaches the log; the `pending` handles let a caller wait
//! for that if it wants to.

use crate::model::Document;
use crate::settings::Settings;
use crate::xattr::PendingWrite;
use std::path::PathBuf;

pub mod helpers;
pub mod settings;
pub mod show;
pub mod tag_file;
pub mod tag_folder;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

/// One file the pipeline ran for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFile {
    pub document: Document,
    pub absolute_path: PathBuf,
    pub tags: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub tagged: Vec<TaggedFile>,
    pub encoded: Option<String>,
    pub settings: Option<Settings>,
    pub messages: Vec<CmdMessage>,
    pub pending: Vec<PendingWrite>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_tagged(&mut self, file: TaggedFile, pending: PendingWrite) {
        self.tagged.push(file);
        self.pending.push(pending);
    }

    pub fn with_encoded(mut self, encoded: String) -> Self {
        self.encoded = Some(encoded);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Block until every started write has logged its outcome.
    pub fn settle(&mut self) {
        for pending in self.pending.drain(..) {
            pending.settle();
        }
    }
}
