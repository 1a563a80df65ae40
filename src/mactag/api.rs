//! # API Facade
//!
//! The single entry point for mactag operations. It dispatches to the command
//! layer and returns structured results; it does no printing and holds no
//! business logic.
//!
//! `MacTagApi<V, W>` is generic over the vault and the attribute writer:
//! - Production: `MacTagApi<FsVault, XattrWriter>`
//! - Testing: `MacTagApi<InMemoryVault, RecordingWriter>`

use crate::commands;
use crate::error::Result;
use crate::vault::Vault;
use crate::xattr::AttributeWriter;
use std::path::{Path, PathBuf};

pub struct MacTagApi<V: Vault, W: AttributeWriter> {
    vault: V,
    writer: W,
    settings_dir: PathBuf,
}

impl<V: Vault, W: AttributeWriter> MacTagApi<V, W> {
    pub fn new(vault: V, writer: W, settings_dir: PathBuf) -> Self {
        Self {
            vault,
            writer,
            settings_dir,
        }
    }

    pub fn tag_file(&self, current: &Path) -> Result<commands::CmdResult> {
        commands::tag_file::run(&self.vault, &self.writer, current)
    }

    pub fn tag_folder(&self, current: &Path) -> Result<commands::CmdResult> {
        commands::tag_folder::run(&self.vault, &self.writer, current)
    }

    pub fn show_tags(&self, current: &Path) -> Result<commands::CmdResult> {
        commands::show::run(&self.vault, current)
    }

    pub fn settings(&self, action: SettingsAction) -> Result<commands::CmdResult> {
        commands::settings::run(&self.settings_dir, action)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

pub use crate::commands::settings::SettingsAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, TaggedFile};
