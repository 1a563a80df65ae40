use clap::{ArgAction, Parser, Subcommand};
use mactag::xattr::XATTR_PROGRAM;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mactag", version, long_version = LONG_VERSION)]
#[command(about = "Mirror note tags into macOS Finder tags", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory (defaults to the current directory)
    #[arg(long, global = true, env = "MACTAG_VAULT")]
    pub vault: Option<PathBuf>,

    /// Program used to write extended attributes
    #[arg(long, global = true, env = "MACTAG_XATTR_BIN", default_value = XATTR_PROGRAM)]
    pub xattr_bin: String,

    /// Verbose logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write OS tags for a file
    #[command(alias = "t")]
    Tag {
        /// The note to tag
        file: PathBuf,
    },

    /// Write OS tags for every file in the file's folder
    #[command(alias = "tf")]
    TagFolder {
        /// Any note in the folder to tag
        file: PathBuf,
    },

    /// Print the tags and property list that would be written
    Show {
        /// The note to inspect
        file: PathBuf,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Set writeOnSave
    WriteOnSave {
        #[arg(action = ArgAction::Set, value_parser = clap::value_parser!(bool))]
        value: bool,
    },

    /// Flip writeOnSave
    Toggle,
}
