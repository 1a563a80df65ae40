use clap::Parser;
use colored::*;
use mactag::api::{CmdMessage, MacTagApi, MessageLevel, SettingsAction};
use mactag::error::Result;
use mactag::settings::SETTINGS_DIRNAME;
use mactag::vault::fs::FsVault;
use mactag::vault::Vault;
use mactag::xattr::XattrWriter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands, SettingsCommand};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: MacTagApi<FsVault, XattrWriter>,
    cwd: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Tag { file } => handle_tag(&ctx, &file),
        Commands::TagFolder { file } => handle_tag_folder(&ctx, &file),
        Commands::Show { file } => handle_show(&ctx, &file),
        Commands::Settings { action } => handle_settings(&ctx, action),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let vault_dir = match &cli.vault {
        Some(dir) => absolutize(&cwd, dir),
        None => cwd.clone(),
    };

    let vault = FsVault::open(&vault_dir)?;
    let settings_dir = vault.base_path().join(SETTINGS_DIRNAME);
    let writer = XattrWriter::new().with_program(&cli.xattr_bin);

    Ok(AppContext {
        api: MacTagApi::new(vault, writer, settings_dir),
        cwd,
    })
}

/// File arguments are relative to where the command was run, not the vault.
fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn handle_tag(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut result = ctx.api.tag_file(&absolutize(&ctx.cwd, file))?;
    print_messages(&result.messages);
    // Outlive the writes we started so their log lines are not lost.
    result.settle();
    Ok(())
}

fn handle_tag_folder(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut result = ctx.api.tag_folder(&absolutize(&ctx.cwd, file))?;
    print_messages(&result.messages);
    result.settle();
    Ok(())
}

fn handle_show(ctx: &AppContext, file: &Path) -> Result<()> {
    let result = ctx.api.show_tags(&absolutize(&ctx.cwd, file))?;
    print_messages(&result.messages);
    if let Some(encoded) = &result.encoded {
        println!("{}", encoded);
    }
    Ok(())
}

fn handle_settings(ctx: &AppContext, action: Option<SettingsCommand>) -> Result<()> {
    let action = match action {
        None => SettingsAction::Show,
        Some(SettingsCommand::WriteOnSave { value }) => SettingsAction::SetWriteOnSave(value),
        Some(SettingsCommand::Toggle) => SettingsAction::Toggle,
    };

    let result = ctx.api.settings(action)?;
    if action == SettingsAction::Show {
        if let Some(settings) = &result.settings {
            println!("writeOnSave = {}", settings.write_on_save);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
        }
    }
}
