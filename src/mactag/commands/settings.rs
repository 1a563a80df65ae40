use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::settings::Settings;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    SetWriteOnSave(bool),
    Toggle,
}

/// Show or change the stored settings. Changes are written immediately.
pub fn run(settings_dir: &Path, action: SettingsAction) -> Result<CmdResult> {
    let mut settings = Settings::load(settings_dir)?;

    let new_value = match action {
        SettingsAction::Show => return Ok(CmdResult::default().with_settings(settings)),
        SettingsAction::SetWriteOnSave(value) => value,
        SettingsAction::Toggle => !settings.write_on_save,
    };

    settings.write_on_save = new_value;
    settings.save(settings_dir)?;

    let mut result = CmdResult::default().with_settings(settings);
    result.add_message(CmdMessage::success(format!(
        "writeOnSave set to {}",
        new_value
    )));
    Ok(result)
}
