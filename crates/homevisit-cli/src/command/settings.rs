use clap::{Args, Subcommand};

use crate::util::Output;

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct SettingsArg {
    #[command(subcommand)]
    action: SettingsAction,
}

#[derive(Debug, Clone, Subcommand)]
enum SettingsAction {
    /// Print the effective backend URLs
    Show,
    /// Save the effective backend URLs (from --registry-url / --transfer-url
    /// and the environment) to the settings file
    Set,
}

pub(crate) fn run(arg: &SettingsArg, backend: &BackendArg) -> anyhow::Result<()> {
    let settings = backend.settings()?;
    match arg.action {
        SettingsAction::Show => Output::stdout().write_json(&settings)?,
        SettingsAction::Set => {
            settings.save(&backend.settings)?;
            println!("Settings saved to {}", backend.settings.display());
        }
    }
    Ok(())
}
