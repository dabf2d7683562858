use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use homevisit_registry::{
    record::PatientRecord,
    view::{ViewFilter, ViewState},
};

use crate::{client::BackendClient, settings::Settings, util};

use self::{
    analyze::AnalyzeArg, area::AreaArg, areas::AreasArg, dashboard::DashboardArg, died::DiedArg,
    distribution::DistributionArg, fetch::FetchArg, register::RegisterArg, settings::SettingsArg,
    transfer::TransferArg, visit::VisitArg,
};

mod analyze;
mod area;
mod areas;
mod dashboard;
mod died;
mod distribution;
mod fetch;
mod register;
mod settings;
mod transfer;
mod visit;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Maximum level of diagnostics written to stderr
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[clap(flatten)]
    backend: BackendArg,

    /// What to do
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Download the patient list as JSON
    Fetch(#[clap(flatten)] FetchArg),
    /// Show headline metrics and field distributions
    Dashboard(#[clap(flatten)] DashboardArg),
    /// Show the distribution of a single field
    Distribution(#[clap(flatten)] DistributionArg),
    /// Cross-tabulate one or two fields with a chi-square test
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// List areas with patient and visit counts
    Areas(#[clap(flatten)] AreasArg),
    /// List the active and deceased patients of one area
    Area(#[clap(flatten)] AreaArg),
    /// Record a visit for a patient
    Visit(#[clap(flatten)] VisitArg),
    /// Mark a patient as deceased
    Died(#[clap(flatten)] DiedArg),
    /// Register a new patient
    Register(#[clap(flatten)] RegisterArg),
    /// Send a patient to the transfer backend
    Transfer(#[clap(flatten)] TransferArg),
    /// Show or change the saved backend URLs
    Settings(#[clap(flatten)] SettingsArg),
}

/// Backend endpoints, shared by every subcommand
#[derive(Debug, Clone, Args)]
pub(crate) struct BackendArg {
    /// Settings file holding the backend URLs
    #[arg(long, global = true, default_value = "homevisit.json")]
    settings: PathBuf,

    /// Registry backend URL (overrides the settings file)
    #[arg(long, global = true, env = "HOMEVISIT_REGISTRY_URL")]
    registry_url: Option<String>,

    /// Transfer backend URL (overrides the settings file)
    #[arg(long, global = true, env = "HOMEVISIT_TRANSFER_URL")]
    transfer_url: Option<String>,
}

impl BackendArg {
    pub(crate) fn settings(&self) -> anyhow::Result<Settings> {
        let file = Settings::load(&self.settings)?;
        Ok(file.with_overrides(self.registry_url.clone(), self.transfer_url.clone()))
    }

    pub(crate) fn registry(&self) -> anyhow::Result<BackendClient> {
        BackendClient::new(self.settings()?.registry_url()?)
    }

    pub(crate) fn transfer(&self) -> anyhow::Result<BackendClient> {
        BackendClient::new(self.settings()?.transfer_url()?)
    }
}

/// Where read-only commands take the patient list from
#[derive(Debug, Clone, Args)]
pub(crate) struct SourceArg {
    /// Read patients from a saved JSON file instead of the registry backend
    #[arg(long)]
    input: Option<PathBuf>,
}

impl SourceArg {
    pub(crate) fn load(&self, backend: &BackendArg) -> anyhow::Result<Vec<PatientRecord>> {
        match &self.input {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading patients");
                let patients = util::read_patients_file(path)?;
                tracing::info!(count = patients.len(), "patients loaded");
                Ok(patients)
            }
            None => backend.registry()?.fetch_patients(),
        }
    }
}

/// Patient list filter
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct FilterArg {
    /// Only patients whose area contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    area: String,

    /// Only patients whose name or file number contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArg {
    pub(crate) fn apply(&self, patients: Vec<PatientRecord>) -> ViewState {
        ViewState::new(patients).with_filter(ViewFilter::new(&self.area, &self.search))
    }
}

/// Output format of reporting commands
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum Format {
    #[default]
    Text,
    Json,
}

/// Loads the patient list and finds one patient by file number
pub(crate) fn load_patient(
    backend: &BackendArg,
    file_number: &str,
) -> anyhow::Result<(ViewState, PatientRecord)> {
    let state = ViewState::new(backend.registry()?.fetch_patients()?);
    let patient = state
        .find(file_number)
        .cloned()
        .with_context(|| format!("No patient with file number {file_number}"))?;
    Ok((state, patient))
}

/// Fails when `patient` is marked as deceased; visits and deaths are only
/// recorded for active patients.
pub(crate) fn ensure_active(patient: &PatientRecord) -> anyhow::Result<()> {
    if patient.is_deceased() {
        anyhow::bail!("Patient {} is marked as deceased", patient.name());
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let backend = &args.backend;
    match &args.mode {
        Mode::Fetch(arg) => fetch::run(arg, backend)?,
        Mode::Dashboard(arg) => dashboard::run(arg, backend)?,
        Mode::Distribution(arg) => distribution::run(arg, backend)?,
        Mode::Analyze(arg) => analyze::run(arg, backend)?,
        Mode::Areas(arg) => areas::run(arg, backend)?,
        Mode::Area(arg) => area::run(arg, backend)?,
        Mode::Visit(arg) => visit::run(arg, backend)?,
        Mode::Died(arg) => died::run(arg, backend)?,
        Mode::Register(arg) => register::run(arg, backend)?,
        Mode::Transfer(arg) => transfer::run(arg, backend)?,
        Mode::Settings(arg) => settings::run(arg, backend)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let args = CommandArgs::try_parse_from([
            "homevisit",
            "analyze",
            "--rows",
            "Diagnosis",
            "--cols",
            "Gender",
            "--input",
            "patients.json",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::Analyze(_)));
    }

    #[test]
    fn test_ensure_active() {
        let active: PatientRecord =
            serde_json::from_value(serde_json::json!({ "Pt Name": "Jane Doe" })).unwrap();
        assert!(ensure_active(&active).is_ok());

        let deceased: PatientRecord = serde_json::from_value(serde_json::json!({
            "Pt Name": "John Roe",
            "Servival Status": "Died",
        }))
        .unwrap();
        let err = ensure_active(&deceased).unwrap_err();
        assert_eq!(err.to_string(), "Patient John Roe is marked as deceased");
    }

    #[test]
    fn test_global_backend_flags() {
        let args = CommandArgs::try_parse_from([
            "homevisit",
            "areas",
            "--registry-url",
            "https://example.test/registry",
            "--area",
            "zar",
        ])
        .unwrap();
        assert_eq!(
            args.backend.registry_url.as_deref(),
            Some("https://example.test/registry")
        );
    }
}
