use chrono::{Local, NaiveDate};
use clap::Args;
use homevisit_registry::{request::BackendRequest, update::DeathRecord};

use crate::util::Output;

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct DiedArg {
    /// File number of the patient
    file_number: String,

    /// Date of death (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Place of death
    #[arg(long)]
    place: String,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub(crate) fn run(arg: &DiedArg, backend: &BackendArg) -> anyhow::Result<()> {
    let (_, patient) = super::load_patient(backend, &arg.file_number)?;
    super::ensure_active(&patient)?;

    let death = DeathRecord {
        date: arg.date.unwrap_or_else(|| Local::now().date_naive()),
        place: arg.place.clone(),
    };
    let request = BackendRequest::update(&patient, death.to_updates())?;

    if arg.dry_run {
        return Output::stdout().write_json(&request);
    }

    backend.registry()?.send(&request)?;
    println!("Patient status updated to Died: {}", patient.name());
    Ok(())
}
