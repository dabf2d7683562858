use chrono::{Local, NaiveDate};
use clap::Args;
use homevisit_registry::{request::BackendRequest, update::VisitUpdate};

use crate::util::Output;

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct VisitArg {
    /// File number of the patient
    file_number: String,

    /// Visit date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub(crate) fn run(arg: &VisitArg, backend: &BackendArg) -> anyhow::Result<()> {
    let (state, patient) = super::load_patient(backend, &arg.file_number)?;
    super::ensure_active(&patient)?;
    let date = arg.date.unwrap_or_else(|| Local::now().date_naive());
    let visit = VisitUpdate::for_patient(&patient, date);
    let updates = visit.to_updates();
    let request = BackendRequest::update(&patient, updates.clone())?;

    if arg.dry_run {
        return Output::stdout().write_json(&request);
    }

    backend.registry()?.send(&request)?;
    let state = state.apply_updates(&arg.file_number, &updates)?;
    let visits = state
        .find(&arg.file_number)
        .map_or(visit.visit_count, |p| p.visit_count());
    println!(
        "Visit recorded for {} ({}, {} visits)",
        patient.name(),
        visit.slot,
        visits
    );
    Ok(())
}
