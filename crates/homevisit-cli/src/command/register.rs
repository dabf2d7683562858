use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use homevisit_registry::{columns, record::PatientRecord, request::BackendRequest};

use crate::util::{self, Output};

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct RegisterArg {
    /// JSON file mapping column names to values
    file: Option<PathBuf>,

    /// Field value as COLUMN=VALUE (repeatable, overrides the file)
    #[arg(long = "set", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

fn parse_field(s: &str) -> anyhow::Result<(String, String)> {
    let (name, value) = s
        .split_once('=')
        .with_context(|| format!("Expected COLUMN=VALUE, got '{s}'"))?;
    Ok((name.to_owned(), value.to_owned()))
}

fn build_record(arg: &RegisterArg) -> anyhow::Result<PatientRecord> {
    let mut record = match &arg.file {
        Some(path) => util::read_json_file::<PatientRecord, _>("patient", path)?,
        None => PatientRecord::new(),
    };
    for (name, value) in &arg.fields {
        record.insert(name.as_str(), value.as_str());
    }
    if record.fields().next().is_none() {
        anyhow::bail!("No patient fields given (give a FILE or --set)");
    }
    Ok(record)
}

pub(crate) fn run(arg: &RegisterArg, backend: &BackendArg) -> anyhow::Result<()> {
    let record = build_record(arg)?;
    if record.filled(columns::PATIENT_NAME).is_none() {
        tracing::warn!("registering a patient without a name");
    }
    if record.file_number().is_none() {
        tracing::warn!("registering a patient without a file number");
    }
    let name = record.name().into_owned();
    let request = BackendRequest::register(record);

    if arg.dry_run {
        return Output::stdout().write_json(&request);
    }

    backend.registry()?.send(&request)?;
    println!("Patient registered: {name}");
    Ok(())
}
