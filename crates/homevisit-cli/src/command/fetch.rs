use std::path::PathBuf;

use clap::Args;

use crate::util::Output;

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct FetchArg {
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FetchArg, backend: &BackendArg) -> anyhow::Result<()> {
    let patients = backend.registry()?.fetch_patients()?;
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_json(&patients)?;
    tracing::info!(count = patients.len(), output = %output.display_path(), "patients saved");
    Ok(())
}
