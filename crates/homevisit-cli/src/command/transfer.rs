use clap::Args;
use homevisit_registry::request::BackendRequest;

use crate::util::Output;

use super::BackendArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct TransferArg {
    /// File number of the patient
    file_number: String,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub(crate) fn run(arg: &TransferArg, backend: &BackendArg) -> anyhow::Result<()> {
    let (_, patient) = super::load_patient(backend, &arg.file_number)?;
    let request = BackendRequest::transfer(&patient);

    if arg.dry_run {
        return Output::stdout().write_json(&request);
    }

    backend.transfer()?.send(&request)?;
    println!("Transfer sent for {}", patient.name());
    Ok(())
}
