use clap::Args;
use homevisit_stats::distribution::Distribution;

use crate::{table, util::Output};

use super::{BackendArg, Format, SourceArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct DistributionArg {
    #[clap(flatten)]
    source: SourceArg,

    /// Field (spreadsheet column) to count
    #[arg(long)]
    field: String,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: Format,
}

pub(crate) fn run(arg: &DistributionArg, backend: &BackendArg) -> anyhow::Result<()> {
    let patients = arg.source.load(backend)?;
    let distribution = Distribution::from_records(&patients, &arg.field);

    match arg.format {
        Format::Json => Output::stdout().write_json(&distribution)?,
        Format::Text => print!("{}", table::render_distribution(&arg.field, &distribution)?),
    }
    Ok(())
}
