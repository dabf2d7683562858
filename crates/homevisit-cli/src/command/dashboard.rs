use clap::Args;
use homevisit_registry::dashboard::Dashboard;

use crate::{table, util::Output};

use super::{BackendArg, Format, SourceArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct DashboardArg {
    #[clap(flatten)]
    source: SourceArg,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: Format,
}

pub(crate) fn run(arg: &DashboardArg, backend: &BackendArg) -> anyhow::Result<()> {
    let patients = arg.source.load(backend)?;
    let dashboard = Dashboard::from_records(&patients);

    if arg.format == Format::Json {
        return Output::stdout().write_json(&dashboard);
    }

    print!("{}", table::render_metrics(&dashboard.metrics)?);
    for field in &dashboard.distributions {
        println!();
        print!("{}", table::render_distribution(field.field, &field.distribution)?);
    }
    Ok(())
}
