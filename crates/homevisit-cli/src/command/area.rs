use clap::Args;
use homevisit_registry::area::AreaDetail;

use crate::table::{self, ExtraColumn};

use super::{BackendArg, FilterArg, SourceArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct AreaArg {
    /// Area name (case-insensitive)
    name: String,

    #[clap(flatten)]
    source: SourceArg,

    #[clap(flatten)]
    filter: FilterArg,

    /// Extra columns to show (comma-separated: visits, stage, ecog, referral, survival)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<ExtraColumn>,
}

pub(crate) fn run(arg: &AreaArg, backend: &BackendArg) -> anyhow::Result<()> {
    let state = arg.filter.apply(arg.source.load(backend)?);
    let detail = AreaDetail::for_area(state.visible(), &arg.name);

    println!("{}", detail.name);
    println!();
    print!(
        "{}",
        table::render_patient_list("Active patients", &detail.active, &arg.columns)?
    );
    println!();
    print!(
        "{}",
        table::render_patient_list("Deceased patients", &detail.deceased, &arg.columns)?
    );
    Ok(())
}
