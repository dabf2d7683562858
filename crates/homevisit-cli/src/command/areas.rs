use clap::Args;
use homevisit_registry::area;

use crate::table;

use super::{BackendArg, FilterArg, SourceArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct AreasArg {
    #[clap(flatten)]
    source: SourceArg,

    #[clap(flatten)]
    filter: FilterArg,
}

pub(crate) fn run(arg: &AreasArg, backend: &BackendArg) -> anyhow::Result<()> {
    let state = arg.filter.apply(arg.source.load(backend)?);
    let areas = area::group_by_area(state.visible());
    print!("{}", table::render_area_cards(&areas)?);
    Ok(())
}
