use clap::Args;
use homevisit_registry::analysis::CrossTabReport;

use crate::{table, util::Output};

use super::{BackendArg, Format, SourceArg};

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    source: SourceArg,

    /// Row variable (spreadsheet column)
    #[arg(long)]
    rows: String,

    /// Column variable; enables the chi-square test
    #[arg(long)]
    cols: Option<String>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: Format,
}

pub(crate) fn run(arg: &AnalyzeArg, backend: &BackendArg) -> anyhow::Result<()> {
    let patients = arg.source.load(backend)?;
    let Some(report) = CrossTabReport::new(&patients, &arg.rows, arg.cols.as_deref()) else {
        println!("No patients to analyze.");
        return Ok(());
    };

    match arg.format {
        Format::Json => Output::stdout().write_json(&report)?,
        Format::Text => print!("{}", table::render_crosstab(&report)?),
    }
    Ok(())
}
