use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{CliContext, print_json};
use crate::fixture::FixtureSource;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Directory holding the exported feedback JSON files
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,
    #[arg(long, value_name = "ID")]
    pub form: u64,
    /// Group to report on, 0 for all participants
    #[arg(long, value_name = "G", default_value_t = 0)]
    pub group: u64,
    #[arg(long, value_name = "P", default_value_t = 0)]
    pub page: usize,
}

pub async fn run_analysis(args: ReportArgs, ctx: &CliContext) -> Result<()> {
    let analysis = ctx
        .helper(FixtureSource::new(&args.source))
        .responses_analysis(args.form, args.group, args.page)
        .await
        .context("building responses analysis")?;
    print_json(&analysis)
}

pub async fn run_non_respondents(args: ReportArgs, ctx: &CliContext) -> Result<()> {
    let report = ctx
        .helper(FixtureSource::new(&args.source))
        .non_respondents(args.form, args.group, args.page)
        .await
        .context("building non respondents report")?;
    print_json(&report)
}
