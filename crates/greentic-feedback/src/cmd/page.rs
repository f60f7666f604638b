use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use greentic_feedback_lib::ValueFetch;

use super::{CliContext, print_json};
use crate::fixture::FixtureSource;

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Directory holding the exported feedback JSON files
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,
    #[arg(long, value_name = "ID")]
    pub form: u64,
    /// Zero-based page number
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub page: usize,
    /// Only use cached answers
    #[arg(long)]
    pub offline: bool,
    #[arg(long = "ignore-cache")]
    pub ignore_cache: bool,
}

pub async fn run(args: PageArgs, ctx: &CliContext) -> Result<()> {
    let helper = ctx.helper(FixtureSource::new(&args.source));
    let fetch = ValueFetch {
        offline: args.offline,
        ignore_cache: args.ignore_cache,
    };
    let page = helper
        .page_items(args.form, args.page, fetch)
        .await
        .with_context(|| format!("loading page {} from {}", args.page, args.source.display()))?;
    print_json(&page)
}
