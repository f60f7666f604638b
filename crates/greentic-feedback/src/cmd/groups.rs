use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{CliContext, print_json};
use crate::fixture::FixtureSource;

#[derive(Args, Debug, Clone)]
pub struct GroupsArgs {
    /// Directory holding the exported feedback JSON files
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,
    /// Course module id of the feedback activity
    #[arg(long = "cm", value_name = "ID")]
    pub cm_id: u64,
}

pub async fn run(args: GroupsArgs, ctx: &CliContext) -> Result<()> {
    let info = ctx
        .helper(FixtureSource::new(&args.source))
        .group_info(args.cm_id)
        .await
        .context("loading groups")?;
    print_json(&info)
}
