use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self, CliContext, analysis::ReportArgs, encode::EncodeArgs, groups::GroupsArgs, page::PageArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "greentic-feedback",
    about = "Render, encode and report on feedback questionnaires",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    locale: Option<String>,

    /// Keep page breaks as items, as when previewing a feedback
    #[arg(long, global = true)]
    preview: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one page of items with stored answers filled in
    Page(PageArgs),
    /// Encode the answers of a page into a submission payload
    Encode(EncodeArgs),
    /// Print the responses analysis with profile pictures
    Analysis(ReportArgs),
    /// Print the users that have not answered yet
    NonRespondents(ReportArgs),
    /// Print the group selector of a feedback activity
    Groups(GroupsArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let locale = cmd::i18n::select_locale(cli.locale.as_deref());
    debug!(%locale, "selected locale");
    let catalog = cmd::i18n::catalog(&locale)
        .with_context(|| format!("loading message catalog for {locale}"))?;
    let ctx = CliContext {
        preview: cli.preview,
        localizer: Arc::new(catalog),
    };

    match cli.command {
        Commands::Encode(args) => cmd::encode::run(&args),
        Commands::Page(args) => block_on(cmd::page::run(args, &ctx)),
        Commands::Analysis(args) => block_on(cmd::analysis::run_analysis(args, &ctx)),
        Commands::NonRespondents(args) => {
            block_on(cmd::analysis::run_non_respondents(args, &ctx))
        }
        Commands::Groups(args) => block_on(cmd::groups::run(args, &ctx)),
    }
}

fn block_on<F: Future<Output = Result<()>>>(command: F) -> Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?
        .block_on(command)
}

/// Logs go to stderr so command output stays valid JSON. `-v` flags take precedence over
/// `RUST_LOG`; without either only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
