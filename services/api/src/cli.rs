use crate::demo::{run_allocate, run_catalog, run_demo, run_score, AllocateArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use strategy_sim::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Strategy Simulator",
    about = "Score strategic decisions and investment allocations against business KPIs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List decision levels, KPI baselines, and every category's decisions
    Catalog,
    /// Score a decision scenario per category and overall
    Score(ScoreArgs),
    /// Validate an investment allocation and show its KPI estimate
    Allocate(AllocateArgs),
    /// Walk through a sample scenario and the default allocation
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog => {
            run_catalog();
            Ok(())
        }
        Command::Score(args) => run_score(args),
        Command::Allocate(args) => run_allocate(args),
        Command::Demo => run_demo(),
    }
}
