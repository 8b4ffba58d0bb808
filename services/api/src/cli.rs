use crate::console::{run_check, run_submit, CheckArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use onswift_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "OnSwift Intake",
    about = "Validate, qualify, and submit OnSwift freelancer applications",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the intake HTTP service (default command)
    Serve(ServeArgs),
    /// Show field errors and pass criteria for an application draft
    Check(CheckArgs),
    /// Validate an application draft and submit it to the applications backend
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured applications backend base URL
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Submit(args) => run_submit(args).await,
    }
}
