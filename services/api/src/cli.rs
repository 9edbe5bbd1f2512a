use crate::commands::{run_score, run_taxonomy_check, ScoreArgs, TaxonomyCheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use coop_assess::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Cooperative Assessment",
    about = "Score cooperative self-assessments and serve the assessment API",
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
    /// Score questionnaire answers without starting the server
    Assess {
        #[command(subcommand)]
        command: AssessCommand,
    },
    /// Inspect a taxonomy document
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AssessCommand {
    /// Score an answers file (CSV or JSON) and print the result
    Score(ScoreArgs),
}

#[derive(Subcommand, Debug)]
enum TaxonomyCommand {
    /// Validate a taxonomy document and print its outline
    Check(TaxonomyCheckArgs),
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
        Command::Assess {
            command: AssessCommand::Score(args),
        } => run_score(args),
        Command::Taxonomy {
            command: TaxonomyCommand::Check(args),
        } => run_taxonomy_check(args),
    }
}
