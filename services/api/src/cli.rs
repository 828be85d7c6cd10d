use crate::report::{run_questions, run_score, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fit_screener::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Fit Screener",
    about = "Score candidate screening questionnaires and serve the screener API",
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
    /// Score a saved answer file and print the scorecard
    Score(ScoreArgs),
    /// List the questions defined in the question bank
    Questions(QuestionsArgs),
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
        Command::Score(args) => run_score(args),
        Command::Questions(args) => run_questions(args),
    }
}
