use crate::demo::{
    run_demo, run_rubric, run_score, run_submit, DemoArgs, ScoreArgs, SubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ospa_scorer::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "OSPA Scorer",
    about = "Score and submit Outstanding School Paper Adviser and Campus Journalist nominations",
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
    /// Score a candidate record saved as JSON
    Score(ScoreArgs),
    /// Validate a candidate record and send it to the tracking sheet
    Submit(SubmitArgs),
    /// Print the active rubric as JSON
    Rubric,
    /// Score a built-in sample nomination
    Demo(DemoArgs),
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
        Command::Submit(args) => run_submit(args).await,
        Command::Rubric => run_rubric(),
        Command::Demo(args) => run_demo(args),
    }
}
