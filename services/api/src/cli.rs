use crate::commands::{run_apply, run_login, run_review, run_roster, ApplyArgs, LoginArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use teachteam::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TeachTeam Review",
    about = "Review tutor applicants, rank selections, and serve the review panel API",
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
    /// Inspect or change reviewer selections
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Search and sort the applicant roster
    Roster(RosterArgs),
    /// Submit a tutor application
    Apply(ApplyArgs),
    /// Check reviewer credentials against the stored demo user
    Login(LoginArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum ReviewCommand {
    /// Show every applicant with selection state and labels
    List,
    /// Select or deselect an applicant (clears comment and rank)
    Toggle { name: String },
    /// Set the reviewer comment for a selected applicant
    Comment { name: String, text: String },
    /// Set the rank for a selected applicant; non-numeric input is stored as NaN
    Rank { name: String, value: String },
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
        Command::Review { command } => run_review(command),
        Command::Roster(args) => run_roster(args),
        Command::Apply(args) => run_apply(args),
        Command::Login(args) => run_login(args),
    }
}
