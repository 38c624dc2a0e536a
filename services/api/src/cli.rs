use crate::demo::{
    run_browse, run_deadlines, run_demo, run_eligibility_check, BrowseArgs, DeadlinesArgs,
    DemoArgs, EligibilityCheckArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use subsidy_companion::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Subsidy Companion",
    about = "Explore agricultural subsidy programs and run the Subsidy Companion service from the command line",
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
    /// Inspect the subsidy program catalog from the terminal
    Programs {
        #[command(subcommand)]
        command: ProgramsCommand,
    },
    /// Run the eligibility screen without starting the service
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
    /// Run an end-to-end CLI demo covering the catalog and the wizard
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ProgramsCommand {
    /// Filter and sort the program catalog
    Browse(BrowseArgs),
    /// Show deadlines falling inside a look-ahead window
    Deadlines(DeadlinesArgs),
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Answer the screen questions and print the result
    Check(EligibilityCheckArgs),
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
        Command::Programs {
            command: ProgramsCommand::Browse(args),
        } => run_browse(args),
        Command::Programs {
            command: ProgramsCommand::Deadlines(args),
        } => run_deadlines(args),
        Command::Eligibility {
            command: EligibilityCommand::Check(args),
        } => run_eligibility_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
