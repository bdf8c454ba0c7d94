use clap::{Args, Parser, Subcommand};
use olahire::error::AppError;

use crate::{demo, server};

#[derive(Parser, Debug)]
#[command(
    name = "OlaHire Console",
    about = "Exercise and serve the OlaHire client core from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted end-to-end pass over an in-memory backend (default command)
    Demo,
    /// Serve the backend contract over HTTP for front-end development
    Stub(StubArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct StubArgs {
    /// Override the configured host for the stub server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the stub server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => demo::run().await,
        Command::Stub(args) => server::run(args).await,
    }
}
