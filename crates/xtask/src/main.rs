mod stage;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Project automation tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mirror a template directory tree into a destination directory.
    Stage(stage::Args),
}

fn main() -> Result<(), stage::Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Stage(args) => stage::run(args),
    }
}
