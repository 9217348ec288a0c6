use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gatherly-cli", version, about = "Gatherly CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one planning pass and print the ranked candidates
    Plan(commands::plan::PlanArgs),
    /// Preview the occurrences generated from a candidate table
    Events(commands::events::EventsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Events(args) => commands::events::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
