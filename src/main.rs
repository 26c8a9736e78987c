mod calendar;
mod calls;
mod chat;
mod cli;
mod commands;
mod config;
mod dashboard;
mod input;
mod logging;
mod mock;
mod model;
mod suggestions;
mod tasks;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    match logging::init_logging()? {
        Some(path) => info!(log = %path.display(), "starting senseplan"),
        None => info!("starting senseplan"),
    }
    let config = commands::resolve_config(&args.options)?;
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Calendar { month, select } => commands::calendar(month, select),
        cli::Command::Tasks { closed } => commands::tasks(closed),
        cli::Command::Calls => commands::calls(),
        cli::Command::Suggestions { rich } => commands::suggestions(rich, &config),
        cli::Command::Chat { text } => commands::chat(text, &config),
        cli::Command::Tui => commands::tui(&config),
    }
}
