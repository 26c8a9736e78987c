use crate::suggestions::SuggestionsStyle;
use crate::tasks::TasksMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "senseplan",
    version,
    about = "Terminal personal-assistant scheduling dashboard"
)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Default)]
pub struct GlobalOptions {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// How the tasks widget handles "add"
    #[arg(long, global = true, value_enum)]
    pub tasks_mode: Option<TasksMode>,
    /// How suggested events are presented
    #[arg(long, global = true, value_enum)]
    pub suggestions: Option<SuggestionsStyle>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a month grid
    Calendar {
        /// Month to show, as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
        /// Date to mark as selected, as YYYY-MM-DD
        #[arg(long)]
        select: Option<String>,
    },
    /// Print tasks ordered by due date
    Tasks {
        /// Show completed tasks instead of open ones
        #[arg(long)]
        closed: bool,
    },
    /// Print the call history
    Calls,
    /// Print suggested events
    Suggestions {
        /// Include descriptions and registration links
        #[arg(long)]
        rich: bool,
    },
    /// Send one chat message and wait for the assistant's reply
    Chat {
        /// Message text
        text: String,
    },
    /// Launch the interactive dashboard
    Tui,
}
