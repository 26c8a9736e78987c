use crate::calendar::{
    first_of_month, has_month_grid, month_grid, month_title, DayCell, WEEKDAY_HEADINGS,
};
use crate::chat::ChatSession;
use crate::cli::GlobalOptions;
use crate::config::{load_config, DashboardConfig};
use crate::dashboard::Dashboard;
use crate::mock;
use crate::model::{CallRecord, ChatMessage, SuggestedEvent, Task};
use crate::suggestions::{self, SuggestionsStyle};
use crate::tasks::{empty_tab_text, TaskList};
use crate::{calls, ui};
use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use std::thread;
use tracing::debug;
use std::time::Instant;

/// Loads the config file and applies command-line overrides on top.
pub fn resolve_config(options: &GlobalOptions) -> Result<DashboardConfig> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(mode) = options.tasks_mode {
        config.tasks_mode = mode;
    }
    if let Some(style) = options.suggestions {
        config.suggestions_style = style;
    }
    Ok(config)
}

pub fn calendar(month: Option<String>, select: Option<String>) -> Result<()> {
    let today = Local::now().date_naive();
    let anchor = match month.as_deref() {
        Some(raw) => parse_month(raw)?,
        None => first_of_month(today),
    };
    let selected = select.as_deref().map(parse_date).transpose()?;
    let cells = month_grid(anchor, today, selected).ok_or_else(|| {
        anyhow!("{} is outside the supported calendar range", month_title(anchor))
    })?;
    println!("{}", month_title(anchor));
    println!(
        "{}",
        WEEKDAY_HEADINGS
            .iter()
            .map(|h| format!("{:^4}", h))
            .collect::<String>()
    );
    for week in cells.chunks(7) {
        println!("{}", week.iter().map(format_cell).collect::<String>());
    }
    println!();
    println!("Today's Schedule");
    let events = mock::events();
    if events.is_empty() {
        println!("  (no appointments)");
    }
    for event in events {
        println!("  {:>5}  {} ({})", event.time, event.title, event.category.label());
    }
    Ok(())
}

pub fn tasks(closed: bool) -> Result<()> {
    let list = TaskList::new(mock::tasks());
    let (open, done) = (list.list_open(), list.list_closed());
    println!("Open ({})  Closed ({})", open.len(), done.len());
    let shown = if closed { done } else { open };
    if shown.is_empty() {
        let (title, hint) = empty_tab_text(closed);
        println!("  {}", title);
        println!("    {}", hint);
    }
    for task in shown {
        print_task(task);
    }
    Ok(())
}

pub fn calls() -> Result<()> {
    let records = mock::calls();
    if records.is_empty() {
        println!("{}", calls::EMPTY_TITLE);
        println!("  {}", calls::EMPTY_HINT);
    }
    for call in &records {
        print_call(call);
    }
    Ok(())
}

pub fn suggestions(rich: bool, config: &DashboardConfig) -> Result<()> {
    let style = if rich {
        SuggestionsStyle::Rich
    } else {
        config.suggestions_style
    };
    let events = mock::suggested_events();
    if events.is_empty() {
        println!("{}", suggestions::EMPTY_TITLE);
        println!("  {}", suggestions::EMPTY_HINT);
    }
    for event in &events {
        print_suggestion(event, style);
    }
    Ok(())
}

pub fn chat(text: String, config: &DashboardConfig) -> Result<()> {
    let mut session = ChatSession::with_greeting(config.reply_delay(), mock::GREETING);
    if session.send_user_message(&text, Instant::now()).is_none() {
        bail!("message is empty");
    }
    debug!(delay_ms = session.reply_delay().as_millis() as u64, "waiting for reply");
    while let Some(wait) = session.time_until_reply(Instant::now()) {
        thread::sleep(wait);
        session.poll(Instant::now());
    }
    for message in session.messages() {
        print_message(message, &config.assistant_name);
    }
    Ok(())
}

pub fn tui(config: &DashboardConfig) -> Result<()> {
    let dashboard = Dashboard::new(config, Local::now().date_naive());
    ui::run(dashboard)
}

fn parse_month(raw: &str) -> Result<NaiveDate> {
    let month = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid month (use YYYY-MM): {}", raw))?;
    if !has_month_grid(month) {
        bail!("month out of range: {}", raw);
    }
    Ok(month)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date (use YYYY-MM-DD): {}", raw))
}

fn format_cell(cell: &DayCell) -> String {
    let day = cell.date.format("%-d").to_string();
    if cell.is_selected {
        format!("<{:>2}>", day)
    } else if cell.is_today {
        format!("[{:>2}]", day)
    } else if cell.is_current_month {
        format!(" {:>2} ", day)
    } else {
        format!(" {:>2}.", day)
    }
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    println!("  [{}] {} ({})", mark, task.title, task.priority.label());
    if let Some(desc) = &task.description {
        println!("      {}", desc);
    }
    if let Some(due) = &task.due_date {
        println!("      due: {}", due);
    }
}

fn print_call(call: &CallRecord) {
    println!("  {} [{}]", call.title, call.status.label());
    println!("      {}  {} {}", call.contact, call.date, call.time);
    if let Some(duration) = &call.duration {
        println!("      duration: {}", duration);
    }
    if call.has_viewable_transcript() {
        if let Some(transcript) = &call.transcript {
            println!("      transcript: {}", transcript);
        }
    }
}

fn print_suggestion(event: &SuggestedEvent, style: SuggestionsStyle) {
    match style {
        SuggestionsStyle::Simple => println!("  {}", event.title),
        SuggestionsStyle::Rich => println!("  {} [{}]", event.title, event.category.label()),
    }
    match &event.location {
        Some(location) => println!("      {}  @ {}", event.time, location),
        None => println!("      {}", event.time),
    }
    if style == SuggestionsStyle::Rich {
        if let Some(desc) = &event.description {
            println!("      {}", desc);
        }
        if let Some(why) = &event.why_interested {
            println!("      Why this might interest you: {}", why);
        }
        if let Some(url) = &event.registration_url {
            println!("      register: {}", url);
        }
    }
}

fn print_message(message: &ChatMessage, assistant: &str) {
    let who = if message.is_user { "You" } else { assistant };
    println!("[{}] {}: {}", message.timestamp, who, message.text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_argument_parses_to_first_day() {
        assert_eq!(
            parse_month("2026-02").expect("valid"),
            NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date")
        );
        assert!(parse_month("Feb 2026").is_err());
    }

    #[test]
    fn months_without_a_full_grid_are_rejected() {
        assert!(parse_month("+262142-12").is_err());
        assert!(parse_month("+262142-11").is_ok());
        assert!(calendar(Some("+262142-12".into()), None).is_err());
    }

    #[test]
    fn cell_markers_prefer_selection() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).expect("valid date");
        let cell = DayCell {
            date,
            is_current_month: true,
            is_today: true,
            is_selected: true,
        };
        assert_eq!(format_cell(&cell), "< 6>");
        let padding = DayCell {
            is_current_month: false,
            is_today: false,
            is_selected: false,
            ..cell
        };
        assert_eq!(format_cell(&padding), "  6.");
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let options = GlobalOptions {
            config: Some(std::env::temp_dir().join("senseplan-no-such-config.yml")),
            tasks_mode: Some(crate::tasks::TasksMode::Delegate),
            suggestions: Some(SuggestionsStyle::Simple),
        };
        let config = resolve_config(&options).expect("defaults");
        assert_eq!(config.tasks_mode, crate::tasks::TasksMode::Delegate);
        assert_eq!(config.suggestions_style, SuggestionsStyle::Simple);
    }
}
