use crate::calendar::WEEKDAY_HEADINGS;
use crate::calls;
use crate::chat::QUICK_ACTION;
use crate::dashboard::Dashboard;
use crate::model::{CallRecord, CallStatus, ChatMessage, EventCategory, Priority, SuggestionCategory};
use crate::suggestions::{self, SuggestionsStyle};
use crate::tasks::{empty_tab_text, TaskError, TasksMode};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

const TICK: Duration = Duration::from_millis(100);

pub fn run(dashboard: Dashboard) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(dashboard, Local::now().date_naive());
    let result = app.event_loop(&mut terminal);
    app.dashboard.teardown();
    teardown_terminal(&mut terminal)?;
    info!("dashboard closed");
    result
}

struct App {
    dashboard: Dashboard,
    focus: Focus,
    status: String,
    today: NaiveDate,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Chat,
    Calendar,
    Suggestions,
    Tasks,
    Calls,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Chat,
        Focus::Calendar,
        Focus::Suggestions,
        Focus::Tasks,
        Focus::Calls,
    ];

    fn next(self) -> Focus {
        let idx = Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Focus::ORDER[(idx + 1) % Focus::ORDER.len()]
    }

    fn prev(self) -> Focus {
        let idx = Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Focus::ORDER[(idx + Focus::ORDER.len() - 1) % Focus::ORDER.len()]
    }

    fn label(&self) -> &'static str {
        match self {
            Focus::Chat => "chat",
            Focus::Calendar => "calendar",
            Focus::Suggestions => "suggestions",
            Focus::Tasks => "tasks",
            Focus::Calls => "calls",
        }
    }
}

impl App {
    fn new(dashboard: Dashboard, today: NaiveDate) -> Self {
        App {
            dashboard,
            focus: Focus::Chat,
            status: "Tab to switch panes, Ctrl+Q to quit".into(),
            today,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
            self.after_input(Instant::now());
        }
        Ok(())
    }

    /// Routes widget events through the dashboard and advances the reply timer.
    fn after_input(&mut self, now: Instant) {
        if let Some(status) = self.dashboard.dispatch(now) {
            self.status = status;
        }
        if self.dashboard.tick(now) {
            self.status = format!("{} replied", self.dashboard.assistant_name);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        if control && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return true;
        }
        if self.dashboard.transcript().is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.dashboard.close_transcript();
            }
            return false;
        }
        if self.dashboard.tasks.add_field().is_some() && self.focus == Focus::Tasks {
            self.handle_task_entry_key(key);
            return false;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return false;
            }
            _ => {}
        }
        match self.focus {
            Focus::Chat => self.handle_chat_key(key),
            Focus::Calendar => self.handle_calendar_key(key),
            Focus::Suggestions => self.handle_suggestions_key(key),
            Focus::Tasks => self.handle_tasks_key(key),
            Focus::Calls => self.handle_calls_key(key),
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let input = &mut self.dashboard.input;
        match key.code {
            KeyCode::Enter => {
                if !input.submit() && input.is_disabled() {
                    self.status = "Waiting for a reply".into();
                }
            }
            KeyCode::Char('y') if control => {
                if !self.dashboard.is_typing() {
                    self.dashboard.input.quick_action();
                }
            }
            KeyCode::Backspace => input.field_mut().backspace(),
            KeyCode::Left => input.field_mut().move_left(),
            KeyCode::Right => input.field_mut().move_right(),
            KeyCode::Esc => input.field_mut().clear(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                input.field_mut().insert_char(c)
            }
            _ => {}
        }
        false
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> bool {
        let calendar = &mut self.dashboard.calendar;
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => calendar.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => calendar.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => calendar.move_cursor(-7),
            KeyCode::Down | KeyCode::Char('j') => calendar.move_cursor(7),
            KeyCode::Char('[') | KeyCode::Char('p') => calendar.prev_month(),
            KeyCode::Char(']') | KeyCode::Char('n') => calendar.next_month(),
            KeyCode::Char('t') => {
                let back = (self.today - calendar.cursor()).num_days();
                calendar.move_cursor(back);
            }
            KeyCode::Enter | KeyCode::Char(' ') => calendar.select_cursor(),
            _ => {}
        }
        false
    }

    fn handle_suggestions_key(&mut self, key: KeyEvent) -> bool {
        let widget = &mut self.dashboard.suggestions;
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => widget.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => widget.select_next(),
            KeyCode::Enter | KeyCode::Char('a') => {
                if !widget.add_to_calendar() {
                    self.status = "Nothing to add".into();
                }
            }
            KeyCode::Char('r') => {
                self.status = match widget.registration_url() {
                    Some(url) => format!("Register at {}", url),
                    None => "No registration link".into(),
                };
            }
            _ => {}
        }
        false
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> bool {
        let widget = &mut self.dashboard.tasks;
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => widget.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => widget.select_next(),
            KeyCode::Char('o') => widget.show_completed(false),
            KeyCode::Char('c') => widget.show_completed(true),
            KeyCode::Char('a') | KeyCode::Char('+') => widget.begin_add(),
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                self.status = match widget.toggle_selected() {
                    Ok(true) => "Task completed".into(),
                    Ok(false) => "Task reopened".into(),
                    Err(TaskError::NoSelection) => "No task selected".into(),
                    Err(err) => format!("Could not toggle: {}", err),
                };
            }
            _ => {}
        }
        false
    }

    fn handle_task_entry_key(&mut self, key: KeyEvent) {
        let widget = &mut self.dashboard.tasks;
        match key.code {
            KeyCode::Esc => {
                widget.cancel_add();
                self.status = "Canceled".into();
            }
            KeyCode::Enter => {
                if widget.add_field().map_or(true, |f| f.is_blank()) {
                    self.status = "Task title is empty".into();
                } else if let Some(id) = widget.submit_add() {
                    self.status = format!("Added task {}", id);
                }
            }
            code => {
                if let Some(field) = widget.add_field_mut() {
                    match code {
                        KeyCode::Backspace => field.backspace(),
                        KeyCode::Left => field.move_left(),
                        KeyCode::Right => field.move_right(),
                        KeyCode::Char(c) => field.insert_char(c),
                        _ => {}
                    }
                }
            }
        }
    }

    fn handle_calls_key(&mut self, key: KeyEvent) -> bool {
        let widget = &mut self.dashboard.calls;
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => widget.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => widget.select_next(),
            KeyCode::Enter | KeyCode::Char('v') => {
                if !widget.view_transcript() {
                    self.status = "No transcript for this call".into();
                }
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(30),
                Constraint::Percentage(25),
            ])
            .split(layout[1]);
        self.draw_chat(f, columns[0]);

        let calendar_height = 12 + self.dashboard.calendar.events().len().max(1) as u16;
        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(calendar_height), Constraint::Min(4)])
            .split(columns[1]);
        self.draw_calendar(f, middle[0]);
        self.draw_suggestions(f, middle[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[2]);
        self.draw_tasks(f, right[0]);
        self.draw_calls(f, right[1]);

        self.draw_footer(f, layout[2]);

        if let Some(call) = self.dashboard.transcript() {
            draw_transcript(f, call);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " SP ",
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("Sense Plan", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  •  "),
            Span::styled(
                self.today.format("%A, %B %-d").to_string(),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  •  "),
            Span::styled(
                match self.dashboard.selected_date() {
                    Some(date) => date.format("selected %b %-d").to_string(),
                    None => "no date selected".into(),
                },
                Style::default().fg(Color::Blue),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("focus {}", self.focus.label()),
                Style::default().fg(Color::Magenta),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(title).block(block), area);
    }

    fn draw_chat(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Chat;
        let block = pane_block(&self.dashboard.assistant_name, focused);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(inner);

        let mut lines = Vec::new();
        for message in self.dashboard.chat.messages() {
            lines.extend(message_lines(message));
        }
        if self.dashboard.is_typing() {
            lines.push(Line::from(vec![
                Span::styled("SP ", Style::default().fg(Color::Cyan)),
                Span::styled(typing_dots(), Style::default().fg(Color::Gray)),
            ]));
        }
        let height = wrapped_height(&lines, rows[0].width);
        let scroll = height.saturating_sub(rows[0].height as usize) as u16;
        let log = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        f.render_widget(log, rows[0]);

        if !self.dashboard.is_typing() {
            let quick = Line::from(vec![
                Span::styled(
                    format!("[ {} ]", QUICK_ACTION),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::styled("  Ctrl+Y", Style::default().fg(Color::DarkGray)),
            ]);
            f.render_widget(
                Paragraph::new(quick).alignment(Alignment::Center),
                rows[1],
            );
        }

        let input = &self.dashboard.input;
        let content = if input.field().value().is_empty() && !focused {
            Span::styled(input.placeholder().to_string(), Style::default().fg(Color::DarkGray))
        } else if input.field().value().is_empty() {
            Span::styled(
                format!("▌{}", input.placeholder()),
                Style::default().fg(Color::DarkGray),
            )
        } else if focused {
            Span::raw(input.field().with_caret())
        } else {
            Span::raw(input.field().value().to_string())
        };
        let border = if input.is_disabled() {
            Color::DarkGray
        } else if focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let field = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(Span::styled("Enter send", Style::default().fg(Color::DarkGray))),
        );
        f.render_widget(field, rows[2]);
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Calendar;
        let calendar = &self.dashboard.calendar;
        let mut lines = Vec::new();
        lines.push(Line::from(
            WEEKDAY_HEADINGS
                .iter()
                .map(|h| Span::styled(format!("{:^4}", h), Style::default().fg(Color::Gray)))
                .collect::<Vec<_>>(),
        ));
        let cells = calendar.cells(self.today);
        if cells.is_none() {
            lines.push(Line::from(Span::styled(
                "Month out of range",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for week in cells.iter().flat_map(|grid| grid.chunks(7)) {
            let spans = week
                .iter()
                .map(|cell| {
                    let mut style = Style::default().fg(if cell.is_current_month {
                        Color::White
                    } else {
                        Color::DarkGray
                    });
                    if cell.is_today {
                        style = style.bg(Color::Rgb(40, 60, 90)).add_modifier(Modifier::BOLD);
                    }
                    if cell.is_selected {
                        style = style.bg(Color::Blue).fg(Color::White);
                    }
                    if focused && cell.date == calendar.cursor() {
                        style = style
                            .bg(Color::Cyan)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD);
                    }
                    Span::styled(format!("{:^4}", cell.date.format("%-d").to_string()), style)
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Today's Schedule",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if calendar.events().is_empty() {
            lines.push(Line::from(Span::styled(
                "No appointments",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for event in calendar.events() {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>6} ", event.time), Style::default().fg(Color::Gray)),
                Span::styled(
                    event.title.clone(),
                    Style::default().fg(event_category_color(event.category)),
                ),
            ]));
        }
        let paragraph =
            Paragraph::new(lines).block(pane_block(&format!("Appointments · {}", calendar.title()), focused));
        f.render_widget(paragraph, area);
    }

    fn draw_suggestions(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Suggestions;
        let widget = &self.dashboard.suggestions;
        let block = pane_block("Suggested Events", focused);
        if widget.events().is_empty() {
            f.render_widget(placeholder(suggestions::EMPTY_TITLE, suggestions::EMPTY_HINT, block), area);
            return;
        }
        let width = area.width.saturating_sub(4) as usize;
        let items = widget
            .events()
            .iter()
            .map(|event| {
                let mut lines = Vec::new();
                let mut title = vec![Span::styled(
                    event.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                if widget.style() == SuggestionsStyle::Rich {
                    title.push(Span::raw(" "));
                    title.push(badge(
                        event.category.label(),
                        suggestion_category_color(event.category),
                    ));
                }
                lines.push(Line::from(title));
                let mut when = format!("  {}", event.time);
                if let Some(location) = &event.location {
                    when.push_str(&format!("  @ {}", location));
                }
                lines.push(Line::from(Span::styled(when, Style::default().fg(Color::Gray))));
                if widget.style() == SuggestionsStyle::Rich {
                    if let Some(desc) = &event.description {
                        lines.push(Line::from(Span::styled(
                            format!("  {}", truncate_text(desc, width)),
                            Style::default().fg(Color::Gray),
                        )));
                    }
                    if let Some(why) = &event.why_interested {
                        lines.push(Line::from(vec![
                            Span::styled("  ★ ", Style::default().fg(Color::Yellow)),
                            Span::styled(
                                truncate_text(why, width.saturating_sub(4)),
                                Style::default().fg(Color::Gray),
                            ),
                        ]));
                    }
                }
                let mut actions = vec![Span::styled(
                    "  [Add to Calendar]",
                    Style::default().fg(Color::LightGreen),
                )];
                if widget.style() == SuggestionsStyle::Rich && event.registration_url.is_some() {
                    actions.push(Span::styled(" [Register]", Style::default().fg(Color::LightBlue)));
                }
                lines.push(Line::from(actions));
                ListItem::new(lines)
            })
            .collect::<Vec<_>>();
        render_list(f, area, items, block, focused, widget.selected());
    }

    fn draw_tasks(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Tasks;
        let widget = &self.dashboard.tasks;
        let block = pane_block("Tasks", focused);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let open = widget.list().list_open().len();
        let closed = widget.list().list_closed().len();
        let tab_style = |active: bool| {
            if active {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            }
        };
        let add_hint = match widget.mode() {
            TasksMode::Inline if widget.add_field().is_some() => "  [x]",
            _ => "  [+]",
        };
        let tabs = Line::from(vec![
            Span::styled(format!(" Open ({}) ", open), tab_style(!widget.showing_completed())),
            Span::raw(" "),
            Span::styled(format!(" Closed ({}) ", closed), tab_style(widget.showing_completed())),
            Span::styled(add_hint, Style::default().fg(Color::LightMagenta)),
        ]);

        let entry_height = if widget.add_field().is_some() { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(entry_height),
                Constraint::Min(1),
            ])
            .split(inner);
        f.render_widget(Paragraph::new(tabs), rows[0]);

        if let Some(field) = widget.add_field() {
            let text = if field.value().is_empty() {
                Span::styled("▌Enter task title...", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(field.with_caret())
            };
            let entry = Paragraph::new(Line::from(text)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightMagenta))
                    .title("Enter add · Esc cancel"),
            );
            f.render_widget(entry, rows[1]);
        }

        let visible = widget.visible();
        if visible.is_empty() {
            let (title, hint) = empty_tab_text(widget.showing_completed());
            f.render_widget(placeholder(title, hint, Block::default()), rows[2]);
            return;
        }
        let width = rows[2].width.saturating_sub(2) as usize;
        let items = visible
            .iter()
            .map(|task| {
                let check = if task.completed { "[x] " } else { "[ ] " };
                let title_style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                let mut lines = vec![Line::from(vec![
                    Span::raw(check),
                    Span::styled(task.title.clone(), title_style),
                    Span::raw(" "),
                    badge(task.priority.label(), priority_color(task.priority)),
                ])];
                if let Some(desc) = &task.description {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", truncate_text(desc, width.saturating_sub(4))),
                        Style::default().fg(Color::Gray),
                    )));
                }
                if let Some(due) = &task.due_date {
                    lines.push(Line::from(Span::styled(
                        format!("    ◷ {}", due),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                ListItem::new(lines)
            })
            .collect::<Vec<_>>();
        render_list(f, rows[2], items, Block::default(), focused, widget.selected());
    }

    fn draw_calls(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Calls;
        let widget = &self.dashboard.calls;
        let block = pane_block("Call History · AI", focused);
        if widget.calls().is_empty() {
            f.render_widget(placeholder(calls::EMPTY_TITLE, calls::EMPTY_HINT, block), area);
            return;
        }
        let items = widget
            .calls()
            .iter()
            .map(|call| {
                let mut title = vec![
                    Span::styled(call.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    badge(call.status.label(), status_color(call.status)),
                ];
                if call.has_viewable_transcript() {
                    title.push(Span::styled(" [View]", Style::default().fg(Color::LightBlue)));
                }
                let mut when = format!("  {} · {} {}", call.contact, call.date, call.time);
                if let Some(duration) = &call.duration {
                    when.push_str(&format!(" · {}", duration));
                }
                ListItem::new(vec![
                    Line::from(title),
                    Line::from(Span::styled(when, Style::default().fg(Color::Gray))),
                ])
            })
            .collect::<Vec<_>>();
        render_list(f, area, items, block, focused, widget.selected());
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(area);
        let help = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help, rows[0]);
        let status = Paragraph::new(Span::styled(
            self.status.clone(),
            Style::default().fg(Color::Gray),
        ));
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
        let mut spans = vec![key("Tab", Color::LightCyan), Span::raw(" pane  ")];
        match self.focus {
            Focus::Chat => spans.extend([
                key("Enter", Color::LightGreen),
                Span::raw(" send  "),
                key("Ctrl+Y", Color::LightGreen),
                Span::raw(" quick reply  "),
                key("Esc", Color::LightYellow),
                Span::raw(" clear  "),
            ]),
            Focus::Calendar => spans.extend([
                key("←↑↓→ / h j k l", Color::LightCyan),
                Span::raw(" move  "),
                key("[ ]", Color::LightCyan),
                Span::raw(" month  "),
                key("t", Color::LightYellow),
                Span::raw(" today  "),
                key("Enter", Color::LightGreen),
                Span::raw(" select  "),
            ]),
            Focus::Suggestions => spans.extend([
                key("↑↓", Color::LightCyan),
                Span::raw(" browse  "),
                key("Enter", Color::LightGreen),
                Span::raw(" add to calendar  "),
                key("r", Color::LightBlue),
                Span::raw(" register  "),
            ]),
            Focus::Tasks => spans.extend([
                key("↑↓", Color::LightCyan),
                Span::raw(" browse  "),
                key("Space", Color::LightGreen),
                Span::raw(" toggle  "),
                key("o/c", Color::LightCyan),
                Span::raw(" open/closed  "),
                key("a", Color::LightMagenta),
                Span::raw(" add  "),
            ]),
            Focus::Calls => spans.extend([
                key("↑↓", Color::LightCyan),
                Span::raw(" browse  "),
                key("Enter", Color::LightBlue),
                Span::raw(" transcript  "),
            ]),
        }
        if self.focus == Focus::Chat {
            spans.extend([key("Ctrl+Q", Color::LightRed), Span::raw(" quit")]);
        } else {
            spans.extend([key("q", Color::LightRed), Span::raw(" quit")]);
        }
        Line::from(spans)
    }
}

fn draw_transcript(f: &mut ratatui::Frame<'_>, call: &CallRecord) {
    let area = centered_rect(60, 40, f.size());
    let mut body = vec![
        Line::from(Span::styled(
            format!("{} · {}", call.contact, call.date),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    body.push(Line::from(
        call.transcript.clone().unwrap_or_else(|| "No transcript".into()),
    ));
    body.push(Line::from(""));
    body.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(Color::DarkGray),
    )));
    let dialog = Paragraph::new(body).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(
                call.title.clone(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue)),
    );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::Gray })
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
}

fn placeholder<'a>(title: &'a str, hint: &'a str, block: Block<'a>) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(block)
}

fn render_list(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    items: Vec<ListItem<'static>>,
    block: Block<'_>,
    focused: bool,
    selected: usize,
) {
    let mut state = ListState::default();
    if focused && !items.is_empty() {
        state.select(Some(selected.min(items.len() - 1)));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(30, 34, 44)))
        .highlight_symbol("› ");
    f.render_stateful_widget(list, area, &mut state);
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    if message.is_user {
        vec![
            Line::from(vec![
                Span::styled(message.text.clone(), Style::default().fg(Color::White)),
                Span::styled(" U", Style::default().fg(Color::LightMagenta)),
            ])
            .alignment(Alignment::Right),
            Line::from(Span::styled(
                message.timestamp.clone(),
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Right),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("SP ", Style::default().fg(Color::Cyan)),
                Span::raw(message.text.clone()),
            ]),
            Line::from(Span::styled(
                format!("   {}", message.timestamp),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

fn typing_dots() -> String {
    let phase = (Local::now().timestamp_subsec_millis() / 250) as usize % 4;
    let mut dots = "• ".repeat(phase.max(1));
    dots.truncate(dots.trim_end().len());
    dots
}

/// Rows a set of lines occupies once wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

fn badge(label: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().bg(color).fg(Color::Black),
    )
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::LightRed,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

fn status_color(status: CallStatus) -> Color {
    match status {
        CallStatus::Scheduled => Color::LightBlue,
        CallStatus::Completed => Color::LightGreen,
        CallStatus::Missed => Color::LightRed,
    }
}

fn suggestion_category_color(category: SuggestionCategory) -> Color {
    match category {
        SuggestionCategory::Conference => Color::LightBlue,
        SuggestionCategory::Workshop => Color::LightMagenta,
        SuggestionCategory::Networking => Color::LightCyan,
        SuggestionCategory::Social => Color::Gray,
    }
}

fn event_category_color(category: EventCategory) -> Color {
    match category {
        EventCategory::Appointment => Color::White,
        EventCategory::Suggestion => Color::LightCyan,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn truncate_text(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out.chars().take(max).collect()
}
