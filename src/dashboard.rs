use crate::calendar::CalendarView;
use crate::calls::CallHistoryWidget;
use crate::chat::{ChatInput, ChatSession, TurnState};
use crate::config::DashboardConfig;
use crate::mock;
use crate::model::{CallRecord, DashboardEvent};
use crate::suggestions::SuggestedEventsWidget;
use crate::tasks::{TaskList, TasksWidget};
use chrono::NaiveDate;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;
use tracing::{debug, info};

/// Page-level coordinator. Owns the message log and every child widget, and
/// is the only subscriber to their outbound events.
pub struct Dashboard {
    pub chat: ChatSession,
    pub input: ChatInput,
    pub calendar: CalendarView,
    pub suggestions: SuggestedEventsWidget,
    pub tasks: TasksWidget,
    pub calls: CallHistoryWidget,
    pub assistant_name: String,
    selected_date: Option<NaiveDate>,
    transcript: Option<CallRecord>,
    events: Receiver<DashboardEvent>,
}

impl Dashboard {
    /// Builds the page over the bundled mock data.
    pub fn new(config: &DashboardConfig, today: NaiveDate) -> Self {
        let (tx, rx) = mpsc::channel();
        Dashboard {
            chat: ChatSession::with_greeting(config.reply_delay(), mock::GREETING),
            input: ChatInput::new(config.input_placeholder.clone(), tx.clone()),
            calendar: CalendarView::new(today, Some(today), mock::events(), tx.clone()),
            suggestions: SuggestedEventsWidget::new(
                mock::suggested_events(),
                config.suggestions_style,
                tx.clone(),
            ),
            tasks: TasksWidget::new(TaskList::new(mock::tasks()), config.tasks_mode, tx.clone()),
            calls: CallHistoryWidget::new(mock::calls(), tx),
            assistant_name: config.assistant_name.clone(),
            selected_date: Some(today),
            transcript: None,
            events: rx,
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn transcript(&self) -> Option<&CallRecord> {
        self.transcript.as_ref()
    }

    pub fn close_transcript(&mut self) {
        self.transcript = None;
    }

    pub fn is_typing(&self) -> bool {
        self.chat.state() == TurnState::AwaitingReply
    }

    /// Drains pending widget events and applies their downstream effects.
    /// Returns a one-line summary of the last handled event for the status bar.
    pub fn dispatch(&mut self, now: Instant) -> Option<String> {
        let mut status = None;
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "dispatching dashboard event");
            status = Some(self.apply(event, now));
        }
        status
    }

    fn apply(&mut self, event: DashboardEvent, now: Instant) -> String {
        match event {
            DashboardEvent::SendMessage(text) | DashboardEvent::CreateTask(text) => {
                self.send(&text, now);
                "Message sent".into()
            }
            DashboardEvent::SuggestionSelected(suggestion) => {
                let text = format!(
                    "Add {} to my calendar for {}",
                    suggestion.title, suggestion.time
                );
                self.send(&text, now);
                format!("Asked to add {}", suggestion.title)
            }
            DashboardEvent::DateSelected(date) => {
                self.selected_date = Some(date);
                self.calendar.set_selected(Some(date));
                info!(%date, "date selected");
                format!("Selected {}", date.format("%A, %B %-d %Y"))
            }
            DashboardEvent::ViewTranscript(call) => {
                let status = format!("Transcript for {}", call.title);
                self.transcript = Some(call);
                status
            }
        }
    }

    fn send(&mut self, text: &str, now: Instant) {
        self.chat.send_user_message(text, now);
        self.input.set_disabled(self.is_typing());
    }

    /// Advances the reply timer; re-enables the input once the reply lands.
    pub fn tick(&mut self, now: Instant) -> bool {
        let delivered = self.chat.poll(now).is_some();
        self.input.set_disabled(self.is_typing());
        delivered
    }

    pub fn teardown(&mut self) {
        self.chat.teardown();
        self.input.set_disabled(false);
    }
}
