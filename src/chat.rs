use crate::input::FieldValue;
use crate::model::{ChatMessage, DashboardEvent};
use chrono::Local;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const BOOKING_REPLY: &str =
    "I'll call and get that booked for you. Let me check your calendar and find the best time.";
pub const TASK_REPLY: &str =
    "Got it. I've added that to your task list and will remind you before it's due.";
pub const DEFAULT_REPLY: &str =
    "I'll help you with that right away! Let me check your calendar and find the best time.";

pub const QUICK_ACTION: &str = "Sure";

pub const DEFAULT_PLACEHOLDER: &str = "Send a message...";

/// Picks the scripted assistant reply for a user message.
pub fn scripted_reply(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    if lowered.contains("book") || lowered.contains("schedule") {
        BOOKING_REPLY
    } else if lowered.contains("task") {
        TASK_REPLY
    } else {
        DEFAULT_REPLY
    }
}

/// Message text that is known to be non-blank and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(MessageText(trimmed.to_string()))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone)]
struct PendingReply {
    due: Instant,
    text: &'static str,
}

/// The message log plus at most one scheduled assistant reply.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
    reply_delay: Duration,
    pending: Option<PendingReply>,
}

impl ChatSession {
    pub fn new(reply_delay: Duration) -> Self {
        ChatSession {
            messages: Vec::new(),
            next_id: 1,
            reply_delay,
            pending: None,
        }
    }

    pub fn with_greeting(reply_delay: Duration, greeting: &str) -> Self {
        let mut session = ChatSession::new(reply_delay);
        session.push(greeting.to_string(), false);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> TurnState {
        match self.pending {
            Some(_) => TurnState::AwaitingReply,
            None => TurnState::Idle,
        }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Appends the user's message and schedules the reply. Any reply still
    /// pending from an earlier send is cancelled first.
    pub fn send_user_message(&mut self, text: &str, now: Instant) -> Option<u64> {
        let text = MessageText::parse(text)?.into_inner();
        if self.pending.take().is_some() {
            debug!("superseded pending reply cancelled");
        }
        let reply = scripted_reply(&text);
        let id = self.push(text, true);
        self.pending = Some(PendingReply {
            due: now + self.reply_delay,
            text: reply,
        });
        info!(message = id, "user message sent");
        Some(id)
    }

    /// Delivers the pending reply once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<&ChatMessage> {
        let due = self.pending.as_ref().map(|p| p.due)?;
        if now < due {
            return None;
        }
        let reply = self.pending.take()?;
        let id = self.push(reply.text.to_string(), false);
        info!(message = id, "assistant reply delivered");
        self.messages.last()
    }

    /// Time left until the pending reply is due, if any.
    pub fn time_until_reply(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    pub fn teardown(&mut self) {
        if self.pending.take().is_some() {
            info!("pending reply cancelled on teardown");
        }
    }

    fn push(&mut self, text: String, is_user: bool) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            is_user,
            timestamp: Local::now().format("%I:%M %p").to_string(),
        });
        id
    }
}

/// Edit box under the message log.
pub struct ChatInput {
    field: FieldValue,
    placeholder: String,
    disabled: bool,
    outbox: Sender<DashboardEvent>,
}

impl ChatInput {
    pub fn new(placeholder: impl Into<String>, outbox: Sender<DashboardEvent>) -> Self {
        ChatInput {
            field: FieldValue::default(),
            placeholder: placeholder.into(),
            disabled: false,
            outbox,
        }
    }

    pub fn field(&self) -> &FieldValue {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut FieldValue {
        &mut self.field
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Emits the trimmed buffer and clears it. Returns false when nothing
    /// was sent.
    pub fn submit(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        let text = match MessageText::parse(self.field.value()) {
            Some(text) => text.into_inner(),
            None => return false,
        };
        self.field.clear();
        self.emit(text)
    }

    pub fn quick_action(&self) -> bool {
        self.emit(QUICK_ACTION.to_string())
    }

    fn emit(&self, text: String) -> bool {
        if self.outbox.send(DashboardEvent::SendMessage(text)).is_err() {
            warn!("dashboard channel closed; message dropped");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const DELAY: Duration = Duration::from_millis(1500);

    fn texts(session: &ChatSession) -> Vec<(bool, &str)> {
        session
            .messages()
            .iter()
            .map(|m| (m.is_user, m.text.as_str()))
            .collect()
    }

    #[test]
    fn reply_precedence() {
        assert_eq!(scripted_reply("please book the dentist"), BOOKING_REPLY);
        assert_eq!(scripted_reply("SCHEDULE a task"), BOOKING_REPLY);
        assert_eq!(scripted_reply("add a task"), TASK_REPLY);
        assert_eq!(scripted_reply("hello"), DEFAULT_REPLY);
    }

    #[test]
    fn reply_arrives_only_after_delay() {
        let start = Instant::now();
        let mut session = ChatSession::new(DELAY);
        assert!(session.send_user_message("book car service", start).is_some());
        assert_eq!(texts(&session), vec![(true, "book car service")]);
        assert_eq!(session.state(), TurnState::AwaitingReply);

        assert!(session.poll(start + Duration::from_millis(1499)).is_none());
        assert_eq!(session.messages().len(), 1);

        let reply = session.poll(start + DELAY).cloned().expect("reply due");
        assert_eq!(reply.text, BOOKING_REPLY);
        assert!(!reply.is_user);
        assert_eq!(
            texts(&session),
            vec![(true, "book car service"), (false, BOOKING_REPLY)]
        );
        assert_eq!(session.state(), TurnState::Idle);
        assert!(session.poll(start + DELAY * 2).is_none());
    }

    #[test]
    fn blank_messages_are_ignored() {
        let mut session = ChatSession::new(DELAY);
        assert!(session.send_user_message("", Instant::now()).is_none());
        assert!(session.send_user_message("  \t", Instant::now()).is_none());
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), TurnState::Idle);
    }

    #[test]
    fn newer_send_supersedes_pending_reply() {
        let start = Instant::now();
        let mut session = ChatSession::new(DELAY);
        session.send_user_message("add a task", start);
        session.send_user_message("hello", start + Duration::from_millis(500));

        assert!(session.poll(start + DELAY).is_none());
        session.poll(start + Duration::from_millis(2000));
        assert_eq!(
            texts(&session),
            vec![(true, "add a task"), (true, "hello"), (false, DEFAULT_REPLY)]
        );
    }

    #[test]
    fn teardown_cancels_pending_reply() {
        let start = Instant::now();
        let mut session = ChatSession::with_greeting(DELAY, "hi there");
        session.send_user_message("schedule lunch", start);
        session.teardown();
        assert_eq!(session.state(), TurnState::Idle);
        assert!(session.poll(start + DELAY * 10).is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn message_ids_increase() {
        let start = Instant::now();
        let mut session = ChatSession::with_greeting(DELAY, "hi");
        session.send_user_message("one", start);
        session.poll(start + DELAY);
        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn input_submits_trimmed_text_and_clears() {
        let (tx, rx) = mpsc::channel();
        let mut input = ChatInput::new(DEFAULT_PLACEHOLDER, tx);
        for ch in "  hi  ".chars() {
            input.field_mut().insert_char(ch);
        }
        assert!(input.submit());
        assert!(input.field().value().is_empty());
        assert_eq!(rx.try_recv().ok(), Some(DashboardEvent::SendMessage("hi".into())));
    }

    #[test]
    fn disabled_or_blank_input_sends_nothing() {
        let (tx, rx) = mpsc::channel();
        let mut input = ChatInput::new(DEFAULT_PLACEHOLDER, tx);
        assert!(!input.submit());
        input.field_mut().insert_char('x');
        input.set_disabled(true);
        assert!(!input.submit());
        assert_eq!(input.field().value(), "x");
        assert!(rx.try_recv().is_err());
    }
}
