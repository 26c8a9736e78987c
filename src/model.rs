use chrono::NaiveDate;

pub type TaskId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Appointment,
    Suggestion,
}

/// An entry in the calendar's day strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub time: String,
    pub category: EventCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionCategory {
    Conference,
    Workshop,
    Networking,
    Social,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedEvent {
    pub id: String,
    pub title: String,
    pub time: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub why_interested: Option<String>,
    pub registration_url: Option<String>,
    pub category: SuggestionCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    /// Informal label such as "Today" or "Next week", never a real date.
    pub due_date: Option<String>,
    pub priority: Priority,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Scheduled,
    Completed,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallCategory {
    Appointment,
    Reservation,
    Inquiry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub id: String,
    pub title: String,
    pub contact: String,
    pub date: String,
    pub time: String,
    pub duration: Option<String>,
    pub status: CallStatus,
    pub transcript: Option<String>,
    pub category: CallCategory,
}

impl CallRecord {
    /// Transcripts are only offered for calls that actually took place.
    pub fn has_viewable_transcript(&self) -> bool {
        self.transcript.is_some() && self.status == CallStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub is_user: bool,
    pub timestamp: String,
}

/// Outbound events emitted by child widgets and consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    DateSelected(NaiveDate),
    SuggestionSelected(SuggestedEvent),
    CreateTask(String),
    ViewTranscript(CallRecord),
    SendMessage(String),
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl CallStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Scheduled => "scheduled",
            CallStatus::Completed => "completed",
            CallStatus::Missed => "missed",
        }
    }
}

impl SuggestionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionCategory::Conference => "conference",
            SuggestionCategory::Workshop => "workshop",
            SuggestionCategory::Networking => "networking",
            SuggestionCategory::Social => "social",
        }
    }
}

impl EventCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Appointment => "appointment",
            EventCategory::Suggestion => "suggestion",
        }
    }
}
