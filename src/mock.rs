use crate::model::{
    CallCategory, CallRecord, CallStatus, Event, EventCategory, Priority, SuggestedEvent,
    SuggestionCategory, Task,
};

pub const GREETING: &str =
    "I can call businesses in your schedule. Would you like me to book the car service appointment?";

pub fn events() -> Vec<Event> {
    vec![
        Event {
            id: "1".into(),
            title: "Car Service".into(),
            time: "9:00".into(),
            category: EventCategory::Appointment,
        },
        Event {
            id: "2".into(),
            title: "Interview".into(),
            time: "11:00".into(),
            category: EventCategory::Appointment,
        },
    ]
}

pub fn suggested_events() -> Vec<SuggestedEvent> {
    vec![
        SuggestedEvent {
            id: "1".into(),
            title: "Lunch".into(),
            time: "12:00 PM-1 PM".into(),
            location: Some("Downtown".into()),
            description: None,
            why_interested: None,
            registration_url: None,
            category: SuggestionCategory::Social,
        },
        SuggestedEvent {
            id: "2".into(),
            title: "Pick up dry cleaning".into(),
            time: "4:30-5:00 PM".into(),
            location: Some("Main Street".into()),
            description: None,
            why_interested: None,
            registration_url: None,
            category: SuggestionCategory::Social,
        },
        SuggestedEvent {
            id: "3".into(),
            title: "Product Leaders Meetup".into(),
            time: "Thu 6:00 PM".into(),
            location: Some("Innovation Hub".into()),
            description: Some("Evening talks and open networking for product people.".into()),
            why_interested: Some("You have been working on networking this month.".into()),
            registration_url: Some("https://example.com/meetup".into()),
            category: SuggestionCategory::Networking,
        },
    ]
}

pub fn tasks() -> Vec<Task> {
    vec![
        task(
            "1",
            "Schedule dentist appointment",
            "Need to book cleaning appointment",
            Some("Tomorrow"),
            Priority::High,
            true,
        ),
        task(
            "2",
            "Complete project presentation",
            "Finish slides for quarterly review",
            Some("This week"),
            Priority::High,
            true,
        ),
        task(
            "3",
            "Getting better at networking",
            "Improve professional networking skills",
            Some("Next month"),
            Priority::Medium,
            false,
        ),
        task(
            "4",
            "Learn new programming language",
            "Expand technical skills",
            None,
            Priority::Low,
            false,
        ),
        task(
            "5",
            "Book flight to NYC",
            "For business trip next month",
            Some("Today"),
            Priority::High,
            false,
        ),
    ]
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    due: Option<&str>,
    priority: Priority,
    completed: bool,
) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: Some(description.into()),
        due_date: due.map(String::from),
        priority,
        completed,
    }
}

pub fn calls() -> Vec<CallRecord> {
    vec![
        CallRecord {
            id: "1".into(),
            title: "Appointment in Jit".into(),
            contact: "AI aut".into(),
            date: "Yesterday".into(),
            time: "10:18 AM".into(),
            duration: Some("3m 42s".into()),
            status: CallStatus::Completed,
            transcript: Some(
                "Called to confirm appointment booking for tomorrow at 2 PM...".into(),
            ),
            category: CallCategory::Appointment,
        },
        CallRecord {
            id: "2".into(),
            title: "Reservation at Trattolla".into(),
            contact: "Restaurant Host".into(),
            date: "Apr 15".into(),
            time: "1:00 PM".into(),
            duration: Some("2m 15s".into()),
            status: CallStatus::Completed,
            transcript: Some("Booked table for 4 people on April 20th at 7:30 PM...".into()),
            category: CallCategory::Reservation,
        },
        CallRecord {
            id: "3".into(),
            title: "Haircut Downtown Barbers".into(),
            contact: "Sarah - Stylist".into(),
            date: "Apr 9".into(),
            time: "1:00 AM".into(),
            duration: Some("1m 58s".into()),
            status: CallStatus::Completed,
            transcript: Some("Scheduled haircut appointment for April 12th at 3 PM...".into()),
            category: CallCategory::Appointment,
        },
        CallRecord {
            id: "4".into(),
            title: "Dentist Follow-up".into(),
            contact: "Dr. Smith Office".into(),
            date: "Tomorrow".into(),
            time: "2:00 PM".into(),
            duration: None,
            status: CallStatus::Scheduled,
            transcript: None,
            category: CallCategory::Appointment,
        },
    ]
}
