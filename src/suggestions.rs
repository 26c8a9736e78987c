use crate::model::{DashboardEvent, SuggestedEvent};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use tracing::warn;

pub const EMPTY_TITLE: &str = "No suggestions at the moment";
pub const EMPTY_HINT: &str = "Check back later for personalized recommendations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionsStyle {
    /// Title, time and location only
    Simple,
    /// Category badge, description, interest note and registration link
    #[default]
    Rich,
}

pub struct SuggestedEventsWidget {
    events: Vec<SuggestedEvent>,
    style: SuggestionsStyle,
    selected: usize,
    outbox: Sender<DashboardEvent>,
}

impl SuggestedEventsWidget {
    pub fn new(
        events: Vec<SuggestedEvent>,
        style: SuggestionsStyle,
        outbox: Sender<DashboardEvent>,
    ) -> Self {
        SuggestedEventsWidget {
            events,
            style,
            selected: 0,
            outbox,
        }
    }

    pub fn events(&self) -> &[SuggestedEvent] {
        &self.events
    }

    pub fn style(&self) -> SuggestionsStyle {
        self.style
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&SuggestedEvent> {
        self.events.get(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.events.len() {
            self.selected += 1;
        }
    }

    /// "Add to Calendar": hands the highlighted suggestion to the dashboard.
    pub fn add_to_calendar(&self) -> bool {
        let Some(event) = self.current() else {
            return false;
        };
        if self
            .outbox
            .send(DashboardEvent::SuggestionSelected(event.clone()))
            .is_err()
        {
            warn!("dashboard channel closed; suggestion dropped");
            return false;
        }
        true
    }

    /// Registration links only exist in the rich style.
    pub fn registration_url(&self) -> Option<&str> {
        match self.style {
            SuggestionsStyle::Rich => self.current()?.registration_url.as_deref(),
            SuggestionsStyle::Simple => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use std::sync::mpsc;

    #[test]
    fn add_to_calendar_emits_highlighted_event() {
        let (tx, rx) = mpsc::channel();
        let mut widget =
            SuggestedEventsWidget::new(mock::suggested_events(), SuggestionsStyle::Simple, tx);
        widget.select_next();
        assert!(widget.add_to_calendar());
        match rx.try_recv() {
            Ok(DashboardEvent::SuggestionSelected(event)) => {
                assert_eq!(event.title, "Pick up dry cleaning")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(widget.events().len(), 3);
    }

    #[test]
    fn empty_list_emits_nothing() {
        let (tx, rx) = mpsc::channel();
        let widget = SuggestedEventsWidget::new(Vec::new(), SuggestionsStyle::Rich, tx);
        assert!(!widget.add_to_calendar());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn registration_only_in_rich_style() {
        let (tx, _rx) = mpsc::channel();
        let mut rich =
            SuggestedEventsWidget::new(mock::suggested_events(), SuggestionsStyle::Rich, tx.clone());
        rich.select_next();
        rich.select_next();
        rich.select_next();
        assert_eq!(rich.selected(), 2);
        assert_eq!(rich.registration_url(), Some("https://example.com/meetup"));

        let mut simple =
            SuggestedEventsWidget::new(mock::suggested_events(), SuggestionsStyle::Simple, tx);
        simple.select_next();
        simple.select_next();
        assert_eq!(simple.registration_url(), None);
    }
}
