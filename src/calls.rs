use crate::model::{CallRecord, DashboardEvent};
use std::sync::mpsc::Sender;
use tracing::warn;

pub const EMPTY_TITLE: &str = "No call history";
pub const EMPTY_HINT: &str = "AI will make calls on your behalf";

pub struct CallHistoryWidget {
    calls: Vec<CallRecord>,
    selected: usize,
    outbox: Sender<DashboardEvent>,
}

impl CallHistoryWidget {
    pub fn new(calls: Vec<CallRecord>, outbox: Sender<DashboardEvent>) -> Self {
        CallHistoryWidget {
            calls,
            selected: 0,
            outbox,
        }
    }

    pub fn calls(&self) -> &[CallRecord] {
        &self.calls
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.calls.len() {
            self.selected += 1;
        }
    }

    /// Emits `ViewTranscript` for the highlighted call when one is viewable.
    pub fn view_transcript(&self) -> bool {
        let Some(call) = self.calls.get(self.selected) else {
            return false;
        };
        if !call.has_viewable_transcript() {
            return false;
        }
        if self
            .outbox
            .send(DashboardEvent::ViewTranscript(call.clone()))
            .is_err()
        {
            warn!("dashboard channel closed; transcript request dropped");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use std::sync::mpsc;

    #[test]
    fn completed_call_with_transcript_is_viewable() {
        let (tx, rx) = mpsc::channel();
        let widget = CallHistoryWidget::new(mock::calls(), tx);
        assert!(widget.view_transcript());
        match rx.try_recv() {
            Ok(DashboardEvent::ViewTranscript(call)) => assert_eq!(call.id, "1"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn scheduled_call_has_nothing_to_view() {
        let (tx, rx) = mpsc::channel();
        let mut widget = CallHistoryWidget::new(mock::calls(), tx);
        for _ in 0..10 {
            widget.select_next();
        }
        assert_eq!(widget.selected(), 3);
        assert!(!widget.view_transcript());
        assert!(rx.try_recv().is_err());
    }
}
