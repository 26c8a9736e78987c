use crate::model::{DashboardEvent, Event};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADINGS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Builds the 6x7 grid for the month containing `anchor`. The first cell is
/// the Sunday on or before the 1st of that month.
///
/// Returns `None` for the few months at the edges of chrono's date range
/// whose padding days cannot be represented.
pub fn month_grid(
    anchor: NaiveDate,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Option<[DayCell; GRID_CELLS]> {
    let first = first_of_month(anchor);
    let lead = first.weekday().num_days_from_sunday() as i64;
    let start = first.checked_sub_signed(Duration::days(lead))?;
    let days: [NaiveDate; GRID_CELLS] = start
        .iter_days()
        .take(GRID_CELLS)
        .collect::<Vec<_>>()
        .try_into()
        .ok()?;
    Some(days.map(|date| DayCell {
        date,
        is_current_month: date.month() == first.month() && date.year() == first.year(),
        is_today: date == today,
        is_selected: selected == Some(date),
    }))
}

/// Whether the month containing `date` can be laid out as a full grid.
pub fn has_month_grid(date: NaiveDate) -> bool {
    month_grid(date, date, None).is_some()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// Calendar widget state: the displayed month, a keyboard cursor, and the
/// selection last handed back by the dashboard.
pub struct CalendarView {
    displayed: NaiveDate,
    cursor: NaiveDate,
    selected: Option<NaiveDate>,
    events: Vec<Event>,
    outbox: Sender<DashboardEvent>,
}

impl CalendarView {
    pub fn new(
        today: NaiveDate,
        selected: Option<NaiveDate>,
        events: Vec<Event>,
        outbox: Sender<DashboardEvent>,
    ) -> Self {
        CalendarView {
            displayed: first_of_month(today),
            cursor: today,
            selected,
            events,
            outbox,
        }
    }

    #[cfg(test)]
    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn title(&self) -> String {
        month_title(self.displayed)
    }

    pub fn cells(&self, today: NaiveDate) -> Option<[DayCell; GRID_CELLS]> {
        month_grid(self.displayed, today, self.selected)
    }

    /// Re-supplied by the owner after it handles a `DateSelected` event.
    pub fn set_selected(&mut self, selected: Option<NaiveDate>) {
        self.selected = selected;
    }

    pub fn prev_month(&mut self) {
        self.shift_months(-1);
    }

    pub fn next_month(&mut self) {
        self.shift_months(1);
    }

    fn shift_months(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta < 0 {
            self.cursor.checked_sub_months(months)
        } else {
            self.cursor.checked_add_months(months)
        };
        if let Some(cursor) = shifted.filter(|c| has_month_grid(*c)) {
            self.cursor = cursor;
            self.displayed = first_of_month(cursor);
            debug!(month = %self.title(), "calendar navigated");
        }
    }

    /// Moves the cursor by whole days; the displayed month follows it.
    pub fn move_cursor(&mut self, days: i64) {
        let next = self
            .cursor
            .checked_add_signed(Duration::days(days))
            .filter(|d| has_month_grid(*d));
        if let Some(next) = next {
            self.cursor = next;
            self.displayed = first_of_month(next);
        }
    }

    pub fn select_cursor(&self) {
        self.select(self.cursor);
    }

    pub fn select(&self, date: NaiveDate) {
        if self.outbox.send(DashboardEvent::DateSelected(date)).is_err() {
            warn!(%date, "dashboard channel closed; selection dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::mpsc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn october_2026_starts_on_preceding_sunday() {
        let grid = month_grid(date(2026, 10, 16), date(2026, 10, 16), None).expect("grid");
        // Oct 1 2026 is a Thursday.
        assert_eq!(grid[0].date, date(2026, 9, 27));
        assert!(!grid[0].is_current_month);
        assert_eq!(grid[4].date, date(2026, 10, 1));
        assert!(grid[4].is_current_month);
        assert_eq!(grid[41].date, date(2026, 11, 7));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        let grid = month_grid(date(2026, 2, 10), date(2000, 1, 1), None).expect("grid");
        assert_eq!(grid[0].date, date(2026, 2, 1));
        assert!(grid.iter().all(|c| !c.is_today));
    }

    #[test]
    fn selected_flag_only_on_supplied_date() {
        let picked = date(2026, 10, 20);
        let grid = month_grid(date(2026, 10, 1), date(2026, 10, 16), Some(picked)).expect("grid");
        let selected: Vec<_> = grid.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, picked);
    }

    #[test]
    fn title_uses_fixed_month_names() {
        assert_eq!(month_title(date(2026, 12, 3)), "December 2026");
    }

    #[test]
    fn navigation_crosses_year_boundaries() {
        let (tx, _rx) = mpsc::channel();
        let mut view = CalendarView::new(date(2026, 12, 31), None, Vec::new(), tx);
        view.next_month();
        assert_eq!(view.displayed_month(), date(2027, 1, 1));
        view.prev_month();
        view.prev_month();
        assert_eq!(view.displayed_month(), date(2026, 11, 1));
    }

    #[test]
    fn cursor_drags_displayed_month() {
        let (tx, _rx) = mpsc::channel();
        let mut view = CalendarView::new(date(2026, 10, 30), None, Vec::new(), tx);
        view.move_cursor(7);
        assert_eq!(view.cursor(), date(2026, 11, 6));
        assert_eq!(view.displayed_month(), date(2026, 11, 1));
    }

    #[test]
    fn selecting_emits_event_without_tracking_selection() {
        let (tx, rx) = mpsc::channel();
        let view = CalendarView::new(date(2026, 10, 16), None, Vec::new(), tx);
        view.select_cursor();
        assert_eq!(
            rx.try_recv().ok(),
            Some(DashboardEvent::DateSelected(date(2026, 10, 16)))
        );
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn months_at_the_edges_of_the_date_range_have_no_grid() {
        assert!(month_grid(NaiveDate::MAX, NaiveDate::MAX, None).is_none());
        assert!(month_grid(NaiveDate::MIN, NaiveDate::MIN, None).is_none());
        // One month in from each edge the grid fits again.
        let inner_max = first_of_month(NaiveDate::MAX)
            .checked_sub_months(Months::new(1))
            .expect("month before max");
        assert!(month_grid(inner_max, inner_max, None).is_some());
        let inner_min = first_of_month(NaiveDate::MIN)
            .checked_add_months(Months::new(1))
            .expect("month after min");
        assert!(month_grid(inner_min, inner_min, None).is_some());
    }

    #[test]
    fn navigation_stops_before_unrepresentable_months() {
        let (tx, _rx) = mpsc::channel();
        let near_end = first_of_month(NaiveDate::MAX)
            .checked_sub_months(Months::new(1))
            .expect("month before max");
        let mut view = CalendarView::new(near_end, None, Vec::new(), tx);
        view.next_month();
        assert_eq!(view.displayed_month(), near_end);
        view.move_cursor(62);
        assert_eq!(view.displayed_month(), near_end);
        assert!(view.cells(near_end).is_some());
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1900i32..2200, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
    }

    proptest! {
        #[test]
        fn grid_is_42_consecutive_days_covering_the_month(anchor in any_date()) {
            let grid = month_grid(anchor, anchor, None).expect("grid");
            prop_assert_eq!(grid.len(), GRID_CELLS);
            prop_assert_eq!(grid[0].date.weekday().num_days_from_sunday(), 0);
            for pair in grid.windows(2) {
                prop_assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
            }
            let first = first_of_month(anchor);
            prop_assert!(grid.iter().any(|c| c.date == first && c.is_current_month));
            let in_month = grid.iter().filter(|c| c.is_current_month).count() as u32;
            let days = first
                .checked_add_months(Months::new(1))
                .map(|next| (next - first).num_days() as u32)
                .unwrap_or(0);
            prop_assert_eq!(in_month, days);
        }

        #[test]
        fn today_flag_set_on_at_most_one_cell(anchor in any_date(), today in any_date()) {
            let grid = month_grid(anchor, today, None).expect("grid");
            let flagged = grid.iter().filter(|c| c.is_today).count();
            let spans = grid[0].date <= today && today <= grid[GRID_CELLS - 1].date;
            prop_assert_eq!(flagged, usize::from(spans));
        }

        #[test]
        fn next_then_prev_restores_month(anchor in any_date()) {
            let (tx, _rx) = mpsc::channel();
            let mut view = CalendarView::new(anchor, None, Vec::new(), tx);
            let before = view.displayed_month();
            view.next_month();
            view.prev_month();
            prop_assert_eq!(view.displayed_month(), before);
        }
    }
}
