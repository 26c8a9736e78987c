use crate::input::FieldValue;
use crate::model::{DashboardEvent, Priority, Task, TaskId};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use tracing::{info, warn};

/// Request forwarded to the chat when the widget delegates task creation.
pub const DELEGATED_CREATE_REQUEST: &str = "Help me create a new task";

const NO_DUE_RANK: u8 = 5;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("no task selected")]
    NoSelection,
}

/// A task title that is known to be non-blank and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(TaskTitle(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Urgency rank of a symbolic due label; lower sorts first.
pub fn due_rank(label: Option<&str>) -> u8 {
    match label {
        Some("Today") => 0,
        Some("Tomorrow") => 1,
        Some("This week") => 2,
        Some("Next week") => 3,
        Some("Next month") => 4,
        _ => NO_DUE_RANK,
    }
}

/// Placeholder title and hint for an empty open or closed tab.
pub fn empty_tab_text(closed: bool) -> (&'static str, &'static str) {
    if closed {
        ("No completed tasks", "Complete some tasks to see them here")
    } else {
        ("No open tasks", "Add a task to get started")
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }

    #[cfg(test)]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn toggle_completion(&mut self, id: &str) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        info!(task = %task.id, completed = task.completed, "task toggled");
        Ok(task.completed)
    }

    /// Appends a new open task; blank titles are declined with `None`.
    pub fn add_task(&mut self, title: &str) -> Option<TaskId> {
        let title = TaskTitle::parse(title)?;
        let id = self.fresh_id();
        self.tasks.push(Task {
            id: id.clone(),
            title: title.as_str().to_string(),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            completed: false,
        });
        info!(task = %id, "task added");
        Some(id)
    }

    pub fn list_open(&self) -> Vec<&Task> {
        self.partition(false)
    }

    pub fn list_closed(&self) -> Vec<&Task> {
        self.partition(true)
    }

    fn partition(&self, completed: bool) -> Vec<&Task> {
        let mut subset: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.completed == completed)
            .collect();
        // sort_by_key is stable, so equal ranks keep insertion order
        subset.sort_by_key(|t| due_rank(t.due_date.as_deref()));
        subset
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = generate_id();
            if !self.tasks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }
}

fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TasksMode {
    /// Open an inline entry field and append locally
    #[default]
    Inline,
    /// Forward a creation request to the chat
    Delegate,
}

/// Task list widget: owns its mock collection and the open/closed tab.
pub struct TasksWidget {
    list: TaskList,
    mode: TasksMode,
    show_completed: bool,
    selected: usize,
    adding: Option<FieldValue>,
    outbox: Sender<DashboardEvent>,
}

impl TasksWidget {
    pub fn new(list: TaskList, mode: TasksMode, outbox: Sender<DashboardEvent>) -> Self {
        TasksWidget {
            list,
            mode,
            show_completed: false,
            selected: 0,
            adding: None,
            outbox,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn mode(&self) -> TasksMode {
        self.mode
    }

    pub fn showing_completed(&self) -> bool {
        self.show_completed
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn add_field(&self) -> Option<&FieldValue> {
        self.adding.as_ref()
    }

    pub fn add_field_mut(&mut self) -> Option<&mut FieldValue> {
        self.adding.as_mut()
    }

    pub fn visible(&self) -> Vec<&Task> {
        if self.show_completed {
            self.list.list_closed()
        } else {
            self.list.list_open()
        }
    }

    pub fn show_completed(&mut self, show: bool) {
        self.show_completed = show;
        self.selected = 0;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn toggle_selected(&mut self) -> Result<bool, TaskError> {
        let id = match self.visible().get(self.selected) {
            Some(task) => task.id.clone(),
            None => return Err(TaskError::NoSelection),
        };
        let completed = self.list.toggle_completion(&id)?;
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        Ok(completed)
    }

    /// The "add" affordance; behaviour depends on the configured mode.
    pub fn begin_add(&mut self) {
        match self.mode {
            TasksMode::Inline => {
                self.adding = match self.adding {
                    Some(_) => None,
                    None => Some(FieldValue::default()),
                };
            }
            TasksMode::Delegate => {
                let request = DELEGATED_CREATE_REQUEST.to_string();
                if self.outbox.send(DashboardEvent::CreateTask(request)).is_err() {
                    warn!("dashboard channel closed; create request dropped");
                }
            }
        }
    }

    pub fn cancel_add(&mut self) {
        self.adding = None;
    }

    /// Commits the inline field. A blank field stays open and nothing is added.
    pub fn submit_add(&mut self) -> Option<TaskId> {
        let field = self.adding.as_ref()?;
        let id = self.list.add_task(field.value())?;
        self.adding = None;
        self.show_completed(false);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use proptest::prelude::*;
    use std::sync::mpsc;

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn mock_tasks_order_by_due_rank() {
        let list = TaskList::new(mock::tasks());
        assert_eq!(
            titles(&list.list_open()),
            vec![
                "Book flight to NYC",
                "Getting better at networking",
                "Learn new programming language",
            ]
        );
        assert_eq!(
            titles(&list.list_closed()),
            vec!["Schedule dentist appointment", "Complete project presentation"]
        );
    }

    #[test]
    fn unknown_labels_rank_with_missing_ones() {
        assert_eq!(due_rank(None), due_rank(Some("Someday")));
        assert_eq!(due_rank(Some("Today")), 0);
        assert_eq!(due_rank(Some("Next month")), 4);
    }

    #[test]
    fn blank_titles_are_declined() {
        let mut list = TaskList::new(mock::tasks());
        assert_eq!(list.add_task(""), None);
        assert_eq!(list.add_task("   "), None);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn add_task_appends_open_medium_task() {
        let mut list = TaskList::new(mock::tasks());
        let id = list.add_task("  Buy milk ").expect("task added");
        assert_eq!(list.len(), 6);
        let added = list.all().last().expect("last task");
        assert_eq!(added.id, id);
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.priority, Priority::Medium);
        assert!(!added.completed);
        assert!(mock::tasks().iter().all(|t| t.id != id));
    }

    #[test]
    fn toggle_moves_between_partitions() {
        let mut list = TaskList::new(mock::tasks());
        assert_eq!(list.toggle_completion("5"), Ok(true));
        assert!(list.list_closed().iter().any(|t| t.id == "5"));
        assert_eq!(list.toggle_completion("5"), Ok(false));
        assert!(list.list_open().iter().any(|t| t.id == "5"));
    }

    #[test]
    fn toggle_unknown_id_reports_not_found() {
        let mut list = TaskList::new(mock::tasks());
        let before = list.all().to_vec();
        assert_eq!(
            list.toggle_completion("nope"),
            Err(TaskError::NotFound("nope".into()))
        );
        assert_eq!(list.all(), before.as_slice());
    }

    #[test]
    fn inline_mode_adds_locally() {
        let (tx, rx) = mpsc::channel();
        let mut widget = TasksWidget::new(TaskList::new(mock::tasks()), TasksMode::Inline, tx);
        widget.begin_add();
        assert!(widget.submit_add().is_none());
        assert!(widget.add_field().is_some());
        for ch in "Call mom".chars() {
            widget.add_field_mut().expect("field open").insert_char(ch);
        }
        assert!(widget.submit_add().is_some());
        assert!(widget.add_field().is_none());
        assert_eq!(widget.list().len(), 6);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn delegate_mode_forwards_request() {
        let (tx, rx) = mpsc::channel();
        let mut widget = TasksWidget::new(TaskList::new(mock::tasks()), TasksMode::Delegate, tx);
        widget.begin_add();
        assert!(widget.add_field().is_none());
        assert_eq!(
            rx.try_recv().ok(),
            Some(DashboardEvent::CreateTask(DELEGATED_CREATE_REQUEST.into()))
        );
        assert_eq!(widget.list().len(), 5);
    }

    #[test]
    fn toggling_last_visible_row_clamps_selection() {
        let (tx, _rx) = mpsc::channel();
        let mut widget = TasksWidget::new(TaskList::new(mock::tasks()), TasksMode::Inline, tx);
        widget.select_next();
        widget.select_next();
        assert_eq!(widget.selected(), 2);
        assert_eq!(widget.toggle_selected(), Ok(true));
        assert_eq!(widget.selected(), 1);
    }

    #[test]
    fn toggling_an_empty_tab_reports_no_selection() {
        let (tx, _rx) = mpsc::channel();
        let mut widget = TasksWidget::new(TaskList::default(), TasksMode::Inline, tx);
        assert_eq!(widget.toggle_selected(), Err(TaskError::NoSelection));
        widget.show_completed(true);
        assert_eq!(widget.toggle_selected(), Err(TaskError::NoSelection));
    }

    #[test]
    fn empty_tabs_carry_a_hint() {
        assert_eq!(
            empty_tab_text(false),
            ("No open tasks", "Add a task to get started")
        );
        assert_eq!(
            empty_tab_text(true),
            ("No completed tasks", "Complete some tasks to see them here")
        );
    }

    const LABELS: [Option<&str>; 7] = [
        Some("Today"),
        Some("Tomorrow"),
        Some("This week"),
        Some("Next week"),
        Some("Next month"),
        Some("Later"),
        None,
    ];

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((0usize..LABELS.len(), any::<bool>()), 0..24).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(idx, (label, completed))| Task {
                    id: idx.to_string(),
                    title: format!("task {}", idx),
                    description: None,
                    due_date: LABELS[label].map(String::from),
                    priority: Priority::Low,
                    completed,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn partitions_cover_all_tasks_in_stable_rank_order(tasks in arb_tasks()) {
            let list = TaskList::new(tasks.clone());
            let open = list.list_open();
            let closed = list.list_closed();
            prop_assert_eq!(open.len() + closed.len(), tasks.len());
            let mut ids: Vec<usize> = open
                .iter()
                .chain(closed.iter())
                .map(|t| t.id.parse().unwrap())
                .collect();
            ids.sort_unstable();
            prop_assert_eq!(ids, (0..tasks.len()).collect::<Vec<_>>());
            for part in [&open, &closed] {
                for pair in part.windows(2) {
                    let a = (due_rank(pair[0].due_date.as_deref()), pair[0].id.parse::<usize>().unwrap());
                    let b = (due_rank(pair[1].due_date.as_deref()), pair[1].id.parse::<usize>().unwrap());
                    prop_assert!(a < b);
                }
            }
            prop_assert!(open.iter().all(|t| !t.completed));
            prop_assert!(closed.iter().all(|t| t.completed));
        }
    }
}
