//! Search, filter and display ordering for task lists.
//!
//! Everything here is pure: inputs are borrowed, outputs are fresh vectors.

use std::str::FromStr;

use crate::error::StoreError;
use crate::types::{CategoryId, Priority, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse().map(PriorityFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(StoreError::validation(
                "status",
                format!("expected all|active|completed, got `{other}`"),
            )),
        }
    }
}

/// The filter bar state: free-text search plus priority and status pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive title search, then priority, then status. An empty
    /// query matches everything.
    pub fn matches(&self, task: &Task) -> bool {
        let query_ok = self.query.is_empty()
            || task
                .title
                .to_lowercase()
                .contains(&self.query.to_lowercase());
        query_ok && self.priority.matches(task) && self.status.matches(task)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.is_empty()
            || self.priority != PriorityFilter::All
            || self.status != StatusFilter::All
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Filters and sorts for display.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut out: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        sort_for_display(&mut out);
        out
    }
}

/// Incomplete tasks first, then ascending `order`. Stable, so equal keys keep
/// their input order.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.completed, task.order));
}

/// Tasks belonging to the selected category, or every task when nothing is
/// selected.
pub fn in_category(
    tasks: &[Task],
    selected: Option<CategoryId>,
) -> impl Iterator<Item = &Task> + '_ {
    tasks
        .iter()
        .filter(move |task| selected.map_or(true, |id| task.category_id == Some(id)))
}

/// The list the user sees: category restriction, filter bar, display order.
pub fn visible_tasks(
    tasks: &[Task],
    selected: Option<CategoryId>,
    filter: &TaskFilter,
) -> Vec<Task> {
    filter.apply(in_category(tasks, selected))
}
