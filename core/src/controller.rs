//! Application controller: owns the view state and mediates every mutation.
//!
//! # Design
//! `TaskManager` holds the collections it last received from the services
//! plus the UI selection and filter state. Mutations go to the services
//! first; the authoritative result is merged into local state on success.
//!
//! Two layers of mutation are offered:
//! - `add_*`, `update_task`, `delete_task`, `reorder_task` forward to a
//!   service and merge the result. Update and delete failures are returned
//!   to the caller after a notice is emitted.
//! - `toggle_complete`, `edit_task`, `remove_task` are optimistic: the
//!   change is staged locally first, and rolled back to the confirmed
//!   snapshot if the service rejects it.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::filter::{visible_tasks, PriorityFilter, StatusFilter, TaskFilter};
use crate::labels::CategoryHeader;
use crate::notify::{Notice, Notifier};
use crate::optimistic::Optimistic;
use crate::service::{CategoryService, TaskService};
use crate::stats::{CategoryCounts, TaskStats, WeekStart};
use crate::types::{Category, CategoryId, NewCategory, NewTask, Task, TaskId, TaskPatch};

/// Where the initial load stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The load failed; the message is shown next to a retry action.
    Failed(String),
}

pub struct TaskManager<T, C> {
    tasks_api: T,
    categories_api: C,
    notifier: Arc<dyn Notifier>,
    state: LoadState,
    tasks: Optimistic<Vec<Task>>,
    categories: Vec<Category>,
    selected_category: Option<CategoryId>,
    filter: TaskFilter,
    week_start: WeekStart,
}

impl<T: TaskService, C: CategoryService> TaskManager<T, C> {
    pub fn new(tasks_api: T, categories_api: C, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tasks_api,
            categories_api,
            notifier,
            state: LoadState::Idle,
            tasks: Optimistic::new(Vec::new()),
            categories: Vec::new(),
            selected_category: None,
            filter: TaskFilter::default(),
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Fetches both collections concurrently. Either failure fails the whole
    /// load and leaves no partial data behind. Calling it again is the retry.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        self.state = LoadState::Loading;
        let fetched = tokio::try_join!(self.tasks_api.get_all(), self.categories_api.get_all());
        match fetched {
            Ok((tasks, categories)) => {
                info!(
                    tasks = tasks.len(),
                    categories = categories.len(),
                    "initial load complete"
                );
                self.tasks = Optimistic::new(tasks);
                self.categories = categories;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "initial load failed");
                self.tasks = Optimistic::new(Vec::new());
                self.categories.clear();
                self.state = LoadState::Failed(err.to_string());
                self.notifier.notify(Notice::error("Failed to load data"));
                Err(err)
            }
        }
    }

    /// Creates a task and appends it. Failures are reported through the
    /// notifier only.
    pub async fn add_task(&mut self, input: NewTask) -> Option<Task> {
        match self.tasks_api.create(input).await {
            Ok(task) => {
                debug!(id = task.id, "task added");
                let added = task.clone();
                self.tasks.confirm_with(|tasks| tasks.push(added));
                self.notifier.notify(Notice::success("Task added successfully!"));
                Some(task)
            }
            Err(err) => {
                warn!(error = %err, "add task failed");
                self.notifier.notify(Notice::error("Failed to add task"));
                None
            }
        }
    }

    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        match self.tasks_api.update(id, patch).await {
            Ok(task) => {
                let updated = task.clone();
                self.tasks.confirm_with(|tasks| {
                    if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
                        *slot = updated;
                    }
                });
                Ok(task)
            }
            Err(err) => {
                warn!(id, error = %err, "update task failed");
                self.notifier.notify(Notice::error("Failed to update task"));
                Err(err)
            }
        }
    }

    pub async fn delete_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        match self.tasks_api.delete(id).await {
            Ok(task) => {
                self.tasks.confirm_with(|tasks| tasks.retain(|t| t.id != id));
                Ok(task)
            }
            Err(err) => {
                warn!(id, error = %err, "delete task failed");
                self.notifier.notify(Notice::error("Failed to delete task"));
                Err(err)
            }
        }
    }

    pub async fn reorder_task(&mut self, id: TaskId, new_order: i64) -> Result<Task, StoreError> {
        match self.tasks_api.reorder(id, new_order).await {
            Ok(task) => {
                let moved = task.clone();
                self.tasks.confirm_with(|tasks| {
                    if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
                        *slot = moved;
                    }
                });
                Ok(task)
            }
            Err(err) => {
                warn!(id, error = %err, "reorder task failed");
                self.notifier.notify(Notice::error("Failed to reorder task"));
                Err(err)
            }
        }
    }

    pub async fn add_category(&mut self, input: NewCategory) -> Option<Category> {
        match self.categories_api.create(input).await {
            Ok(category) => {
                debug!(id = category.id, "category added");
                self.categories.push(category.clone());
                self.notifier
                    .notify(Notice::success("Category added successfully!"));
                Some(category)
            }
            Err(err) => {
                warn!(error = %err, "add category failed");
                self.notifier.notify(Notice::error("Failed to add category"));
                None
            }
        }
    }

    /// Marks a task done or open, showing the change before the store
    /// confirms it.
    pub async fn toggle_complete(
        &mut self,
        id: TaskId,
        completed: bool,
    ) -> Result<Task, StoreError> {
        self.tasks.stage(|tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.completed = completed;
            }
        });
        match self.update_task(id, TaskPatch::new().completed(completed)).await {
            Ok(task) => {
                let message = if completed {
                    "Task completed!"
                } else {
                    "Task reopened"
                };
                self.notifier.notify(Notice::success(message));
                Ok(task)
            }
            Err(err) => {
                self.tasks.rollback();
                Err(err)
            }
        }
    }

    pub async fn edit_task(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        self.tasks.stage(|tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                patch.apply_to(task);
            }
        });
        match self.update_task(id, patch).await {
            Ok(task) => {
                self.notifier.notify(Notice::success("Task updated"));
                Ok(task)
            }
            Err(err) => {
                self.tasks.rollback();
                Err(err)
            }
        }
    }

    pub async fn remove_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        self.tasks.stage(|tasks| tasks.retain(|t| t.id != id));
        match self.delete_task(id).await {
            Ok(task) => {
                self.notifier.notify(Notice::success("Task deleted"));
                Ok(task)
            }
            Err(err) => {
                self.tasks.rollback();
                Err(err)
            }
        }
    }

    /// A creation payload carrying the input form's defaults: the selected
    /// category, else the first category, and medium priority.
    pub fn draft_task(&self, title: impl Into<String>) -> NewTask {
        let mut draft = NewTask::new(title);
        draft.category_id = self
            .selected_category
            .or_else(|| self.categories.first().map(|c| c.id));
        draft
    }

    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filter.priority = priority;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Tasks as currently displayed, including any in-flight change.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.current()
    }

    pub fn confirmed_tasks(&self) -> &[Task] {
        self.tasks.confirmed()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn task_service(&self) -> &T {
        &self.tasks_api
    }

    pub fn category_service(&self) -> &C {
        &self.categories_api
    }

    pub fn visible_tasks(&self) -> Vec<Task> {
        visible_tasks(self.tasks(), self.selected_category, &self.filter)
    }

    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TaskStats {
        TaskStats::compute(self.tasks(), self.selected_category, now, self.week_start)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        CategoryCounts::compute(&self.categories, self.tasks())
    }

    pub fn header(&self) -> CategoryHeader {
        CategoryHeader::resolve(&self.categories, self.selected_category)
    }
}
