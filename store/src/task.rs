//! In-memory task collection.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use taskflow_core::{Entity, IntoId, NewTask, StoreError, Task, TaskPatch, TaskService};

use crate::delay::{delay, Latency};
use crate::table::Table;

/// Owns the task collection. `create` stamps `completed = false`, the
/// timestamps and `order` regardless of the payload; `update` refreshes
/// `updated_at`; `reorder` only moves the task.
#[derive(Debug)]
pub struct TaskStore {
    table: RwLock<Table<Task>>,
    latency: Latency,
}

impl TaskStore {
    pub fn new(latency: Latency) -> Self {
        Self::with_tasks(Vec::new(), latency)
    }

    pub fn with_tasks(tasks: Vec<Task>, latency: Latency) -> Self {
        Self {
            table: RwLock::new(Table::new(tasks)),
            latency,
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl TaskService for TaskStore {
    async fn get_all(&self) -> Result<Vec<Task>, StoreError> {
        delay(self.latency.get_all).await;
        Ok(self.table.read().await.snapshot())
    }

    async fn get_by_id(&self, id: impl IntoId + Send) -> Result<Task, StoreError> {
        let id = id.into_id();
        delay(self.latency.get_by_id).await;
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Task, id))
    }

    async fn create(&self, input: NewTask) -> Result<Task, StoreError> {
        delay(self.latency.create).await;
        let input = input.validated()?;
        let mut table = self.table.write().await;
        let id = table
            .next_id()
            .ok_or_else(|| StoreError::validation("id", "no ids left to assign"))?;
        let task = input.into_task(id, table.next_order(), Utc::now());
        table.push(task.clone());
        debug!(id, order = task.order, "task created");
        Ok(task)
    }

    async fn update(&self, id: impl IntoId + Send, patch: TaskPatch) -> Result<Task, StoreError> {
        let id = id.into_id();
        delay(self.latency.update).await;
        let mut table = self.table.write().await;
        let task = table
            .get_mut(id)
            .ok_or(StoreError::not_found(Entity::Task, id))?;
        patch.validated()?.apply_to(task);
        task.updated_at = Some(Utc::now());
        debug!(id = task.id, completed = task.completed, "task updated");
        Ok(task.clone())
    }

    async fn delete(&self, id: impl IntoId + Send) -> Result<Task, StoreError> {
        let id = id.into_id();
        delay(self.latency.delete).await;
        let removed = self
            .table
            .write()
            .await
            .remove(id)
            .ok_or(StoreError::not_found(Entity::Task, id))?;
        debug!(id = removed.id, "task deleted");
        Ok(removed)
    }

    async fn reorder(&self, id: impl IntoId + Send, new_order: i64) -> Result<Task, StoreError> {
        let id = id.into_id();
        delay(self.latency.reorder).await;
        let mut table = self.table.write().await;
        let task = table
            .get_mut(id)
            .ok_or(StoreError::not_found(Entity::Task, id))?;
        task.order = new_order;
        debug!(id = task.id, order = new_order, "task reordered");
        Ok(task.clone())
    }
}
