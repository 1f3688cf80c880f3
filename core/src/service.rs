//! Async data-service contracts for the two collections.
//!
//! # Design
//! The controller is generic over these traits rather than over a concrete
//! store, so it can be driven by the in-memory stores, a shared `Arc` of
//! them, or a test double that injects failures. Every operation suspends
//! before its effect becomes visible; callers are expected to await it.

use std::future::Future;
use std::sync::Arc;

use crate::error::StoreError;
use crate::types::{
    Category, CategoryPatch, IntoId, NewCategory, NewTask, Task, TaskPatch,
};

pub trait CategoryService: Send + Sync {
    /// Snapshot of every category in collection order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send;

    fn get_by_id(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;

    fn create(
        &self,
        input: NewCategory,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;

    fn update(
        &self,
        id: impl IntoId + Send,
        patch: CategoryPatch,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;

    /// Removes the category and returns the removed record.
    fn delete(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send;
}

pub trait TaskService: Send + Sync {
    /// Snapshot of every task in collection order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    fn get_by_id(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send;

    fn create(&self, input: NewTask) -> impl Future<Output = Result<Task, StoreError>> + Send;

    fn update(
        &self,
        id: impl IntoId + Send,
        patch: TaskPatch,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Removes the task and returns the removed record.
    fn delete(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Sets `order` directly. Other tasks are not renumbered.
    fn reorder(
        &self,
        id: impl IntoId + Send,
        new_order: i64,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send;
}

impl<S: CategoryService> CategoryService for Arc<S> {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Category>, StoreError>> + Send {
        (**self).get_all()
    }

    fn get_by_id(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send {
        (**self).get_by_id(id)
    }

    fn create(
        &self,
        input: NewCategory,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send {
        (**self).create(input)
    }

    fn update(
        &self,
        id: impl IntoId + Send,
        patch: CategoryPatch,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send {
        (**self).update(id, patch)
    }

    fn delete(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Category, StoreError>> + Send {
        (**self).delete(id)
    }
}

impl<S: TaskService> TaskService for Arc<S> {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send {
        (**self).get_all()
    }

    fn get_by_id(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).get_by_id(id)
    }

    fn create(&self, input: NewTask) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).create(input)
    }

    fn update(
        &self,
        id: impl IntoId + Send,
        patch: TaskPatch,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).update(id, patch)
    }

    fn delete(
        &self,
        id: impl IntoId + Send,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).delete(id)
    }

    fn reorder(
        &self,
        id: impl IntoId + Send,
        new_order: i64,
    ) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).reorder(id, new_order)
    }
}
