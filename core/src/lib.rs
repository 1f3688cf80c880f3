//! Task and category management core.
//!
//! # Overview
//! Domain types, async service contracts for the task and category
//! collections, the pure view derivations (filtering, display order,
//! statistics, per-category counts) and the application controller that
//! ties them together.
//!
//! # Design
//! - The core does no I/O of its own. Data comes from `TaskService` /
//!   `CategoryService` implementations; the in-memory stores live in the
//!   `taskflow-store` crate.
//! - Everything in `filter`, `stats` and `labels` is a pure function of
//!   borrowed collections, so views can be recomputed freely.
//! - Optimistic updates keep confirmed and pending state apart
//!   (`optimistic::Optimistic`), which makes rollback an assignment.

pub mod controller;
pub mod error;
pub mod filter;
pub mod labels;
pub mod notify;
pub mod optimistic;
pub mod service;
pub mod stats;
pub mod types;

pub use controller::{LoadState, TaskManager};
pub use error::{Entity, StoreError};
pub use filter::{sort_for_display, visible_tasks, PriorityFilter, StatusFilter, TaskFilter};
pub use labels::{CategoryHeader, DueLabel, DEFAULT_CATEGORY_COLOR, PREDEFINED_COLORS};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use optimistic::Optimistic;
pub use service::{CategoryService, TaskService};
pub use stats::{CategoryCounts, TaskStats, WeekStart};
pub use types::{
    coerce_id, Category, CategoryId, CategoryPatch, IntoId, NewCategory, NewTask, Priority, Task,
    TaskId, TaskPatch,
};
