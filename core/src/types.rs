//! Domain types for tasks and categories.
//!
//! # Design
//! Entities are plain owned data so that every value handed out by a store
//! is an independent snapshot. Creation payloads (`NewTask`, `NewCategory`)
//! and partial updates (`TaskPatch`, `CategoryPatch`) are separate types:
//! patches have one optional slot per mutable field and no `id` slot, so an
//! update can never rewrite an entity's identity.
//!
//! Nullable fields use `Option<Option<_>>` in patches. The outer `None`
//! leaves the field alone, `Some(None)` clears it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type TaskId = u64;
pub type CategoryId = u64;

/// Task urgency as chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(StoreError::validation(
                "priority",
                format!("expected high|medium|low, got `{other}`"),
            )),
        }
    }
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user-defined grouping of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub order: i64,
}

/// Payload for creating a task. The store assigns `id`, `order`,
/// `completed` and the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::default(),
            due_date: None,
            category_id: None,
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Trims the title and rejects blank ones.
    pub fn validated(mut self) -> Result<Self, StoreError> {
        self.title = required_text("title", &self.title)?;
        Ok(self)
    }

    /// Builds the stored record for a validated payload.
    pub fn into_task(self, id: TaskId, order: i64, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            completed: false,
            priority: self.priority,
            category_id: self.category_id,
            due_date: self.due_date,
            order,
            created_at: now,
            updated_at: Some(now),
        }
    }
}

/// Payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn validated(mut self) -> Result<Self, StoreError> {
        self.name = required_text("name", &self.name)?;
        Ok(self)
    }

    pub fn into_category(self, id: CategoryId, order: i64) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
            order,
        }
    }
}

/// Partial update for a task. Absent slots leave the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category_id: Option<Option<CategoryId>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub order: Option<i64>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validated(mut self) -> Result<Self, StoreError> {
        if let Some(title) = self.title.as_deref() {
            self.title = Some(required_text("title", title)?);
        }
        Ok(self)
    }

    /// Merges the present slots into `task`. Identity and `created_at` are
    /// never touched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category_id) = self.category_id {
            task.category_id = category_id;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(order) = self.order {
            task.order = order;
        }
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub order: Option<i64>,
}

impl CategoryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn validated(mut self) -> Result<Self, StoreError> {
        if let Some(name) = self.name.as_deref() {
            self.name = Some(required_text("name", name)?);
        }
        Ok(self)
    }

    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(order) = self.order {
            category.order = order;
        }
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Values usable as an entity id in store lookups.
///
/// Anything that does not coerce to a non-negative integer yields `None`,
/// which every store treats as a lookup miss.
pub trait IntoId {
    fn into_id(self) -> Option<u64>;
}

impl IntoId for u64 {
    fn into_id(self) -> Option<u64> {
        Some(self)
    }
}

impl IntoId for u32 {
    fn into_id(self) -> Option<u64> {
        Some(u64::from(self))
    }
}

impl IntoId for i64 {
    fn into_id(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl IntoId for i32 {
    fn into_id(self) -> Option<u64> {
        u64::try_from(self).ok()
    }
}

impl IntoId for &str {
    fn into_id(self) -> Option<u64> {
        coerce_id(self)
    }
}

impl IntoId for String {
    fn into_id(self) -> Option<u64> {
        coerce_id(&self)
    }
}

impl IntoId for &String {
    fn into_id(self) -> Option<u64> {
        coerce_id(self)
    }
}

impl<T: IntoId> IntoId for Option<T> {
    fn into_id(self) -> Option<u64> {
        self.and_then(IntoId::into_id)
    }
}

/// Reads a leading decimal integer the way user-typed ids are parsed:
/// leading whitespace and a `+` sign are accepted, trailing characters are
/// ignored, negative values and non-numeric input yield `None`.
pub fn coerce_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value: u64 = rest[..digits_end].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}
