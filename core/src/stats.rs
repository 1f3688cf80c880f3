//! Derived statistics over the task collection.
//!
//! # Design
//! Calendar questions ("today", "this week") are answered in the time zone
//! of the `now` argument. Callers pass `Local::now()`; tests pass a fixed
//! offset so results do not depend on the machine running them.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::error::StoreError;
use crate::filter::in_category;
use crate::types::{Category, CategoryId, Priority, Task};

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn start_of_week(self, day: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Sunday => day.weekday().num_days_from_sunday(),
            WeekStart::Monday => day.weekday().num_days_from_monday(),
        };
        day - Days::new(u64::from(offset))
    }
}

impl FromStr for WeekStart {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(StoreError::validation(
                "week_start",
                format!("expected sunday|monday, got `{other}`"),
            )),
        }
    }
}

/// Counters shown in the header of the task view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub completed_today: usize,
    pub high_priority: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub this_week: usize,
}

impl TaskStats {
    /// Computes the counters over the selected category (or all tasks).
    pub fn compute<Tz: TimeZone>(
        tasks: &[Task],
        selected: Option<CategoryId>,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Self {
        let zone = now.timezone();
        let today = now.date_naive();
        let week_begin = week_start.start_of_week(today);
        let week_end = week_begin + Days::new(7);
        let day_of = |at: &DateTime<Utc>| at.with_timezone(&zone).date_naive();

        let mut stats = TaskStats::default();
        for task in in_category(tasks, selected) {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
                if task.updated_at.as_ref().map(day_of) == Some(today) {
                    stats.completed_today += 1;
                }
                continue;
            }
            if task.priority == Priority::High {
                stats.high_priority += 1;
            }
            if let Some(due) = task.due_date.as_ref().map(day_of) {
                if due == today {
                    stats.due_today += 1;
                }
                if due < today {
                    stats.overdue += 1;
                }
                if due >= week_begin && due < week_end {
                    stats.this_week += 1;
                }
            }
        }
        stats.active = stats.total - stats.completed;
        stats
    }

    /// Rounded share of completed tasks, `0` for an empty set.
    pub fn completion_percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.completed as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

/// Incomplete-task counts per category, in category order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: Vec<(CategoryId, usize)>,
}

impl CategoryCounts {
    pub fn compute(categories: &[Category], tasks: &[Task]) -> Self {
        let counts = categories
            .iter()
            .map(|category| {
                let open = tasks
                    .iter()
                    .filter(|t| !t.completed && t.category_id == Some(category.id))
                    .count();
                (category.id, open)
            })
            .collect();
        Self { counts }
    }

    /// Count for one category; unknown categories count zero.
    pub fn get(&self, id: CategoryId) -> usize {
        self.counts
            .iter()
            .find(|(category_id, _)| *category_id == id)
            .map_or(0, |(_, count)| *count)
    }

    /// The "All Tasks" badge: the sum of the per-category counts. Tasks
    /// without a known category are not included.
    pub fn all_tasks(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, usize)> + '_ {
        self.counts.iter().copied()
    }
}
