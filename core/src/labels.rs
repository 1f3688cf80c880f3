//! Small display derivations used by front-ends: the header of the current
//! selection and the due-date badge of a task.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::types::{Category, CategoryId};

pub const DEFAULT_CATEGORY_COLOR: &str = "#5B4FE5";
pub const ALL_TASKS_LABEL: &str = "All Tasks";

/// Palette offered when creating a category.
pub const PREDEFINED_COLORS: [&str; 8] = [
    "#5B4FE5", "#10B981", "#FFAB00", "#EF4444", "#3B82F6", "#8B5CF6", "#EC4899", "#F59E0B",
];

/// Title and accent color for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryHeader {
    pub name: String,
    pub color: String,
}

impl CategoryHeader {
    /// Falls back to "All Tasks" when nothing is selected or the selected
    /// category no longer exists.
    pub fn resolve(categories: &[Category], selected: Option<CategoryId>) -> Self {
        selected
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| CategoryHeader {
                name: c.name.clone(),
                color: c.color.clone(),
            })
            .unwrap_or_else(|| CategoryHeader {
                name: ALL_TASKS_LABEL.to_string(),
                color: DEFAULT_CATEGORY_COLOR.to_string(),
            })
    }
}

/// Badge text for a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    Tomorrow,
    Overdue(NaiveDate),
    Upcoming(NaiveDate),
}

impl DueLabel {
    pub fn for_due<Tz: TimeZone>(due: &DateTime<Utc>, now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let day = due.with_timezone(&now.timezone()).date_naive();
        if day == today {
            DueLabel::Today
        } else if Some(day) == today.checked_add_days(Days::new(1)) {
            DueLabel::Tomorrow
        } else if day < today {
            DueLabel::Overdue(day)
        } else {
            DueLabel::Upcoming(day)
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DueLabel::Overdue(_))
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Today => f.write_str("Today"),
            DueLabel::Tomorrow => f.write_str("Tomorrow"),
            DueLabel::Overdue(day) | DueLabel::Upcoming(day) => {
                write!(f, "{}", day.format("%b %-d"))
            }
        }
    }
}
