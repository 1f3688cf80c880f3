//! Text and JSON renderings of the controller's views.

use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use taskflow_core::{
    Category, CategoryCounts, CategoryHeader, CategoryId, DueLabel, Notice, NoticeLevel, Task,
    TaskStats,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView<'a> {
    pub header: &'a CategoryHeader,
    pub stats: &'a TaskStats,
    pub completion_percentage: u8,
    pub categories: &'a CategoriesView<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow<'a> {
    pub id: CategoryId,
    pub name: &'a str,
    pub color: &'a str,
    pub open_tasks: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesView<'a> {
    pub all_tasks: usize,
    pub categories: Vec<CategoryRow<'a>>,
}

impl<'a> CategoriesView<'a> {
    pub fn new(categories: &'a [Category], counts: &CategoryCounts) -> Self {
        Self {
            all_tasks: counts.all_tasks(),
            categories: categories
                .iter()
                .map(|c| CategoryRow {
                    id: c.id,
                    name: &c.name,
                    color: &c.color,
                    open_tasks: counts.get(c.id),
                })
                .collect(),
        }
    }
}

pub fn summary_text(header: &CategoryHeader, stats: &TaskStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header.name);
    let _ = writeln!(
        out,
        "{} tasks, {} active, {} completed ({}% done)",
        stats.total,
        stats.active,
        stats.completed,
        stats.completion_percentage()
    );
    let _ = writeln!(
        out,
        "high priority: {}  due today: {}  overdue: {}  this week: {}  completed today: {}",
        stats.high_priority, stats.due_today, stats.overdue, stats.this_week, stats.completed_today
    );
    out
}

pub fn task_line<Tz: TimeZone>(task: &Task, categories: &[Category], now: &DateTime<Tz>) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut details = vec![task.priority.to_string()];
    if let Some(category) = task
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
    {
        details.push(category.name.clone());
    }
    if let Some(due) = &task.due_date {
        let label = DueLabel::for_due(due, now);
        if label.is_overdue() && !task.completed {
            details.push(format!("overdue {label}"));
        } else {
            details.push(format!("due {label}"));
        }
    }
    format!("{mark} #{:<3} {}  ({})", task.id, task.title, details.join(", "))
}

pub fn task_list_text<Tz: TimeZone>(
    tasks: &[Task],
    categories: &[Category],
    now: &DateTime<Tz>,
) -> String {
    if tasks.is_empty() {
        return "No tasks found\n".to_string();
    }
    tasks
        .iter()
        .map(|t| task_line(t, categories, now) + "\n")
        .collect()
}

pub fn categories_text(view: &CategoriesView<'_>, selected: Option<CategoryId>) -> String {
    let marker = |hit: bool| if hit { '*' } else { ' ' };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {:>4}  All Tasks",
        marker(selected.is_none()),
        view.all_tasks
    );
    for row in &view.categories {
        let _ = writeln!(
            out,
            "{} {:>4}  {} ({}) #{}",
            marker(selected == Some(row.id)),
            row.open_tasks,
            row.name,
            row.color,
            row.id
        );
    }
    out
}

pub fn notice_line(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("ok: {}", notice.message),
        NoticeLevel::Error => format!("error: {}", notice.message),
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
