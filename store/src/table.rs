//! Row storage shared by both stores.
//!
//! # Design
//! Rows keep insertion order, which is the collection order callers see.
//! `last_id` is a high-water mark: ids come from `max(existing, last_id) + 1`,
//! so deleting the newest row never lets its id be handed out again.

use taskflow_core::{Category, Task};

pub(crate) trait Keyed {
    fn key(&self) -> u64;
}

impl Keyed for Task {
    fn key(&self) -> u64 {
        self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> u64 {
        self.id
    }
}

#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: Vec<T>,
    last_id: u64,
}

impl<T: Keyed + Clone> Table<T> {
    pub(crate) fn new(rows: Vec<T>) -> Self {
        let last_id = rows.iter().map(Keyed::key).max().unwrap_or(0);
        Self { rows, last_id }
    }

    /// `None` once the id space is exhausted; the mark is left untouched.
    pub(crate) fn next_id(&mut self) -> Option<u64> {
        let max = self.rows.iter().map(Keyed::key).max().unwrap_or(0);
        let next = self.last_id.max(max).checked_add(1)?;
        self.last_id = next;
        Some(next)
    }

    /// Position of a new row, used as its initial `order`.
    pub(crate) fn next_order(&self) -> i64 {
        i64::try_from(self.rows.len()).unwrap_or(i64::MAX)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub(crate) fn get(&self, id: Option<u64>) -> Option<&T> {
        let id = id?;
        self.rows.iter().find(|row| row.key() == id)
    }

    pub(crate) fn get_mut(&mut self, id: Option<u64>) -> Option<&mut T> {
        let id = id?;
        self.rows.iter_mut().find(|row| row.key() == id)
    }

    pub(crate) fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    pub(crate) fn remove(&mut self, id: Option<u64>) -> Option<T> {
        let id = id?;
        let index = self.rows.iter().position(|row| row.key() == id)?;
        Some(self.rows.remove(index))
    }
}
