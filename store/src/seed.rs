//! Seed dataset loaded into the stores at start-up.
//!
//! # Design
//! The built-in dataset is embedded from `seed/*.json`. A replacement can be
//! read from a single JSON document of the form
//! `{ "categories": [...], "tasks": [...] }`. Seed data is checked for
//! duplicate ids before any store is built.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use taskflow_core::{Category, Entity, Task};

use crate::category::CategoryStore;
use crate::delay::LatencyProfile;
use crate::task::TaskStore;

const BUILTIN_CATEGORIES: &str = include_str!("../seed/categories.json");
const BUILTIN_TASKS: &str = include_str!("../seed/tasks.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {entity} id {id} in seed data")]
    DuplicateId { entity: Entity, id: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Seed {
    /// The dataset shipped with the crate.
    pub fn builtin() -> Result<Self, SeedError> {
        let seed = Seed {
            categories: serde_json::from_str(BUILTIN_CATEGORIES)?,
            tasks: serde_json::from_str(BUILTIN_TASKS)?,
        };
        seed.check()?;
        Ok(seed)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        let seed: Seed = serde_json::from_str(raw)?;
        seed.check()?;
        Ok(seed)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    fn check(&self) -> Result<(), SeedError> {
        unique_ids(Entity::Category, self.categories.iter().map(|c| c.id))?;
        unique_ids(Entity::Task, self.tasks.iter().map(|t| t.id))
    }

    /// Builds both stores from this dataset.
    pub fn into_stores(self, profile: LatencyProfile) -> (TaskStore, CategoryStore) {
        info!(
            tasks = self.tasks.len(),
            categories = self.categories.len(),
            ?profile,
            "seeding stores"
        );
        (
            TaskStore::with_tasks(self.tasks, profile.tasks()),
            CategoryStore::with_categories(self.categories, profile.categories()),
        )
    }
}

fn unique_ids(entity: Entity, ids: impl Iterator<Item = u64>) -> Result<(), SeedError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SeedError::DuplicateId { entity, id });
        }
    }
    Ok(())
}
