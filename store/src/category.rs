//! In-memory category collection.

use tokio::sync::RwLock;
use tracing::debug;

use taskflow_core::{
    Category, CategoryPatch, CategoryService, Entity, IntoId, NewCategory, StoreError,
};

use crate::delay::{delay, Latency};
use crate::table::Table;

/// Owns the category collection. All access goes through `CategoryService`;
/// the write lock is held across id assignment, so concurrent creates never
/// collide.
#[derive(Debug)]
pub struct CategoryStore {
    table: RwLock<Table<Category>>,
    latency: Latency,
}

impl CategoryStore {
    pub fn new(latency: Latency) -> Self {
        Self::with_categories(Vec::new(), latency)
    }

    pub fn with_categories(categories: Vec<Category>, latency: Latency) -> Self {
        Self {
            table: RwLock::new(Table::new(categories)),
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

impl CategoryService for CategoryStore {
    async fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        delay(self.latency.get_all).await;
        Ok(self.table.read().await.snapshot())
    }

    async fn get_by_id(&self, id: impl IntoId + Send) -> Result<Category, StoreError> {
        let id = id.into_id();
        delay(self.latency.get_by_id).await;
        self.table
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Category, id))
    }

    async fn create(&self, input: NewCategory) -> Result<Category, StoreError> {
        delay(self.latency.create).await;
        let input = input.validated()?;
        let mut table = self.table.write().await;
        let id = table
            .next_id()
            .ok_or_else(|| StoreError::validation("id", "no ids left to assign"))?;
        let category = input.into_category(id, table.next_order());
        table.push(category.clone());
        debug!(id, name = %category.name, "category created");
        Ok(category)
    }

    async fn update(
        &self,
        id: impl IntoId + Send,
        patch: CategoryPatch,
    ) -> Result<Category, StoreError> {
        let id = id.into_id();
        delay(self.latency.update).await;
        let mut table = self.table.write().await;
        let category = table
            .get_mut(id)
            .ok_or(StoreError::not_found(Entity::Category, id))?;
        patch.validated()?.apply_to(category);
        debug!(id = category.id, "category updated");
        Ok(category.clone())
    }

    async fn delete(&self, id: impl IntoId + Send) -> Result<Category, StoreError> {
        let id = id.into_id();
        delay(self.latency.delete).await;
        let removed = self
            .table
            .write()
            .await
            .remove(id)
            .ok_or(StoreError::not_found(Entity::Category, id))?;
        debug!(id = removed.id, "category deleted");
        Ok(removed)
    }
}
