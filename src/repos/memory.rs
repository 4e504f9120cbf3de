use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::repos::drink_repo::{DrinkRepo, DrinkRow, Ingredient};
use crate::repos::error::RepoError;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, DrinkRow>,
    next_id: i64,
}

impl Table {
    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.title == title && Some(row.id) != except)
    }
}

/// Process-local drink store with the same uniqueness rule as the `drinks` table.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryDrinkRepo {
    table: RwLock<Table>,
}

impl MemoryDrinkRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkRepo for MemoryDrinkRepo {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<DrinkRow>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRow, RepoError> {
        let mut table = self.table.write().await;
        if table.title_taken(title, None) {
            return Err(RepoError::Conflict);
        }

        table.next_id += 1;
        let row = DrinkRow {
            id: table.next_id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
        };
        table.rows.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRow>, RepoError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if let Some(title) = title
            && table.title_taken(title, Some(id))
        {
            return Err(RepoError::Conflict);
        }

        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            row.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            row.recipe = recipe.to_vec();
        }

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
