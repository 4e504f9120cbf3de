/*
 * Responsibility
 * - drink record shape shared by every storage backend
 * - DrinkRepo: the CRUD surface handlers depend on
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::repos::error::RepoError;

/// One line of a recipe. Stored as part of a JSON array in `drinks.recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkRow {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[async_trait]
pub trait DrinkRepo: Send + Sync {
    // Returns the storage backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // All drinks, ordered by id.
    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<DrinkRow>, RepoError>;

    // `Conflict` when the title is already taken.
    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRow, RepoError>;

    // None fields are left untouched; Ok(None) when the id does not exist.
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRow>, RepoError>;

    // Ok(false) when the id does not exist.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}
