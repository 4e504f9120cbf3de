/*
 * Responsibility
 * - drinks CRUD on PostgreSQL via sqlx
 * - recipe column holds the ingredient list as JSON text
 * - schema bootstrap (and optional drop + seed for a fresh start)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::drink_repo::{DrinkRepo, DrinkRow, Ingredient};
use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
struct PgDrinkRow {
    id: i64,
    title: String,
    recipe: String,
}

impl TryFrom<PgDrinkRow> for DrinkRow {
    type Error = RepoError;

    fn try_from(row: PgDrinkRow) -> Result<Self, Self::Error> {
        Ok(DrinkRow {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct PgDrinkRepo {
    db: PgPool,
}

impl PgDrinkRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create the table if needed. With `reset`, drop it first and seed one drink.
    pub async fn init_schema(&self, reset: bool) -> Result<(), RepoError> {
        if reset {
            tracing::warn!("dropping drinks table (DB_RESET_ON_START)");
            sqlx::query("DROP TABLE IF EXISTS drinks")
                .execute(&self.db)
                .await?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drinks (
                id BIGSERIAL PRIMARY KEY,
                title VARCHAR(80) NOT NULL UNIQUE,
                recipe TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        if reset {
            let water = [Ingredient {
                name: "water".into(),
                color: "blue".into(),
                parts: 1,
            }];
            self.create("water", &water).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl DrinkRepo for PgDrinkRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<DrinkRow>, RepoError> {
        let rows = sqlx::query_as::<_, PgDrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(DrinkRow::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<DrinkRow>, RepoError> {
        let row = sqlx::query_as::<_, PgDrinkRow>(
            r#"
            SELECT id, title, recipe
            FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(DrinkRow::try_from).transpose()
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<DrinkRow, RepoError> {
        let recipe = serde_json::to_string(recipe)?;

        let row = sqlx::query_as::<_, PgDrinkRow>(
            r#"
            INSERT INTO drinks (title, recipe)
            VALUES ($1, $2)
            RETURNING id, title, recipe
            "#,
        )
        .bind(title)
        .bind(recipe)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        row.try_into()
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<DrinkRow>, RepoError> {
        let recipe = recipe.map(serde_json::to_string).transpose()?;

        let row = sqlx::query_as::<_, PgDrinkRow>(
            r#"
            UPDATE drinks
            SET
                title = COALESCE($2, title),
                recipe = COALESCE($3, recipe)
            WHERE id = $1
            RETURNING id, title, recipe
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(recipe)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        row.map(DrinkRow::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM drinks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
