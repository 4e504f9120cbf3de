/*
 * Responsibility
 * - storage for drinks behind the DrinkRepo trait
 * - pg: sqlx/PostgreSQL, memory: process-local map (no DATABASE_URL)
 */
pub mod drink_repo;
pub mod error;
pub mod memory;
pub mod pg;

pub use drink_repo::{DrinkRepo, DrinkRow, Ingredient};
pub use error::RepoError;
pub use memory::MemoryDrinkRepo;
pub use pg::PgDrinkRepo;
