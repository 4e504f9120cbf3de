pub mod drinks;
pub mod fallback;
pub mod health;
