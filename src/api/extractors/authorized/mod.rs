/**
 * Responsibility
 *  - bundle core (extractor) and types (capability markers)
 */
mod core;
mod types;

pub use self::core::{Authorized, Permission};
pub use types::*;
