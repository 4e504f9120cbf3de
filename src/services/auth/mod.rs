pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod guard;
pub mod keys;
pub mod permissions;
pub mod verifier;

pub use claims::Claims;
pub use error::{AuthError, AuthErrorCode};
pub use factory::build_auth_service;
pub use verifier::AuthService;
