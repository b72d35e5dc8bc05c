//! Application services used by the route handlers.

pub mod auth;

pub use auth::{AuthError, AuthService, TokenPair};
