//! Middleware for Web API.

pub mod auth;
pub mod cors;

pub use auth::{AccessTokens, AdminAccess, ManagerAccess};
pub use cors::create_cors_layer;
