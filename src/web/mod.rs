//! Web API module for the SMB explorer.
//!
//! This module provides the REST API used by the browser client to manage
//! shares and to browse and change their virtual trees.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
