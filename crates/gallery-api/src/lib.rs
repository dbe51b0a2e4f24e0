//! Gallery API Library
//!
//! This crate provides the HTTP handlers, server-rendered views, middleware and
//! application setup of the photo gallery.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod setup;
mod telemetry;

// Public modules
pub mod drafts;
pub mod error;
pub mod state;
pub mod views;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
