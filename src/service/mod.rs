//! Service layer for the roster rating service
//!
//! Wires configuration, metrics, the rating engine and roster storage into
//! one application state.

pub mod app;

pub use app::{AppState, ServiceStats};
