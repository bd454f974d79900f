//! services/client/src/lib.rs
//!
//! Client for the AI Tutorials backend: the HTTP gateway, the dashboard state
//! that keeps local collections in sync with the server, and text renderers
//! used by the `tutorials` binary.

pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod views;
