//! In-memory student registry served over HTTP.
//!
//! Holds an ordered list of student records, seeded with two entries, and
//! exposes list/get/create/update/delete over JSON. An OpenAPI description
//! built from the handler annotations is served alongside as Swagger UI.
//!
//! ```text
//! GET    /students        -> 200 [Student]
//! GET    /students/{id}   -> 200 Student | 404
//! POST   /students        -> 201 Student
//! PUT    /students/{id}   -> 200 message | 404
//! DELETE /students/{id}   -> 200 message | 404
//! GET    /api-docs        -> Swagger UI
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`registry`]: Student records and the in-memory store
//! - [`api`]: HTTP routes, handlers and OpenAPI docs
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
