//! Student registry module.
//!
//! This module handles:
//! - Student record types and request payloads
//! - The in-memory store with id assignment
//! - Lenient parsing of ids taken from request paths

pub mod store;
pub mod types;

pub use store::{IdStrategy, StudentStore};
pub use types::{parse_student_id, seed_students, Student, StudentPayload};
