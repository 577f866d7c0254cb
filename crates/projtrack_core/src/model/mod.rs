//! Domain model for the project/task tracker.
//!
//! # Responsibility
//! - Define the persisted `Project`/`Task` records and their wire shape.
//! - Define the derived completion projection used by read views.
//!
//! # Invariants
//! - Every record is identified by an opaque, immutable string ID.
//! - Task order inside a project is append-only display order.

pub mod project;
