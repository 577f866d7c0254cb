//! Project store: the single source of truth for projects and tasks.
//!
//! # Responsibility
//! - Own the in-memory project collection and its mutating operations.
//! - Derive read views from the current collection on every access.
//! - Persist through an injected adapter after each applied mutation.
//!
//! # Invariants
//! - Operations never return errors; failed preconditions are no-ops.
//! - Persistence failures are logged and never reach the caller.

pub mod clock;
pub mod project_store;
