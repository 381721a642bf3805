//! roster-core: on-call duty roster engine for a small clinic.
//!
//! The library is a pure, synchronous computation over an in-memory
//! snapshot of one duty period. All reads happen once up front, all
//! writes happen once at the end (commit path only).
//!
//! RULES:
//!   - Only the store talks to SQL.
//!   - The solver owns its mutable state; nothing ambient, nothing shared.
//!   - Identical input must produce byte-identical output.

pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod period;
pub mod quota;
pub mod report;
pub mod slot;
pub mod solver;
pub mod store;
pub mod summary;
pub mod types;
