//! Generic validate-then-persist template shared by every entity.
//!
//! # Responsibility
//! - Validate entities and keys with per-entity rule tables.
//! - Delegate persistence to a `StorageBroker`.
//! - Translate every failure into one `FoundationError` and report it once.
//!
//! # Invariants
//! - Validation failures never reach the storage broker.
//! - Successful operations make no logging broker calls.

pub mod error;
mod service;
pub mod validation;

pub use error::{ErrorKind, ErrorTier, FieldErrors, FoundationError, ServiceResult, Severity};
pub use service::FoundationService;
