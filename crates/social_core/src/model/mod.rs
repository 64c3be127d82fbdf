//! Domain model for the social platform foundation services.
//!
//! # Responsibility
//! - Define the entities persisted by the foundation services.
//! - Declare, per entity, the field rules evaluated before persistence.
//!
//! # Invariants
//! - Every entity exposes a key whose fields are non-nil once valid.
//! - `created_date`/`updated_date` are set by callers; the services only
//!   check them, they never stamp them.

use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use uuid::Uuid;

pub mod post;
pub mod post_impression;
pub mod post_report;
pub mod profile;
pub mod rules;

pub use rules::FieldRule;

/// Field name reported for creation timestamp violations.
pub const CREATED_DATE_FIELD: &str = "CreatedDate";
/// Field name reported for modification timestamp violations.
pub const UPDATED_DATE_FIELD: &str = "UpdatedDate";

/// Identity of a persisted entity, simple or composite.
pub trait EntityKey: Copy + Debug + Display + PartialEq + Send + Sync {
    /// Returns the names of key fields still holding their default value.
    fn missing_fields(&self) -> Vec<&'static str>;
}

impl EntityKey for Uuid {
    fn missing_fields(&self) -> Vec<&'static str> {
        if self.is_nil() {
            vec!["Id"]
        } else {
            Vec::new()
        }
    }
}

/// An entity handled by the generic foundation service.
pub trait Entity: Clone + Debug + PartialEq + Send + Sync {
    type Key: EntityKey;

    /// Human-readable entity name used in error messages and log events.
    const NAME: &'static str;

    fn key(&self) -> Self::Key;
    fn created_date(&self) -> DateTime<Utc>;
    fn updated_date(&self) -> DateTime<Utc>;

    /// Declarative table of field rules checked on add and modify.
    ///
    /// Timestamp rules are shared by every entity and are not listed here.
    fn field_rules() -> Vec<FieldRule<Self>>;
}
