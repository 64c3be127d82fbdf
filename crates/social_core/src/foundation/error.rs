//! Structured error type returned by every foundation service operation.
//!
//! # Invariants
//! - The tier and severity of an error are derived from its kind only.
//! - Native storage errors travel as `source`, never as the error itself.

use crate::brokers::StorageError;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, FoundationError>;

/// Caller-facing category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorTier {
    /// Caller-supplied data is invalid; fixable by the caller.
    Validation,
    /// Storage failed at the infrastructure level.
    Dependency,
    /// Storage rejected the data (uniqueness, references, conflicts).
    DependencyValidation,
    /// Unclassified failure.
    Service,
}

impl ErrorTier {
    fn summary(self) -> &'static str {
        match self {
            Self::Validation => "validation error occurred, fix errors and try again",
            Self::Dependency => "dependency error occurred, contact support",
            Self::DependencyValidation => {
                "dependency validation error occurred, fix errors and try again"
            }
            Self::Service => "service error occurred, contact support",
        }
    }
}

impl Display for ErrorTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Dependency => "dependency",
            Self::DependencyValidation => "dependency_validation",
            Self::Service => "service",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Critical,
}

/// Specific cause of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullEntity,
    InvalidEntity,
    NotFound,
    FailedStorage,
    AlreadyExists,
    InvalidStorage,
    Locked,
    FailedService,
}

impl ErrorKind {
    pub fn tier(self) -> ErrorTier {
        match self {
            Self::NullEntity | Self::InvalidEntity | Self::NotFound => ErrorTier::Validation,
            Self::FailedStorage => ErrorTier::Dependency,
            Self::AlreadyExists | Self::InvalidStorage | Self::Locked => {
                ErrorTier::DependencyValidation
            }
            Self::FailedService => ErrorTier::Service,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::FailedStorage | Self::FailedService => Severity::Critical,
            _ => Severity::Error,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NullEntity => "null_entity",
            Self::InvalidEntity => "invalid_entity",
            Self::NotFound => "not_found",
            Self::FailedStorage => "failed_storage",
            Self::AlreadyExists => "already_exists",
            Self::InvalidStorage => "invalid_storage",
            Self::Locked => "locked",
            Self::FailedService => "failed_service",
        };
        f.write_str(name)
    }
}

/// Field-level validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<&'static str, Vec<&'static str>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.entries.entry(field).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of offending fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: &str) -> Option<&[&'static str]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str, message: &str) -> bool {
        self.get(field)
            .is_some_and(|messages| messages.contains(&message))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Turns collected violations into an `InvalidEntity` error.
    pub fn into_result(self, entity: &'static str) -> ServiceResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        Err(FoundationError::invalid(entity, self))
    }
}

#[derive(Debug, Error)]
#[error("{entity} {}", .kind.tier().summary())]
pub struct FoundationError {
    entity: &'static str,
    kind: ErrorKind,
    detail: String,
    fields: FieldErrors,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl FoundationError {
    fn new(entity: &'static str, kind: ErrorKind, detail: String) -> Self {
        Self {
            entity,
            kind,
            detail,
            fields: FieldErrors::new(),
            source: None,
        }
    }

    pub fn null_entity(entity: &'static str) -> Self {
        Self::new(entity, ErrorKind::NullEntity, format!("{entity} is null"))
    }

    pub fn invalid(entity: &'static str, fields: FieldErrors) -> Self {
        Self {
            fields,
            ..Self::new(
                entity,
                ErrorKind::InvalidEntity,
                format!("Invalid {entity}. Please correct the errors and try again"),
            )
        }
    }

    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::new(
            entity,
            ErrorKind::NotFound,
            format!("Couldn't find {entity} with key: {key}"),
        )
    }

    pub fn failed_service(entity: &'static str, source: Box<dyn Error + Send + Sync>) -> Self {
        Self {
            source: Some(source),
            ..Self::new(
                entity,
                ErrorKind::FailedService,
                format!("Failed {entity} service error occurred, contact support"),
            )
        }
    }

    /// Classifies a native storage failure.
    pub fn from_storage(entity: &'static str, error: StorageError) -> Self {
        let classified = match &error {
            StorageError::DuplicateKey(_) => Some((
                ErrorKind::AlreadyExists,
                format!("{entity} with the same key already exists"),
            )),
            StorageError::ForeignKeyViolation(_) | StorageError::ConstraintViolation(_) => Some((
                ErrorKind::InvalidStorage,
                format!("Invalid {entity} reference or value rejected by storage"),
            )),
            StorageError::Locked(_) | StorageError::ConcurrencyConflict(_) => Some((
                ErrorKind::Locked,
                format!("Locked {entity} record error occurred, please try again"),
            )),
            StorageError::Unavailable(_) | StorageError::Sql(_) => Some((
                ErrorKind::FailedStorage,
                format!("Failed {entity} storage error occurred, contact support"),
            )),
            StorageError::InvalidData(_) | StorageError::Other(_) => None,
        };
        let Some((kind, detail)) = classified else {
            return Self::failed_service(entity, Box::new(error));
        };

        Self {
            source: Some(Box::new(error)),
            ..Self::new(entity, kind, detail)
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn tier(&self) -> ErrorTier {
        self.kind.tier()
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Message describing the specific cause.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn fields(&self) -> &FieldErrors {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ErrorTier, FieldErrors, FoundationError, Severity};
    use crate::brokers::StorageError;
    use std::error::Error;

    #[test]
    fn kinds_map_to_tiers_and_severities() {
        let cases = [
            (ErrorKind::NullEntity, ErrorTier::Validation, Severity::Error),
            (ErrorKind::InvalidEntity, ErrorTier::Validation, Severity::Error),
            (ErrorKind::NotFound, ErrorTier::Validation, Severity::Error),
            (ErrorKind::FailedStorage, ErrorTier::Dependency, Severity::Critical),
            (ErrorKind::AlreadyExists, ErrorTier::DependencyValidation, Severity::Error),
            (ErrorKind::InvalidStorage, ErrorTier::DependencyValidation, Severity::Error),
            (ErrorKind::Locked, ErrorTier::DependencyValidation, Severity::Error),
            (ErrorKind::FailedService, ErrorTier::Service, Severity::Critical),
        ];

        for (kind, tier, severity) in cases {
            assert_eq!(kind.tier(), tier, "{kind}");
            assert_eq!(kind.severity(), severity, "{kind}");
        }
    }

    #[test]
    fn field_errors_group_messages_per_field() {
        let mut fields = FieldErrors::new();
        fields.add("CreatedDate", "Date is required");
        fields.add("CreatedDate", "Date is not recent");
        fields.add("Id", "Id is required");

        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.get("CreatedDate"),
            Some(&["Date is required", "Date is not recent"][..])
        );
        assert!(fields.contains("Id", "Id is required"));
        assert!(FieldErrors::new().into_result("Post").is_ok());
    }

    #[test]
    fn display_uses_tier_summary() {
        let err = FoundationError::null_entity("Post");
        assert_eq!(
            err.to_string(),
            "Post validation error occurred, fix errors and try again"
        );
        assert_eq!(err.detail(), "Post is null");
        assert!(err.source().is_none());
    }

    #[test]
    fn storage_errors_are_classified_and_kept_as_source() {
        let duplicate =
            FoundationError::from_storage("Post", StorageError::DuplicateKey("id".into()));
        assert_eq!(duplicate.kind(), ErrorKind::AlreadyExists);
        assert!(duplicate.source().is_some());

        let foreign =
            FoundationError::from_storage("PostReport", StorageError::ForeignKeyViolation("post_id".into()));
        assert_eq!(foreign.kind(), ErrorKind::InvalidStorage);

        let conflict =
            FoundationError::from_storage("Post", StorageError::ConcurrencyConflict("gone".into()));
        assert_eq!(conflict.kind(), ErrorKind::Locked);

        let down = FoundationError::from_storage("Post", StorageError::Unavailable("down".into()));
        assert_eq!(down.tier(), ErrorTier::Dependency);

        let corrupt = FoundationError::from_storage("Post", StorageError::InvalidData("bad".into()));
        assert_eq!(corrupt.tier(), ErrorTier::Service);
        assert_eq!(
            corrupt.source().map(|source| source.to_string()).as_deref(),
            Some("invalid persisted data: bad")
        );
    }
}
