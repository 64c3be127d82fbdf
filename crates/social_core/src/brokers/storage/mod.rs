//! Storage broker contract and native storage errors.
//!
//! # Responsibility
//! - Define the CRUD contract every entity store implements.
//! - Carry native storage failures to the service unchanged in meaning.
//!
//! # Invariants
//! - `update` and `delete` touching no row report `ConcurrencyConflict`;
//!   existence is checked by the service before either call.

use crate::model::Entity;
use std::error::Error;
use thiserror::Error;

mod records;
mod sqlite;

pub use sqlite::{SqliteRecord, SqliteStorageBroker};

pub type StorageResult<T> = Result<T, StorageError>;

/// Native failure surfaced by a storage broker.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage locked: {0}")]
    Locked(String),
    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("sql failure: {0}")]
    Sql(#[source] rusqlite::Error),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("unexpected storage failure: {0}")]
    Other(#[source] Box<dyn Error + Send + Sync>),
}

/// Persistence contract for one entity type.
pub trait StorageBroker<E: Entity> {
    fn insert(&self, entity: &E) -> StorageResult<E>;
    fn update(&self, entity: &E) -> StorageResult<E>;
    fn delete(&self, entity: &E) -> StorageResult<E>;
    fn select_by_id(&self, key: E::Key) -> StorageResult<Option<E>>;
    fn select_all(&self) -> StorageResult<Vec<E>>;
}

impl<E: Entity, S: StorageBroker<E> + ?Sized> StorageBroker<E> for &S {
    fn insert(&self, entity: &E) -> StorageResult<E> {
        (**self).insert(entity)
    }

    fn update(&self, entity: &E) -> StorageResult<E> {
        (**self).update(entity)
    }

    fn delete(&self, entity: &E) -> StorageResult<E> {
        (**self).delete(entity)
    }

    fn select_by_id(&self, key: E::Key) -> StorageResult<Option<E>> {
        (**self).select_by_id(key)
    }

    fn select_all(&self) -> StorageResult<Vec<E>> {
        (**self).select_all()
    }
}
