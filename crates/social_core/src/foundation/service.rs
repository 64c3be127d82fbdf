//! Foundation service: one generic CRUD orchestrator for every entity.
//!
//! # Responsibility
//! - Run validation, storage lookup and storage write in a fixed order.
//! - Report each failure once through the logging broker, after the
//!   operation has finished.
//!
//! # Invariants
//! - `add` performs at most one storage call; `modify` and `remove` at most
//!   two (lookup + write).
//! - The service holds no state between calls.

use super::error::{FoundationError, ServiceResult, Severity};
use super::validation::{
    validate_against_storage, validate_key, validate_on_add, validate_on_modify,
};
use crate::brokers::{DateTimeBroker, LoggingBroker, StorageBroker};
use crate::config::{RecencyConfig, RecencyWindow};
use crate::model::Entity;
use std::marker::PhantomData;

pub struct FoundationService<E, S, T, L> {
    storage: S,
    clock: T,
    logging: L,
    window: RecencyWindow,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S, T, L> FoundationService<E, S, T, L>
where
    E: Entity,
    S: StorageBroker<E>,
    T: DateTimeBroker,
    L: LoggingBroker,
{
    /// Creates a service using the default recency window.
    pub fn new(storage: S, clock: T, logging: L) -> Self {
        Self::with_window(storage, clock, logging, RecencyWindow::default())
    }

    pub fn with_window(storage: S, clock: T, logging: L, window: RecencyWindow) -> Self {
        Self {
            storage,
            clock,
            logging,
            window,
            _entity: PhantomData,
        }
    }

    /// Creates a service using the window configured for `E`.
    pub fn from_config(storage: S, clock: T, logging: L, recency: &RecencyConfig) -> Self {
        Self::with_window(storage, clock, logging, recency.window_for(E::NAME))
    }

    pub fn window(&self) -> RecencyWindow {
        self.window
    }

    /// Validates and inserts a new entity, returning the stored record.
    pub fn add(&self, entity: impl Into<Option<E>>) -> ServiceResult<E> {
        self.report(self.try_add(entity.into()))
    }

    /// Validates, checks against storage and updates an existing entity.
    pub fn modify(&self, entity: impl Into<Option<E>>) -> ServiceResult<E> {
        self.report(self.try_modify(entity.into()))
    }

    pub fn retrieve_by_id(&self, key: E::Key) -> ServiceResult<E> {
        self.report(self.try_retrieve_by_id(key))
    }

    pub fn retrieve_all(&self) -> ServiceResult<Vec<E>> {
        self.report(self.storage.select_all().map_err(storage_error::<E>))
    }

    /// Deletes the entity stored under `key`, returning the deleted record.
    pub fn remove(&self, key: E::Key) -> ServiceResult<E> {
        self.report(self.try_remove(key))
    }

    fn try_add(&self, entity: Option<E>) -> ServiceResult<E> {
        let entity = entity.ok_or_else(|| FoundationError::null_entity(E::NAME))?;
        let now = self.clock.current_date_time();
        validate_on_add(&entity, now, &self.window).into_result(E::NAME)?;

        self.storage.insert(&entity).map_err(storage_error::<E>)
    }

    fn try_modify(&self, entity: Option<E>) -> ServiceResult<E> {
        let entity = entity.ok_or_else(|| FoundationError::null_entity(E::NAME))?;
        let now = self.clock.current_date_time();
        validate_on_modify(&entity, now, &self.window).into_result(E::NAME)?;

        let stored = self.select_existing(entity.key())?;
        validate_against_storage(&entity, &stored).into_result(E::NAME)?;

        self.storage.update(&entity).map_err(storage_error::<E>)
    }

    fn try_retrieve_by_id(&self, key: E::Key) -> ServiceResult<E> {
        validate_key(&key).into_result(E::NAME)?;
        self.select_existing(key)
    }

    fn try_remove(&self, key: E::Key) -> ServiceResult<E> {
        validate_key(&key).into_result(E::NAME)?;
        let stored = self.select_existing(key)?;

        self.storage.delete(&stored).map_err(storage_error::<E>)
    }

    fn select_existing(&self, key: E::Key) -> ServiceResult<E> {
        self.storage
            .select_by_id(key)
            .map_err(storage_error::<E>)?
            .ok_or_else(|| FoundationError::not_found(E::NAME, key))
    }

    /// Post-operation hook: reports a failure once, at its severity.
    fn report<R>(&self, result: ServiceResult<R>) -> ServiceResult<R> {
        if let Err(err) = &result {
            match err.severity() {
                Severity::Error => self.logging.log_error(err),
                Severity::Critical => self.logging.log_critical(err),
            }
        }
        result
    }
}

fn storage_error<E: Entity>(error: crate::brokers::StorageError) -> FoundationError {
    FoundationError::from_storage(E::NAME, error)
}
