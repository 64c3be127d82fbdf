#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use social_core::{
    DateTimeBroker, Entity, ErrorKind, FoundationError, LoggingBroker, Severity, StorageBroker,
    StorageError, StorageResult,
};
use std::cell::{Cell, RefCell};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl DateTimeBroker for FixedClock {
    fn current_date_time(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that counts how often it was read.
pub struct CountingClock {
    now: DateTime<Utc>,
    reads: Cell<usize>,
}

impl CountingClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl DateTimeBroker for CountingClock {
    fn current_date_time(&self) -> DateTime<Utc> {
        self.reads.set(self.reads.get() + 1);
        self.now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedFailure {
    pub severity: Severity,
    pub kind: ErrorKind,
    pub entity: &'static str,
}

#[derive(Default)]
pub struct RecordingLogger {
    entries: RefCell<Vec<LoggedFailure>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<LoggedFailure> {
        self.entries.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Asserts exactly one failure was logged and returns it.
    pub fn single(&self) -> LoggedFailure {
        let entries = self.entries();
        assert_eq!(entries.len(), 1, "expected exactly one log call: {entries:?}");
        entries[0].clone()
    }

    fn push(&self, severity: Severity, error: &FoundationError) {
        self.entries.borrow_mut().push(LoggedFailure {
            severity,
            kind: error.kind(),
            entity: error.entity(),
        });
    }
}

impl LoggingBroker for RecordingLogger {
    fn log_error(&self, error: &FoundationError) {
        self.push(Severity::Error, error);
    }

    fn log_critical(&self, error: &FoundationError) {
        self.push(Severity::Critical, error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    Update,
    Delete,
    SelectById,
    SelectAll,
}

/// In-memory storage that records calls and can fail one operation.
pub struct FakeStorage<E> {
    records: RefCell<Vec<E>>,
    calls: RefCell<Vec<Op>>,
    failure: Cell<Option<(Op, fn() -> StorageError)>>,
}

impl<E: Entity> FakeStorage<E> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            records: RefCell::new(records),
            calls: RefCell::new(Vec::new()),
            failure: Cell::new(None),
        }
    }

    pub fn fail_on(self, op: Op, make: fn() -> StorageError) -> Self {
        self.failure.set(Some((op, make)));
        self
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.borrow().clone()
    }

    pub fn records(&self) -> Vec<E> {
        self.records.borrow().clone()
    }

    fn enter(&self, op: Op) -> StorageResult<()> {
        self.calls.borrow_mut().push(op);
        match self.failure.get() {
            Some((failing, make)) if failing == op => Err(make()),
            _ => Ok(()),
        }
    }

    fn position(&self, key: E::Key) -> Option<usize> {
        self.records.borrow().iter().position(|record| record.key() == key)
    }
}

impl<E: Entity> StorageBroker<E> for FakeStorage<E> {
    fn insert(&self, entity: &E) -> StorageResult<E> {
        self.enter(Op::Insert)?;
        if self.position(entity.key()).is_some() {
            return Err(StorageError::DuplicateKey(entity.key().to_string()));
        }
        self.records.borrow_mut().push(entity.clone());
        Ok(entity.clone())
    }

    fn update(&self, entity: &E) -> StorageResult<E> {
        self.enter(Op::Update)?;
        let index = self
            .position(entity.key())
            .ok_or_else(|| StorageError::ConcurrencyConflict(entity.key().to_string()))?;
        self.records.borrow_mut()[index] = entity.clone();
        Ok(entity.clone())
    }

    fn delete(&self, entity: &E) -> StorageResult<E> {
        self.enter(Op::Delete)?;
        let index = self
            .position(entity.key())
            .ok_or_else(|| StorageError::ConcurrencyConflict(entity.key().to_string()))?;
        Ok(self.records.borrow_mut().remove(index))
    }

    fn select_by_id(&self, key: E::Key) -> StorageResult<Option<E>> {
        self.enter(Op::SelectById)?;
        Ok(self.position(key).map(|index| self.records.borrow()[index].clone()))
    }

    fn select_all(&self) -> StorageResult<Vec<E>> {
        self.enter(Op::SelectAll)?;
        Ok(self.records())
    }
}
