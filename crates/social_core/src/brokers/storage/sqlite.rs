//! SQLite-backed storage broker.
//!
//! # Responsibility
//! - Provide one generic CRUD implementation over any `SqliteRecord`.
//! - Classify native SQLite failures into `StorageError` variants.
//!
//! # Invariants
//! - The borrowed connection must come from `db::open_db*` (migrated,
//!   `foreign_keys=ON`).
//! - Column order in `SqliteRecord::COLUMNS` matches `to_values()`.

use super::{StorageBroker, StorageError, StorageResult};
use crate::model::Entity;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, ErrorCode, Row};
use uuid::Uuid;

/// Table mapping for an entity stored through `SqliteStorageBroker`.
pub trait SqliteRecord: Entity {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY_COLUMNS: &'static [&'static str];
    const ORDER_BY: &'static str;

    /// Column values in `COLUMNS` order.
    fn to_values(&self) -> Vec<Value>;
    /// Key values in `KEY_COLUMNS` order.
    fn key_values(key: &Self::Key) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> StorageResult<Self>;
}

pub struct SqliteStorageBroker<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorageBroker<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl<E: SqliteRecord> StorageBroker<E> for SqliteStorageBroker<'_> {
    fn insert(&self, entity: &E) -> StorageResult<E> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(entity.to_values()))?;
        Ok(entity.clone())
    }

    fn update(&self, entity: &E) -> StorageResult<E> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {};",
            E::TABLE,
            key_predicate(E::KEY_COLUMNS, E::COLUMNS.len())
        );

        let mut values = entity.to_values();
        values.extend(E::key_values(&entity.key()));
        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Err(StorageError::ConcurrencyConflict(format!(
                "no {} row matched {} on update",
                E::TABLE,
                entity.key()
            )));
        }

        Ok(entity.clone())
    }

    fn delete(&self, entity: &E) -> StorageResult<E> {
        let sql = format!(
            "DELETE FROM {} WHERE {};",
            E::TABLE,
            key_predicate(E::KEY_COLUMNS, 0)
        );

        let changed = self
            .conn
            .execute(&sql, params_from_iter(E::key_values(&entity.key())))?;
        if changed == 0 {
            return Err(StorageError::ConcurrencyConflict(format!(
                "no {} row matched {} on delete",
                E::TABLE,
                entity.key()
            )));
        }

        Ok(entity.clone())
    }

    fn select_by_id(&self, key: E::Key) -> StorageResult<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {};",
            E::COLUMNS.join(", "),
            E::TABLE,
            key_predicate(E::KEY_COLUMNS, 0)
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(E::key_values(&key)))?;
        if let Some(row) = rows.next()? {
            return Ok(Some(E::from_row(row)?));
        }

        Ok(None)
    }

    fn select_all(&self) -> StorageResult<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {};",
            E::COLUMNS.join(", "),
            E::TABLE,
            E::ORDER_BY
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }

        Ok(entities)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        let failure = match &value {
            rusqlite::Error::SqliteFailure(failure, _) => Some((failure.code, failure.extended_code)),
            _ => None,
        };
        let Some((code, extended_code)) = failure else {
            return Self::Sql(value);
        };

        match extended_code {
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                Self::DuplicateKey(value.to_string())
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ForeignKeyViolation(value.to_string()),
            _ => match code {
                ErrorCode::ConstraintViolation => Self::ConstraintViolation(value.to_string()),
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    Self::Locked(value.to_string())
                }
                ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::DiskFull => Self::Unavailable(value.to_string()),
                _ => Self::Sql(value),
            },
        }
    }
}

fn key_predicate(key_columns: &[&str], offset: usize) -> String {
    key_columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", offset + index + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub(super) fn uuid_value(id: Uuid) -> Value {
    Value::Text(id.to_string())
}

pub(super) fn timestamp_value(date: DateTime<Utc>) -> Value {
    Value::Text(date.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

pub(super) fn text_value(text: &str) -> Value {
    Value::Text(text.to_string())
}

pub(super) fn parse_uuid(row: &Row<'_>, table: &str, column: &str) -> StorageResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        StorageError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

pub(super) fn parse_timestamp(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> StorageResult<DateTime<Utc>> {
    let text: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| {
            StorageError::InvalidData(format!("invalid timestamp `{text}` in {table}.{column}"))
        })
}
