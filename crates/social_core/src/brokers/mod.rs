//! External collaborators consumed by the foundation services.
//!
//! # Responsibility
//! - Define the narrow storage, date-time and logging contracts.
//! - Ship default implementations (SQLite, system clock, `log` facade).
//!
//! # Invariants
//! - Brokers never translate errors; the storage broker surfaces native
//!   storage failures as `StorageError` for the service to classify.

pub mod datetime;
pub mod logging;
pub mod storage;

pub use datetime::{DateTimeBroker, SystemDateTimeBroker};
pub use logging::{LogLoggingBroker, LoggingBroker};
pub use storage::{SqliteRecord, SqliteStorageBroker, StorageBroker, StorageError, StorageResult};
