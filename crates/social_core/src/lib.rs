//! Foundation services for the social platform backend.
//!
//! Every entity (posts, profiles, post reports, post impressions) goes
//! through the same validate-then-persist template in [`foundation`].

pub mod brokers;
pub mod config;
pub mod db;
pub mod foundation;
pub mod logging;
pub mod model;
pub mod services;

pub use brokers::{
    DateTimeBroker, LogLoggingBroker, LoggingBroker, SqliteRecord, SqliteStorageBroker,
    StorageBroker, StorageError, StorageResult, SystemDateTimeBroker,
};
pub use config::{ConfigError, CoreConfig, RecencyConfig, RecencyWindow};
pub use foundation::{
    ErrorKind, ErrorTier, FieldErrors, FoundationError, FoundationService, ServiceResult, Severity,
};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::post::{Post, PostId};
pub use model::post_impression::{Impression, PostImpression, PostImpressionKey};
pub use model::post_report::{PostReport, PostReportId};
pub use model::profile::{Gender, Profile, ProfileId};
pub use model::{Entity, EntityKey, FieldRule};
pub use services::{
    sqlite_service, PostImpressionService, PostReportService, PostService, ProfileService,
    SqliteService,
};

/// Minimal health-check API for smoke checks.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
