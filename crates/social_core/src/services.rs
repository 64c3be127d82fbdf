//! Per-entity instantiations of the foundation service.
//!
//! # Invariants
//! - No entity has service code of its own; behavior differs only through
//!   the entity rule table and the configured recency window.

use crate::brokers::{LogLoggingBroker, SqliteRecord, SqliteStorageBroker, SystemDateTimeBroker};
use crate::config::RecencyConfig;
use crate::foundation::FoundationService;
use crate::model::post::Post;
use crate::model::post_impression::PostImpression;
use crate::model::post_report::PostReport;
use crate::model::profile::Profile;
use rusqlite::Connection;

pub type PostService<S, T, L> = FoundationService<Post, S, T, L>;
pub type ProfileService<S, T, L> = FoundationService<Profile, S, T, L>;
pub type PostReportService<S, T, L> = FoundationService<PostReport, S, T, L>;
pub type PostImpressionService<S, T, L> = FoundationService<PostImpression, S, T, L>;

/// Foundation service wired to SQLite, the system clock and the `log` facade.
pub type SqliteService<'conn, E> =
    FoundationService<E, SqliteStorageBroker<'conn>, SystemDateTimeBroker, LogLoggingBroker>;

/// Builds a production service for `E` over a migrated connection.
pub fn sqlite_service<'conn, E: SqliteRecord>(
    conn: &'conn Connection,
    recency: &RecencyConfig,
) -> SqliteService<'conn, E> {
    FoundationService::from_config(
        SqliteStorageBroker::new(conn),
        SystemDateTimeBroker,
        LogLoggingBroker,
        recency,
    )
}
