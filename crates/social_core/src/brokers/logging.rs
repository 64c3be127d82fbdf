//! Failure reporting sink used by the foundation services.
//!
//! # Invariants
//! - Events are metadata-only: entity, tier, kind and offending field
//!   names. Field values never reach the log.

use crate::foundation::FoundationError;
use log::error;

pub trait LoggingBroker {
    fn log_error(&self, error: &FoundationError);
    fn log_critical(&self, error: &FoundationError);
}

impl<L: LoggingBroker + ?Sized> LoggingBroker for &L {
    fn log_error(&self, error: &FoundationError) {
        (**self).log_error(error)
    }

    fn log_critical(&self, error: &FoundationError) {
        (**self).log_critical(error)
    }
}

/// Forwards service failures to the `log` facade.
///
/// The facade has no critical level, so both severities are emitted at
/// `error` and distinguished by the `severity` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLoggingBroker;

impl LoggingBroker for LogLoggingBroker {
    fn log_error(&self, err: &FoundationError) {
        emit("error", err);
    }

    fn log_critical(&self, err: &FoundationError) {
        emit("critical", err);
    }
}

fn emit(severity: &str, err: &FoundationError) {
    error!("{}", failure_event(severity, err));
}

fn failure_event(severity: &str, err: &FoundationError) -> String {
    let fields = err.fields().field_names().collect::<Vec<_>>().join(",");
    format!(
        "event=service_failure module=foundation status=error severity={} entity={} tier={} kind={} fields=[{}] error={}",
        severity,
        err.entity(),
        err.tier(),
        err.kind(),
        fields,
        err.detail()
    )
}
