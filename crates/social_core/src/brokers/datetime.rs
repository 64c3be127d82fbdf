//! Clock access for recency checks.

use chrono::{DateTime, Utc};

pub trait DateTimeBroker {
    fn current_date_time(&self) -> DateTime<Utc>;
}

impl<T: DateTimeBroker + ?Sized> DateTimeBroker for &T {
    fn current_date_time(&self) -> DateTime<Utc> {
        (**self).current_date_time()
    }
}

/// Reads the system wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateTimeBroker;

impl DateTimeBroker for SystemDateTimeBroker {
    fn current_date_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
