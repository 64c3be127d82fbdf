//! Declarative field rules shared by every entity table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const ID_REQUIRED: &str = "Id is required";
pub const TEXT_REQUIRED: &str = "Text is required";
pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_NOT_RECENT: &str = "Date is not recent";
pub const DATE_NOT_SAME_AS_CREATED: &str = "Date is not the same as CreatedDate";
pub const DATE_SAME_AS_CREATED: &str = "Date is the same as CreatedDate";
pub const DATE_SAME_AS_UPDATED: &str = "Date is the same as UpdatedDate";

/// One row of an entity rule table.
///
/// The rule is violated when `violated` returns `true`; `message` is then
/// recorded against `field`.
pub struct FieldRule<E> {
    pub field: &'static str,
    pub violated: fn(&E) -> bool,
    pub message: &'static str,
}

impl<E> FieldRule<E> {
    pub fn new(field: &'static str, violated: fn(&E) -> bool, message: &'static str) -> Self {
        Self {
            field,
            violated,
            message,
        }
    }

    /// Rule for a UUID field that must not be nil.
    pub fn required_id(field: &'static str, violated: fn(&E) -> bool) -> Self {
        Self::new(field, violated, ID_REQUIRED)
    }

    /// Rule for a text field that must not be blank.
    pub fn required_text(field: &'static str, violated: fn(&E) -> bool) -> Self {
        Self::new(field, violated, TEXT_REQUIRED)
    }

    pub fn check(&self, entity: &E) -> Option<(&'static str, &'static str)> {
        (self.violated)(entity).then_some((self.field, self.message))
    }
}

pub fn is_invalid_id(id: Uuid) -> bool {
    id.is_nil()
}

pub fn is_invalid_text(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn is_invalid_date(date: DateTime<Utc>) -> bool {
    date == DateTime::<Utc>::default()
}
