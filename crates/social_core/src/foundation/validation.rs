//! Pure validation passes over entities and keys.
//!
//! Each pass collects every violation instead of stopping at the first one;
//! callers turn the result into an error with `FieldErrors::into_result`.

use super::error::FieldErrors;
use crate::config::RecencyWindow;
use crate::model::rules::{
    is_invalid_date, DATE_NOT_RECENT, DATE_NOT_SAME_AS_CREATED, DATE_REQUIRED,
    DATE_SAME_AS_CREATED, DATE_SAME_AS_UPDATED, ID_REQUIRED,
};
use crate::model::{Entity, EntityKey, CREATED_DATE_FIELD, UPDATED_DATE_FIELD};
use chrono::{DateTime, Utc};

/// Evaluates the entity rule table plus the shared timestamp presence rules.
pub fn validate_fields<E: Entity>(entity: &E) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for rule in E::field_rules() {
        if let Some((field, message)) = rule.check(entity) {
            fields.add(field, message);
        }
    }

    if is_invalid_date(entity.created_date()) {
        fields.add(CREATED_DATE_FIELD, DATE_REQUIRED);
    }
    if is_invalid_date(entity.updated_date()) {
        fields.add(UPDATED_DATE_FIELD, DATE_REQUIRED);
    }

    fields
}

pub fn validate_on_add<E: Entity>(
    entity: &E,
    now: DateTime<Utc>,
    window: &RecencyWindow,
) -> FieldErrors {
    let mut fields = validate_fields(entity);

    if entity.updated_date() != entity.created_date() {
        fields.add(UPDATED_DATE_FIELD, DATE_NOT_SAME_AS_CREATED);
    }
    if !window.contains(entity.created_date(), now) {
        fields.add(CREATED_DATE_FIELD, DATE_NOT_RECENT);
    }

    fields
}

pub fn validate_on_modify<E: Entity>(
    entity: &E,
    now: DateTime<Utc>,
    window: &RecencyWindow,
) -> FieldErrors {
    let mut fields = validate_fields(entity);

    if entity.updated_date() == entity.created_date() {
        fields.add(UPDATED_DATE_FIELD, DATE_SAME_AS_CREATED);
    }
    if !window.contains(entity.updated_date(), now) {
        fields.add(UPDATED_DATE_FIELD, DATE_NOT_RECENT);
    }

    fields
}

/// Compares a submitted modification against the stored record.
///
/// `created_date` is immutable and `updated_date` must move forward from
/// the stored value.
pub fn validate_against_storage<E: Entity>(entity: &E, stored: &E) -> FieldErrors {
    let mut fields = FieldErrors::new();

    if entity.created_date() != stored.created_date() {
        fields.add(CREATED_DATE_FIELD, DATE_NOT_SAME_AS_CREATED);
    }
    if entity.updated_date() == stored.updated_date() {
        fields.add(UPDATED_DATE_FIELD, DATE_SAME_AS_UPDATED);
    }

    fields
}

pub fn validate_key<K: EntityKey>(key: &K) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for field in key.missing_fields() {
        fields.add(field, ID_REQUIRED);
    }
    fields
}
