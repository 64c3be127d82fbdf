//! Table mappings for every persisted entity.

use super::sqlite::{parse_timestamp, parse_uuid, text_value, timestamp_value, uuid_value};
use super::{SqliteRecord, StorageError, StorageResult};
use crate::model::post::{Post, PostId};
use crate::model::post_impression::{Impression, PostImpression, PostImpressionKey};
use crate::model::post_report::{PostReport, PostReportId};
use crate::model::profile::{Gender, Profile, ProfileId};
use rusqlite::types::Value;
use rusqlite::Row;

impl SqliteRecord for Post {
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static [&'static str] =
        &["id", "content", "author", "created_date", "updated_date"];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const ORDER_BY: &'static str = "created_date ASC, id ASC";

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(self.id),
            text_value(&self.content),
            text_value(&self.author),
            timestamp_value(self.created_date),
            timestamp_value(self.updated_date),
        ]
    }

    fn key_values(key: &PostId) -> Vec<Value> {
        vec![uuid_value(*key)]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        Ok(Self {
            id: parse_uuid(row, Self::TABLE, "id")?,
            content: row.get("content")?,
            author: row.get("author")?,
            created_date: parse_timestamp(row, Self::TABLE, "created_date")?,
            updated_date: parse_timestamp(row, Self::TABLE, "updated_date")?,
        })
    }
}

impl SqliteRecord for Profile {
    const TABLE: &'static str = "profiles";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "middle_name",
        "last_name",
        "gender",
        "created_date",
        "updated_date",
    ];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const ORDER_BY: &'static str = "created_date ASC, id ASC";

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(self.id),
            text_value(&self.first_name),
            self.middle_name
                .as_deref()
                .map_or(Value::Null, text_value),
            text_value(&self.last_name),
            text_value(self.gender.as_str()),
            timestamp_value(self.created_date),
            timestamp_value(self.updated_date),
        ]
    }

    fn key_values(key: &ProfileId) -> Vec<Value> {
        vec![uuid_value(*key)]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let gender_text: String = row.get("gender")?;
        let gender = Gender::parse(&gender_text).ok_or_else(|| {
            StorageError::InvalidData(format!(
                "invalid gender `{gender_text}` in profiles.gender"
            ))
        })?;

        Ok(Self {
            id: parse_uuid(row, Self::TABLE, "id")?,
            first_name: row.get("first_name")?,
            middle_name: row.get("middle_name")?,
            last_name: row.get("last_name")?,
            gender,
            created_date: parse_timestamp(row, Self::TABLE, "created_date")?,
            updated_date: parse_timestamp(row, Self::TABLE, "updated_date")?,
        })
    }
}

impl SqliteRecord for PostReport {
    const TABLE: &'static str = "post_reports";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "details",
        "post_id",
        "reporter_id",
        "created_date",
        "updated_date",
    ];
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const ORDER_BY: &'static str = "created_date ASC, id ASC";

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(self.id),
            text_value(&self.details),
            uuid_value(self.post_id),
            uuid_value(self.reporter_id),
            timestamp_value(self.created_date),
            timestamp_value(self.updated_date),
        ]
    }

    fn key_values(key: &PostReportId) -> Vec<Value> {
        vec![uuid_value(*key)]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        Ok(Self {
            id: parse_uuid(row, Self::TABLE, "id")?,
            details: row.get("details")?,
            post_id: parse_uuid(row, Self::TABLE, "post_id")?,
            reporter_id: parse_uuid(row, Self::TABLE, "reporter_id")?,
            created_date: parse_timestamp(row, Self::TABLE, "created_date")?,
            updated_date: parse_timestamp(row, Self::TABLE, "updated_date")?,
        })
    }
}

impl SqliteRecord for PostImpression {
    const TABLE: &'static str = "post_impressions";
    const COLUMNS: &'static [&'static str] = &[
        "post_id",
        "profile_id",
        "impression",
        "created_date",
        "updated_date",
    ];
    const KEY_COLUMNS: &'static [&'static str] = &["post_id", "profile_id"];
    const ORDER_BY: &'static str = "created_date ASC, post_id ASC, profile_id ASC";

    fn to_values(&self) -> Vec<Value> {
        vec![
            uuid_value(self.post_id),
            uuid_value(self.profile_id),
            text_value(self.impression.as_str()),
            timestamp_value(self.created_date),
            timestamp_value(self.updated_date),
        ]
    }

    fn key_values(key: &PostImpressionKey) -> Vec<Value> {
        vec![uuid_value(key.post_id), uuid_value(key.profile_id)]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let impression_text: String = row.get("impression")?;
        let impression = Impression::parse(&impression_text).ok_or_else(|| {
            StorageError::InvalidData(format!(
                "invalid impression `{impression_text}` in post_impressions.impression"
            ))
        })?;

        Ok(Self {
            post_id: parse_uuid(row, Self::TABLE, "post_id")?,
            profile_id: parse_uuid(row, Self::TABLE, "profile_id")?,
            impression,
            created_date: parse_timestamp(row, Self::TABLE, "created_date")?,
            updated_date: parse_timestamp(row, Self::TABLE, "updated_date")?,
        })
    }
}
