//! Post report domain model.
//!
//! A report is filed by one profile against one post; both references must
//! exist in storage, which is enforced by the storage layer.

use super::post::PostId;
use super::profile::ProfileId;
use super::rules::{is_invalid_id, is_invalid_text, FieldRule};
use super::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PostReportId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReport {
    pub id: PostReportId,
    /// Free-text reason supplied by the reporter.
    pub details: String,
    pub post_id: PostId,
    pub reporter_id: ProfileId,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl PostReport {
    pub fn new(
        post_id: PostId,
        reporter_id: ProfileId,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            details: details.into(),
            post_id,
            reporter_id,
            created_date: now,
            updated_date: now,
        }
    }
}

impl Entity for PostReport {
    type Key = PostReportId;

    const NAME: &'static str = "PostReport";

    fn key(&self) -> PostReportId {
        self.id
    }

    fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    fn updated_date(&self) -> DateTime<Utc> {
        self.updated_date
    }

    fn field_rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::required_id("Id", |report: &PostReport| is_invalid_id(report.id)),
            FieldRule::required_text("Details", |report: &PostReport| {
                is_invalid_text(&report.details)
            }),
            FieldRule::required_id("PostId", |report: &PostReport| is_invalid_id(report.post_id)),
            FieldRule::required_id("ReporterId", |report: &PostReport| {
                is_invalid_id(report.reporter_id)
            }),
        ]
    }
}
