//! Post impression domain model.
//!
//! # Invariants
//! - A profile holds at most one impression per post; the pair
//!   (`post_id`, `profile_id`) is the identity.

use super::post::PostId;
use super::profile::ProfileId;
use super::rules::{is_invalid_id, FieldRule};
use super::{Entity, EntityKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impression {
    Like,
    Love,
    Dislike,
}

impl Impression {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Dislike => "dislike",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "love" => Some(Self::Love),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// Composite identity of a post impression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostImpressionKey {
    pub post_id: PostId,
    pub profile_id: ProfileId,
}

impl PostImpressionKey {
    pub fn new(post_id: PostId, profile_id: ProfileId) -> Self {
        Self {
            post_id,
            profile_id,
        }
    }
}

impl Display for PostImpressionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "post_id={} profile_id={}", self.post_id, self.profile_id)
    }
}

impl EntityKey for PostImpressionKey {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.post_id.is_nil() {
            missing.push("PostId");
        }
        if self.profile_id.is_nil() {
            missing.push("ProfileId");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImpression {
    pub post_id: PostId,
    pub profile_id: ProfileId,
    pub impression: Impression,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl PostImpression {
    pub fn new(
        post_id: PostId,
        profile_id: ProfileId,
        impression: Impression,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            profile_id,
            impression,
            created_date: now,
            updated_date: now,
        }
    }
}

impl Entity for PostImpression {
    type Key = PostImpressionKey;

    const NAME: &'static str = "PostImpression";

    fn key(&self) -> PostImpressionKey {
        PostImpressionKey::new(self.post_id, self.profile_id)
    }

    fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    fn updated_date(&self) -> DateTime<Utc> {
        self.updated_date
    }

    fn field_rules() -> Vec<FieldRule<Self>> {
        vec![
            FieldRule::required_id("PostId", |impression: &PostImpression| {
                is_invalid_id(impression.post_id)
            }),
            FieldRule::required_id("ProfileId", |impression: &PostImpression| {
                is_invalid_id(impression.profile_id)
            }),
        ]
    }
}
