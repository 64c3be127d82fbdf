//! Post domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another post.
//! - `author` holds the display handle of the publishing profile.

use super::rules::{is_invalid_id, is_invalid_text, FieldRule};
use super::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PostId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Post body as written by the author.
    pub content: String,
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl Post {
    /// Creates a post with a generated id, stamped at `now`.
    pub fn new(content: impl Into<String>, author: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), content, author, now)
    }

    /// Creates a post with a caller-provided id, stamped at `now`.
    pub fn with_id(
        id: PostId,
        content: impl Into<String>,
        author: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            author: author.into(),
            created_date: now,
            updated_date: now,
        }
    }
}

impl Entity for Post {
    type Key = PostId;

    const NAME: &'static str = "Post";

    fn key(&self) -> PostId {
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
            FieldRule::required_id("Id", |post: &Post| is_invalid_id(post.id)),
            FieldRule::required_text("Content", |post: &Post| is_invalid_text(&post.content)),
            FieldRule::required_text("Author", |post: &Post| is_invalid_text(&post.author)),
        ]
    }
}
