//! Profile domain model.

use super::rules::{is_invalid_id, is_invalid_text, FieldRule};
use super::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProfileId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Public identity of a platform member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            gender,
            created_date: now,
            updated_date: now,
        }
    }
}

impl Entity for Profile {
    type Key = ProfileId;

    const NAME: &'static str = "Profile";

    fn key(&self) -> ProfileId {
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
            FieldRule::required_id("Id", |profile: &Profile| is_invalid_id(profile.id)),
            FieldRule::required_text("FirstName", |profile: &Profile| {
                is_invalid_text(&profile.first_name)
            }),
            FieldRule::required_text("LastName", |profile: &Profile| {
                is_invalid_text(&profile.last_name)
            }),
        ]
    }
}
