use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum Role {
    #[default]
    #[serde(rename = "adopter")]
    #[display("adopter")]
    Adopter,
    #[serde(rename = "shelter")]
    #[display("shelter")]
    Shelter,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: Uuid,
    pub role: Role,
    /// Stored lowercased; unique across the users table
    pub email: String,
    /// Argon2 PHC string, never serialized outward
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub profile_image: String,
    // adopter fields
    pub living_type: Option<String>,
    pub has_yard: Option<bool>,
    pub household_members: Option<u32>,
    // shelter fields
    pub shelter_name: Option<String>,
    pub shelter_description: Option<String>,
    pub website: Option<String>,
    pub verified: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_shelter(&self) -> bool {
        self.role == Role::Shelter
    }

    pub fn is_adopter(&self) -> bool {
        self.role == Role::Adopter
    }

    /// View of another user's profile: identity and location only,
    /// plus the shelter card for shelter accounts
    pub fn to_public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            role: self.role,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            profile_image: self.profile_image.clone(),
            shelter_name: self.shelter_name.clone(),
            shelter_description: self.shelter_description.clone(),
            website: self.website.clone(),
            verified: self.verified,
        }
    }

    /// Summary embedded in shelter-facing application views
    pub fn to_applicant_summary(&self) -> ApplicantSummary {
        ApplicantSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
    pub profile_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelter_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}
