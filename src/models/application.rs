use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{pet::PetSummary, user::ApplicantSummary};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "submitted")]
    #[display("submitted")]
    Submitted,
    #[serde(rename = "under_review")]
    #[display("under_review")]
    UnderReview,
    #[serde(rename = "approved")]
    #[display("approved")]
    Approved,
    #[serde(rename = "rejected")]
    #[display("rejected")]
    Rejected,
    #[serde(rename = "completed")]
    #[display("completed")]
    Completed,
}

impl ApplicationStatus {
    /// Legal transitions: `submitted → under_review → {approved, rejected}`
    /// plus the direct `submitted → {approved, rejected}` shortcut and
    /// `approved → completed`. `rejected` and `completed` are terminal.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (
                ApplicationStatus::Submitted,
                ApplicationStatus::UnderReview
                    | ApplicationStatus::Approved
                    | ApplicationStatus::Rejected
            ) | (
                ApplicationStatus::UnderReview,
                ApplicationStatus::Approved | ApplicationStatus::Rejected
            ) | (ApplicationStatus::Approved, ApplicationStatus::Completed)
        )
    }
}

/// Applicant details snapshotted at submission time
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LivingInfo {
    pub living_type: String,
    pub has_yard: bool,
    pub household_members: u32,
    pub other_pets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum ExperienceLevel {
    #[default]
    #[serde(rename = "beginner")]
    #[display("beginner")]
    Beginner,
    #[serde(rename = "intermediate")]
    #[display("intermediate")]
    Intermediate,
    #[serde(rename = "experienced")]
    #[display("experienced")]
    Experienced,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PetExperience {
    pub experience_level: ExperienceLevel,
    pub owned_pets: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pet_id: Uuid,
    /// Snapshotted from the pet at submission time
    pub shelter_id: Uuid,
    pub status: ApplicationStatus,
    pub personal_info: PersonalInfo,
    pub living_info: LivingInfo,
    pub pet_experience: PetExperience,
    pub references: Vec<Reference>,
    pub home_visit_required: bool,
    pub home_visit_completed: bool,
    pub home_visit_date: Option<DateTime<Utc>>,
    pub approval_date: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application plus the lookups its viewers need: adopters get the pet
/// card, shelters additionally get the applicant card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet: Option<PetSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_can_skip_review() {
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Approved));
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Rejected));
        assert!(ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::UnderReview));
    }

    #[test]
    fn rejected_and_completed_are_terminal() {
        for next in [
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Approved,
            ApplicationStatus::Completed,
        ] {
            assert!(!ApplicationStatus::Rejected.can_transition_to(next));
            assert!(!ApplicationStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn only_approved_reaches_completed() {
        assert!(ApplicationStatus::Approved.can_transition_to(ApplicationStatus::Completed));
        assert!(!ApplicationStatus::UnderReview.can_transition_to(ApplicationStatus::Completed));
        assert!(!ApplicationStatus::Submitted.can_transition_to(ApplicationStatus::Completed));
        assert!(!ApplicationStatus::Approved.can_transition_to(ApplicationStatus::Rejected));
    }
}
