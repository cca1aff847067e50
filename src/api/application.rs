//! # Application API Module
//!
//! Adoption application lifecycle: submission, the review state machine
//! and its pet side effects, free-form home-visit updates, deletion, and
//! the hydrated views adopters and shelters read.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::auth,
    errors::ApiError,
    models::{
        application::{
            Application, ApplicationStatus, ApplicationView, ExperienceLevel, LivingInfo,
            PersonalInfo, PetExperience, Reference,
        },
        pet::AdoptionStatus,
    },
    repo,
};

/// Submission payload. `experience_level` stays a raw string so an unknown
/// level surfaces as a validation message instead of a deserialization
/// failure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApplicationRequest {
    pub pet_id: Uuid,
    pub personal_info: PersonalInfo,
    pub living_info: LivingInfo,
    pub pet_experience: PetExperienceRequest,
    pub references: Vec<Reference>,
    pub home_visit_required: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PetExperienceRequest {
    pub experience_level: String,
    pub owned_pets: String,
    pub reason: String,
}

impl CreateApplicationRequest {
    fn validate(&self) -> Result<PetExperience, ApiError> {
        let mut errors = vec![];

        if self.pet_id.is_nil() {
            errors.push("Pet ID is required".to_string());
        }
        if self.personal_info.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.personal_info.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        if !auth::is_valid_email(&self.personal_info.email) {
            errors.push("Valid email is required".to_string());
        }
        if self.personal_info.phone.trim().is_empty() {
            errors.push("Phone is required".to_string());
        }
        if self.living_info.living_type.trim().is_empty() {
            errors.push("Living type is required".to_string());
        }
        if self.living_info.household_members < 1 {
            errors.push("Valid household members count required".to_string());
        }

        let level = serde_json::from_str::<ExperienceLevel>(&format!(
            "\"{}\"",
            self.pet_experience.experience_level
        ));
        if level.is_err() {
            errors.push("Valid experience level required".to_string());
        }

        match level {
            Ok(experience_level) if errors.is_empty() => Ok(PetExperience {
                experience_level,
                owned_pets: self.pet_experience.owned_pets.clone(),
                reason: self.pet_experience.reason.clone(),
            }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

/// Submits an adoption application for an available pet.
///
/// The shelter id is snapshotted from the pet so later pet edits cannot
/// re-route the application. The insert also marks the pet pending.
///
/// # Errors
/// * `Validation` - malformed fields per the rules above
/// * `NotFound` - unknown pet
/// * `Conflict` - pet not available, or the adopter already applied
pub async fn create_application(
    user_id: Uuid,
    request: CreateApplicationRequest,
    repo: &repo::ImplAppRepo,
) -> Result<Application, ApiError> {
    let pet_experience = request.validate()?;

    let Some(pet) = repo.get_pet_by_id(request.pet_id).await? else {
        return Err(ApiError::NotFound("Pet not found".to_string()));
    };
    if pet.adoption_status != AdoptionStatus::Available {
        return Err(ApiError::Conflict(
            "Pet is not available for adoption".to_string(),
        ));
    }
    if repo.has_user_applied(user_id, pet.id).await? {
        return Err(ApiError::Conflict(
            "You have already applied for this pet".to_string(),
        ));
    }

    let now = Utc::now();
    let application = Application {
        id: Uuid::new_v4(),
        user_id,
        pet_id: pet.id,
        shelter_id: pet.shelter_id,
        status: ApplicationStatus::Submitted,
        personal_info: request.personal_info,
        living_info: request.living_info,
        pet_experience,
        references: request.references,
        home_visit_required: request.home_visit_required,
        home_visit_completed: false,
        home_visit_date: None,
        approval_date: None,
        rejection_reason: None,
        created_at: now,
        updated_at: now,
    };

    repo.insert_application(&application).await?;

    Ok(application)
}

pub async fn get_application(
    application_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Application, ApiError> {
    repo.get_application_by_id(application_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))
}

/// Detail view: the application plus its pet and applicant cards. Either
/// lookup may come back empty when the referenced row is gone.
pub async fn application_view(
    application: Application,
    repo: &repo::ImplAppRepo,
) -> Result<ApplicationView, ApiError> {
    let pet = repo
        .get_pet_by_id(application.pet_id)
        .await?
        .map(|pet| pet.to_summary());
    let applicant = repo
        .get_user_by_id(application.user_id)
        .await?
        .map(|user| user.to_applicant_summary());

    Ok(ApplicationView {
        application,
        pet,
        applicant,
    })
}

/// An adopter's applications, newest first, each with its pet card.
pub async fn applications_by_user(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<ApplicationView>, ApiError> {
    let applications = repo.get_applications_by_user(user_id).await?;

    hydrate(applications, true, false, repo).await
}

/// Applications filed for one pet, each with its applicant card.
pub async fn applications_by_pet(
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<ApplicationView>, ApiError> {
    let applications = repo.get_applications_by_pet(pet_id).await?;

    hydrate(applications, false, true, repo).await
}

/// Everything filed against one shelter, with pet and applicant cards.
pub async fn applications_by_shelter(
    shelter_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<ApplicationView>, ApiError> {
    let applications = repo.get_applications_by_shelter(shelter_id).await?;

    hydrate(applications, true, true, repo).await
}

async fn hydrate(
    applications: Vec<Application>,
    with_pet: bool,
    with_applicant: bool,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<ApplicationView>, ApiError> {
    let views = applications.into_iter().map(|application| async move {
        let pet = match with_pet {
            true => repo
                .get_pet_by_id(application.pet_id)
                .await?
                .map(|pet| pet.to_summary()),
            false => None,
        };
        let applicant = match with_applicant {
            true => repo
                .get_user_by_id(application.user_id)
                .await?
                .map(|user| user.to_applicant_summary()),
            false => None,
        };

        Ok::<_, anyhow::Error>(ApplicationView {
            application,
            pet,
            applicant,
        })
    });

    Ok(futures::future::try_join_all(views).await?)
}

/// Review decision payload. `status` stays raw for the same reason as
/// registration's `user_type`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusUpdateRequest {
    pub status: String,
    pub rejection_reason: Option<String>,
}

/// Moves an application through the review state machine and applies the
/// pet side effects.
///
/// # Process
/// 1. Reject transitions outside the state machine
/// 2. Persist the new status (`approved` also stamps `approval_date`,
///    `rejected` records the reason when one is given)
/// 3. `approved`: pet becomes adopted by the applicant
/// 4. `rejected`: pet reverts to available only when no other submitted
///    application remains for it
///
/// # Errors
/// * `Validation` - unknown status value
/// * `Conflict` - transition not allowed from the current status
pub async fn update_status(
    mut application: Application,
    request: StatusUpdateRequest,
    repo: &repo::ImplAppRepo,
) -> Result<Application, ApiError> {
    let next = serde_json::from_str::<ApplicationStatus>(&format!("\"{}\"", request.status))
        .map_err(|_| {
            ApiError::validation(
                "Status must be submitted, under_review, approved, rejected, or completed",
            )
        })?;

    if !application.status.can_transition_to(next) {
        return Err(ApiError::Conflict(format!(
            "Cannot change application status from {} to {}",
            application.status, next
        )));
    }

    let now = Utc::now();
    application.status = next;
    application.updated_at = now;
    if next == ApplicationStatus::Approved {
        application.approval_date = Some(now);
    }
    if next == ApplicationStatus::Rejected {
        if let Some(reason) = request
            .rejection_reason
            .filter(|reason| !reason.trim().is_empty())
        {
            application.rejection_reason = Some(reason);
        }
    }

    repo.update_application(&application).await?;

    match next {
        ApplicationStatus::Approved => {
            repo.set_pet_adoption_status(
                application.pet_id,
                AdoptionStatus::Adopted,
                Some(application.user_id),
            )
            .await?;
        }
        ApplicationStatus::Rejected => {
            let others_waiting = repo
                .get_applications_by_pet(application.pet_id)
                .await?
                .iter()
                .any(|other| {
                    other.id != application.id && other.status == ApplicationStatus::Submitted
                });
            if !others_waiting {
                repo.set_pet_adoption_status(application.pet_id, AdoptionStatus::Available, None)
                    .await?;
            }
        }
        _ => {}
    }

    Ok(application)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationUpdateRequest {
    pub home_visit_required: Option<bool>,
    pub home_visit_completed: Option<bool>,
    pub home_visit_date: Option<DateTime<Utc>>,
}

/// Applies the home-visit fields. Everything else on the application,
/// status included, is out of reach of this path.
pub async fn update_application(
    mut application: Application,
    request: ApplicationUpdateRequest,
    repo: &repo::ImplAppRepo,
) -> Result<Application, ApiError> {
    if let Some(required) = request.home_visit_required {
        application.home_visit_required = required;
    }
    if let Some(completed) = request.home_visit_completed {
        application.home_visit_completed = completed;
    }
    if let Some(date) = request.home_visit_date {
        application.home_visit_date = Some(date);
    }
    application.updated_at = Utc::now();

    repo.update_application(&application).await?;

    Ok(application)
}

/// Withdraws a submitted application. When it was the pet's last
/// application the pet goes back on the market.
///
/// # Errors
/// * `Conflict` - the application already moved past `submitted`
pub async fn delete_application(
    application: Application,
    repo: &repo::ImplAppRepo,
) -> Result<(), ApiError> {
    if application.status != ApplicationStatus::Submitted {
        return Err(ApiError::Conflict(
            "Cannot delete application that is under review or completed".to_string(),
        ));
    }

    repo.delete_application(application.id).await?;

    let remaining = repo.get_applications_by_pet(application.pet_id).await?;
    if remaining.is_empty() {
        repo.set_pet_adoption_status(application.pet_id, AdoptionStatus::Available, None)
            .await?;
    }

    Ok(())
}
