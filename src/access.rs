//! Authorization policy for every owner- or role-scoped operation.
//!
//! Handlers build an [Operation] carrying the ownership ids the check needs
//! and call [authorize] with the caller's [Principal]; the whole
//! role × ownership table lives in this one match instead of being
//! re-derived inside each handler.

use uuid::Uuid;

use crate::{errors::ApiError, models::user::Role};

/// Authenticated caller identity resolved by the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// Owner-scoped operations; each variant carries the ids ownership is
/// checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePet,
    UpdatePet { owner: Uuid },
    DeletePet { owner: Uuid },
    CreateApplication,
    ViewApplication { applicant: Uuid, shelter: Uuid },
    ListUserApplications { user: Uuid },
    ListPetApplications { pet_owner: Uuid },
    ListShelterApplications { shelter: Uuid },
    UpdateApplication { applicant: Uuid, shelter: Uuid },
    UpdateApplicationStatus { shelter: Uuid },
    DeleteApplication { applicant: Uuid },
    UpdateShelter { shelter: Uuid },
    ViewShelterStats { shelter: Uuid },
}

/// Single entry point for the role/ownership table. `Ok(())` means the
/// principal may perform the operation; the error is the 403 sent back.
pub fn authorize(principal: &Principal, operation: Operation) -> Result<(), ApiError> {
    let allowed = match operation {
        Operation::CreatePet => principal.role == Role::Shelter,
        Operation::UpdatePet { owner } => principal.role == Role::Shelter && principal.id == owner,
        Operation::DeletePet { owner } => principal.role == Role::Shelter && principal.id == owner,
        Operation::CreateApplication => principal.role == Role::Adopter,
        // adopters see their own, shelters the ones filed against them
        Operation::ViewApplication { applicant, shelter } => match principal.role {
            Role::Adopter => principal.id == applicant,
            Role::Shelter => principal.id == shelter,
        },
        // any shelter may review an applicant's history
        Operation::ListUserApplications { user } => {
            principal.id == user || principal.role == Role::Shelter
        }
        Operation::ListPetApplications { pet_owner } => {
            principal.role == Role::Shelter && principal.id == pet_owner
        }
        Operation::ListShelterApplications { shelter } => {
            principal.role == Role::Shelter && principal.id == shelter
        }
        Operation::UpdateApplication { applicant, shelter } => {
            principal.id == applicant
                || (principal.role == Role::Shelter && principal.id == shelter)
        }
        Operation::UpdateApplicationStatus { shelter } => {
            principal.role == Role::Shelter && principal.id == shelter
        }
        Operation::DeleteApplication { applicant } => {
            principal.role == Role::Adopter && principal.id == applicant
        }
        Operation::UpdateShelter { shelter } => {
            principal.role == Role::Shelter && principal.id == shelter
        }
        Operation::ViewShelterStats { shelter } => {
            principal.role == Role::Shelter && principal.id == shelter
        }
    };

    if allowed {
        return Ok(());
    }

    Err(ApiError::Forbidden(denial_message(operation).to_string()))
}

fn denial_message(operation: Operation) -> &'static str {
    match operation {
        Operation::CreatePet => "Access denied. Shelter account required.",
        Operation::UpdatePet { .. } => "Unauthorized to update this pet",
        Operation::DeletePet { .. } => "Unauthorized to delete this pet",
        Operation::CreateApplication => "Access denied. Adopter account required.",
        Operation::ViewApplication { .. } => "Unauthorized to view this application",
        _ => "Unauthorized",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelter(id: Uuid) -> Principal {
        Principal::new(id, Role::Shelter)
    }

    fn adopter(id: Uuid) -> Principal {
        Principal::new(id, Role::Adopter)
    }

    #[test]
    fn only_shelters_create_pets() {
        let id = Uuid::new_v4();

        assert!(authorize(&shelter(id), Operation::CreatePet).is_ok());
        assert!(authorize(&adopter(id), Operation::CreatePet).is_err());
    }

    #[test]
    fn pet_mutations_require_the_owning_shelter() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(authorize(&shelter(owner), Operation::UpdatePet { owner }).is_ok());
        assert!(authorize(&shelter(other), Operation::UpdatePet { owner }).is_err());
        assert!(authorize(&adopter(owner), Operation::DeletePet { owner }).is_err());
    }

    #[test]
    fn application_view_is_owner_or_owning_shelter() {
        let applicant = Uuid::new_v4();
        let shelter_id = Uuid::new_v4();
        let op = Operation::ViewApplication {
            applicant,
            shelter: shelter_id,
        };

        assert!(authorize(&adopter(applicant), op).is_ok());
        assert!(authorize(&shelter(shelter_id), op).is_ok());
        assert!(authorize(&adopter(Uuid::new_v4()), op).is_err());
        assert!(authorize(&shelter(Uuid::new_v4()), op).is_err());
    }

    #[test]
    fn any_shelter_may_list_a_users_applications() {
        let user = Uuid::new_v4();

        assert!(authorize(&adopter(user), Operation::ListUserApplications { user }).is_ok());
        assert!(
            authorize(
                &shelter(Uuid::new_v4()),
                Operation::ListUserApplications { user }
            )
            .is_ok()
        );
        assert!(
            authorize(
                &adopter(Uuid::new_v4()),
                Operation::ListUserApplications { user }
            )
            .is_err()
        );
    }

    #[test]
    fn free_form_update_allows_creator_and_owning_shelter() {
        let applicant = Uuid::new_v4();
        let shelter_id = Uuid::new_v4();
        let op = Operation::UpdateApplication {
            applicant,
            shelter: shelter_id,
        };

        assert!(authorize(&adopter(applicant), op).is_ok());
        assert!(authorize(&shelter(shelter_id), op).is_ok());
        assert!(authorize(&shelter(Uuid::new_v4()), op).is_err());
    }

    #[test]
    fn delete_is_creator_only_even_for_the_owning_shelter() {
        let applicant = Uuid::new_v4();

        assert!(authorize(&adopter(applicant), Operation::DeleteApplication { applicant }).is_ok());
        assert!(
            authorize(&shelter(applicant), Operation::DeleteApplication { applicant }).is_err()
        );
    }

    #[test]
    fn shelter_self_scope_for_profile_and_stats() {
        let shelter_id = Uuid::new_v4();

        assert!(
            authorize(
                &shelter(shelter_id),
                Operation::UpdateShelter {
                    shelter: shelter_id
                }
            )
            .is_ok()
        );
        assert!(
            authorize(
                &shelter(Uuid::new_v4()),
                Operation::ViewShelterStats {
                    shelter: shelter_id
                }
            )
            .is_err()
        );
        assert!(
            authorize(
                &adopter(shelter_id),
                Operation::UpdateShelter {
                    shelter: shelter_id
                }
            )
            .is_err()
        );
    }
}
