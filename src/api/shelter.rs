//! # Shelter API Module
//!
//! Public shelter directory, the shelter detail page and the owner-only
//! statistics board. Profile edits reuse the user update path.

use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::{
        self,
        pet::{AdoptionStatus, Pet, Species},
    },
    repo,
};

/// Directory entry: the shelter account plus its listing counters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterCard {
    #[serde(flatten)]
    pub shelter: models::user::User,
    pub pet_count: usize,
    pub available_pets: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterWithPets {
    #[serde(flatten)]
    pub shelter: models::user::User,
    pub pets: Vec<Pet>,
    pub pet_count: usize,
    pub available_pets: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShelterStats {
    pub total_pets: usize,
    pub available: usize,
    pub pending: usize,
    pub adopted: usize,
    pub dogs: usize,
    pub cats: usize,
    pub others: usize,
}

fn count_available(pets: &[Pet]) -> usize {
    pets.iter()
        .filter(|pet| pet.adoption_status == AdoptionStatus::Available)
        .count()
}

/// Loads an account and insists it is a shelter; adopter ids answer the
/// same way as unknown ones.
pub async fn get_shelter(
    shelter_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<models::user::User, ApiError> {
    repo.get_user_by_id(shelter_id)
        .await?
        .filter(models::user::User::is_shelter)
        .ok_or_else(|| ApiError::NotFound("Shelter not found".to_string()))
}

/// Every shelter account with its listing counters, newest first.
pub async fn shelter_directory(
    repo: &repo::ImplAppRepo,
) -> Result<Vec<ShelterCard>, ApiError> {
    let shelters = repo.get_shelters().await?;

    let cards = shelters.into_iter().map(|shelter| async move {
        let pets = repo.get_pets_by_shelter(shelter.id).await?;

        Ok::<_, anyhow::Error>(ShelterCard {
            pet_count: pets.len(),
            available_pets: count_available(&pets),
            shelter,
        })
    });

    Ok(futures::future::try_join_all(cards).await?)
}

pub async fn shelter_with_pets(
    shelter_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<ShelterWithPets, ApiError> {
    let shelter = get_shelter(shelter_id, repo).await?;
    let pets = repo.get_pets_by_shelter(shelter_id).await?;

    Ok(ShelterWithPets {
        shelter,
        pet_count: pets.len(),
        available_pets: count_available(&pets),
        pets,
    })
}

/// Adoption-status and species breakdown of one shelter's listings.
pub async fn shelter_stats(
    shelter_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<ShelterStats, ApiError> {
    let pets = repo.get_pets_by_shelter(shelter_id).await?;

    let mut stats = ShelterStats {
        total_pets: pets.len(),
        available: 0,
        pending: 0,
        adopted: 0,
        dogs: 0,
        cats: 0,
        others: 0,
    };
    for pet in &pets {
        match pet.adoption_status {
            AdoptionStatus::Available => stats.available += 1,
            AdoptionStatus::Pending => stats.pending += 1,
            AdoptionStatus::Adopted => stats.adopted += 1,
        }
        match pet.species {
            Species::Dog => stats.dogs += 1,
            Species::Cat => stats.cats += 1,
            Species::Other => stats.others += 1,
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::repo::MockAppRepo;
    use mockall::predicate::eq;

    fn shelter_account() -> models::user::User {
        models::user::User {
            id: Uuid::new_v4(),
            role: Role::Shelter,
            shelter_name: Some("Paws Haven".to_string()),
            verified: Some(false),
            ..Default::default()
        }
    }

    fn pet(shelter_id: Uuid, species: Species, status: AdoptionStatus) -> Pet {
        Pet {
            id: Uuid::new_v4(),
            shelter_id,
            species,
            adoption_status: status,
            ..Default::default()
        }
    }

    #[ntex::test]
    async fn adopter_accounts_are_not_shelters() {
        let adopter = models::user::User {
            id: Uuid::new_v4(),
            role: Role::Adopter,
            ..Default::default()
        };
        let adopter_id = adopter.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_id()
            .with(eq(adopter_id))
            .returning(move |_| {
                let adopter = adopter.clone();
                Box::pin(async move { Ok(Some(adopter)) })
            });
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = get_shelter(adopter_id, &repo).await;

        assert!(result.is_err_and(
            |err| matches!(err, ApiError::NotFound(message) if message == "Shelter not found")
        ));
    }

    #[ntex::test]
    async fn directory_counts_listings_per_shelter() {
        let first = shelter_account();
        let second = shelter_account();
        let first_id = first.id;
        let second_id = second.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_get_shelters().returning(move || {
            let shelters = vec![first.clone(), second.clone()];
            Box::pin(async move { Ok(shelters) })
        });
        mock_repo
            .expect_get_pets_by_shelter()
            .with(eq(first_id))
            .returning(move |_| {
                let pets = vec![
                    pet(first_id, Species::Dog, AdoptionStatus::Available),
                    pet(first_id, Species::Cat, AdoptionStatus::Adopted),
                ];
                Box::pin(async move { Ok(pets) })
            });
        mock_repo
            .expect_get_pets_by_shelter()
            .with(eq(second_id))
            .returning(|_| Box::pin(async move { Ok(vec![]) }));
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let directory = shelter_directory(&repo).await.unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory[0].pet_count, 2);
        assert_eq!(directory[0].available_pets, 1);
        assert_eq!(directory[1].pet_count, 0);
    }

    #[ntex::test]
    async fn shelter_detail_embeds_the_pets() {
        let shelter = shelter_account();
        let shelter_id = shelter.id;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_id()
            .with(eq(shelter_id))
            .returning(move |_| {
                let shelter = shelter.clone();
                Box::pin(async move { Ok(Some(shelter)) })
            });
        mock_repo
            .expect_get_pets_by_shelter()
            .with(eq(shelter_id))
            .returning(move |_| {
                let pets = vec![pet(shelter_id, Species::Dog, AdoptionStatus::Available)];
                Box::pin(async move { Ok(pets) })
            });
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let detail = shelter_with_pets(shelter_id, &repo).await.unwrap();

        assert_eq!(detail.pets.len(), 1);
        assert_eq!(detail.pet_count, 1);
        assert_eq!(detail.available_pets, 1);
        assert_eq!(detail.shelter.shelter_name.as_deref(), Some("Paws Haven"));
    }

    #[ntex::test]
    async fn stats_break_down_status_and_species() {
        let shelter_id = Uuid::new_v4();

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pets_by_shelter()
            .with(eq(shelter_id))
            .returning(move |_| {
                let pets = vec![
                    pet(shelter_id, Species::Dog, AdoptionStatus::Available),
                    pet(shelter_id, Species::Dog, AdoptionStatus::Pending),
                    pet(shelter_id, Species::Cat, AdoptionStatus::Adopted),
                    pet(shelter_id, Species::Other, AdoptionStatus::Available),
                ];
                Box::pin(async move { Ok(pets) })
            });
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let stats = shelter_stats(shelter_id, &repo).await.unwrap();

        assert_eq!(
            stats,
            ShelterStats {
                total_pets: 4,
                available: 2,
                pending: 1,
                adopted: 1,
                dogs: 2,
                cats: 1,
                others: 1,
            }
        );
    }
}
