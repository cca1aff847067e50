//! # User API Module
//!
//! Profile reads and updates plus the favorites ledger. Profile updates
//! are restricted to a fixed field list so role, email and password can
//! never be changed through this path.

use serde::Deserialize;
use uuid::Uuid;

use crate::{errors::ApiError, models, repo};

pub async fn get_user(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<models::user::User, ApiError> {
    repo.get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Sanitized view of another account; adopters never see each other's
/// email or phone through this path.
pub async fn public_profile(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<models::user::PublicProfile, ApiError> {
    Ok(get_user(user_id, repo).await?.to_public_profile())
}

/// The updatable slice of a profile. Everything outside this list, role
/// and credentials included, is ignored by [`update_profile`].
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub profile_image: Option<String>,
    pub living_type: Option<String>,
    pub has_yard: Option<bool>,
    pub household_members: Option<u32>,
    pub shelter_name: Option<String>,
    pub shelter_description: Option<String>,
    pub website: Option<String>,
}

/// Applies the supplied fields on top of the stored account. A freshly
/// uploaded avatar URL wins over a `profile_image` sent in the body.
pub async fn update_profile(
    mut user: models::user::User,
    request: ProfileUpdateRequest,
    avatar_url: Option<String>,
    repo: &repo::ImplAppRepo,
) -> Result<models::user::User, ApiError> {
    if let Some(first_name) = request.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = request.last_name {
        user.last_name = last_name;
    }
    if let Some(phone) = request.phone {
        user.phone = phone;
    }
    if let Some(date_of_birth) = request.date_of_birth {
        user.date_of_birth = date_of_birth;
    }
    if let Some(address) = request.address {
        user.address = address;
    }
    if let Some(city) = request.city {
        user.city = city;
    }
    if let Some(state) = request.state {
        user.state = state;
    }
    if let Some(zip) = request.zip {
        user.zip = zip;
    }
    if let Some(profile_image) = avatar_url.or(request.profile_image) {
        user.profile_image = profile_image;
    }
    if let Some(living_type) = request.living_type {
        user.living_type = Some(living_type);
    }
    if let Some(has_yard) = request.has_yard {
        user.has_yard = Some(has_yard);
    }
    if let Some(household_members) = request.household_members {
        user.household_members = Some(household_members);
    }
    if let Some(shelter_name) = request.shelter_name {
        user.shelter_name = Some(shelter_name);
    }
    if let Some(shelter_description) = request.shelter_description {
        user.shelter_description = Some(shelter_description);
    }
    if let Some(website) = request.website {
        user.website = Some(website);
    }
    user.updated_at = chrono::Utc::now();

    repo.update_user(&user).await?;

    Ok(user)
}

/// Bookmarks a pet. Re-favoriting is a no-op at the store level, so the
/// original creation timestamp survives.
///
/// # Errors
/// * `NotFound` - unknown pet
pub async fn add_favorite(
    user_id: Uuid,
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<(), ApiError> {
    if repo.get_pet_by_id(pet_id).await?.is_none() {
        return Err(ApiError::NotFound("Pet not found".to_string()));
    }

    Ok(repo.insert_favorite(user_id, pet_id).await?)
}

/// Removes a bookmark; removing one that does not exist succeeds too.
pub async fn remove_favorite(
    user_id: Uuid,
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<(), ApiError> {
    Ok(repo.delete_favorite(user_id, pet_id).await?)
}

/// The user's favorite pet ids, newest bookmark first.
pub async fn favorite_pet_ids(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<Uuid>, ApiError> {
    Ok(repo
        .get_favorites_by_user(user_id)
        .await?
        .into_iter()
        .map(|favorite| favorite.pet_id)
        .collect())
}

/// The favorites hydrated into pets; bookmarks whose pet has since been
/// deleted are dropped silently.
pub async fn favorite_pets(
    user_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<models::pet::Pet>, ApiError> {
    let favorites = repo.get_favorites_by_user(user_id).await?;

    let lookups = favorites
        .into_iter()
        .map(|favorite| async move { repo.get_pet_by_id(favorite.pet_id).await });
    let pets = futures::future::try_join_all(lookups)
        .await
        .map_err(ApiError::from)?;

    Ok(pets.into_iter().flatten().collect())
}

pub async fn is_favorited(
    user_id: Uuid,
    pet_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<bool, ApiError> {
    Ok(repo.is_pet_favorited(user_id, pet_id).await?)
}
