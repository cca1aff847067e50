//! Pet catalog endpoints.
//!
//! Browsing is public; create/update/delete require the owning shelter.
//! Listings are created and edited through multipart forms because the
//! images travel in the same request as the fields.

use futures::TryStreamExt;
use ntex::web;
use serde::Deserialize;

use crate::{
    access::{self, Operation},
    api, consts,
    errors::ApiError,
    rest::{AppState, forms, responses, utils},
};

async fn deserialize_pet_form(
    mut payload: ntex_multipart::Multipart,
) -> Result<forms::pet::PetForm, ApiError> {
    let mut form = forms::pet::PetForm::default();

    while let Ok(Some(field)) = payload.try_next().await {
        let content_disposition =
            utils::get_header_str_value(field.headers(), "content-disposition");
        let field_name = utils::get_field_name(&content_disposition);

        if field.content_type().essence_str().contains("image") && field_name == "images" {
            if form.images.len() >= consts::PET_IMAGES_MAX_COUNT {
                return Err(ApiError::validation("A maximum of 10 images is allowed"));
            }

            let extension = utils::get_filename_extension(&content_disposition)
                .filter(|ext| consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
                .ok_or_else(|| ApiError::validation("Only image files are allowed"))?;

            let body = utils::get_bytes_value(field).await;
            if body.len() > consts::IMAGE_MAX_SIZE_BYTES {
                return Err(ApiError::validation("Each image must be 5MB or smaller"));
            }

            form.images.push(forms::ImageUpload {
                filename_extension: extension,
                body,
            });

            continue;
        }

        let field_value = utils::get_field_value(field).await;

        match field_name.as_str() {
            "name" => form.name = Some(ammonia::clean(&field_value)),
            "species" => form.species = Some(field_value),
            "breed" => form.breed = Some(ammonia::clean(&field_value)),
            "age" => form.age = Some(field_value),
            "weight" => form.weight = Some(field_value),
            "gender" => form.gender = Some(field_value),
            "description" => form.description = Some(ammonia::clean(&field_value)),
            "shortDescription" => form.short_description = Some(ammonia::clean(&field_value)),
            // JSON sub-fields are parsed, not sanitized
            "characteristics" => form.characteristics = Some(field_value),
            "city" => form.city = Some(ammonia::clean(&field_value)),
            "state" => form.state = Some(ammonia::clean(&field_value)),
            "adoptionStatus" => form.adoption_status = Some(field_value),
            "existingImages" => form.existing_images = Some(field_value),
            _ => {}
        }
    }

    Ok(form)
}

#[web::get("")]
pub async fn get_pets(
    query: web::types::Query<api::pet::SearchQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let result = api::pet::search_pets(&query, &app_state.repo).await?;

    Ok(responses::paginated(&result, "Pets retrieved successfully"))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct QuickSearchQuery {
    pub query: Option<String>,
}

#[web::get("/search")]
pub async fn search_pets(
    query: web::types::Query<QuickSearchQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::pet::quick_search(query.query.clone(), &app_state.repo).await?;

    Ok(responses::ok(&pets, "Search results retrieved"))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FeaturedQuery {
    pub limit: Option<String>,
}

#[web::get("/featured")]
pub async fn featured_pets(
    query: web::types::Query<FeaturedQuery>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let limit = query.limit.as_deref().and_then(|raw| raw.parse().ok());
    let pets = api::pet::featured_pets(limit, &app_state.repo).await?;

    Ok(responses::ok(&pets, "Featured pets retrieved successfully"))
}

#[web::get("/by-shelter/{shelterId}")]
pub async fn pets_by_shelter(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelter_id = utils::parse_uuid_param(&path.0, "shelterId")?;
    let pets = api::pet::pets_by_shelter(shelter_id, &app_state.repo).await?;

    Ok(responses::ok(&pets, "Shelter pets retrieved successfully"))
}

#[web::get("/{petId}")]
pub async fn get_pet(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;
    let pet = api::pet::get_pet(pet_id, &app_state.repo).await?;

    Ok(responses::ok(&pet, "Pet retrieved successfully"))
}

#[web::get("/{petId}/similar")]
pub async fn similar_pets(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;
    let pets = api::pet::similar_pets(pet_id, &app_state.repo).await?;

    Ok(responses::ok(&pets, "Similar pets retrieved successfully"))
}

#[web::post("")]
pub async fn create_pet(
    principal: access::Principal,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    access::authorize(&principal, Operation::CreatePet)?;

    let mut form = deserialize_pet_form(payload).await?;

    let images = std::mem::take(&mut form.images);
    if images.is_empty() {
        return Err(ApiError::Conflict("At least 1 image is required".to_string()).into());
    }

    // fields are validated before the uploads are paid for
    let mut pet = form.into_new_pet(principal.id)?;
    pet.images =
        utils::upload_images(&app_state.storage_service, consts::S3_PET_IMAGES_FOLDER, images)
            .await?;

    let pet = api::pet::create_pet(pet, &app_state.repo).await?;

    Ok(responses::created(&pet, "Pet created successfully"))
}

#[web::put("/{petId}")]
pub async fn update_pet(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    let mut pet = api::pet::get_pet(pet_id, &app_state.repo).await?;
    access::authorize(&principal, Operation::UpdatePet { owner: pet.shelter_id })?;

    let mut form = deserialize_pet_form(payload).await?;

    let images = std::mem::take(&mut form.images);
    let new_image_urls =
        utils::upload_images(&app_state.storage_service, consts::S3_PET_IMAGES_FOLDER, images)
            .await?;
    form.apply_to(&mut pet, new_image_urls)?;

    let pet = api::pet::update_pet(pet, &app_state.repo).await?;

    Ok(responses::ok(&pet, "Pet updated successfully"))
}

#[web::delete("/{petId}")]
pub async fn delete_pet(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    let pet = api::pet::get_pet(pet_id, &app_state.repo).await?;
    access::authorize(&principal, Operation::DeletePet { owner: pet.shelter_id })?;

    api::pet::delete_pet(&pet, &app_state.repo, &app_state.storage_service).await?;

    Ok(responses::ok_empty("Pet deleted successfully"))
}
