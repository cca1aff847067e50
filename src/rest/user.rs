//! Account profile and favorites endpoints.
//!
//! `/profile` always acts on the caller; `/{userId}` is public and
//! answers with the sanitized projection unless the caller asks about
//! themselves.

use futures::TryStreamExt;
use ntex::web;
use serde_json::json;

use crate::{
    access, api, consts,
    errors::ApiError,
    rest::{AppState, forms, middleware::identity::MaybePrincipal, responses, utils},
};

async fn deserialize_profile_form(
    mut payload: ntex_multipart::Multipart,
) -> Result<forms::user::ProfileForm, ApiError> {
    let mut form = forms::user::ProfileForm::default();

    while let Ok(Some(field)) = payload.try_next().await {
        let content_disposition =
            utils::get_header_str_value(field.headers(), "content-disposition");
        let field_name = utils::get_field_name(&content_disposition);

        if field.content_type().essence_str().contains("image") && field_name == "profileImage" {
            let extension = utils::get_filename_extension(&content_disposition)
                .filter(|ext| consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
                .ok_or_else(|| ApiError::validation("Only image files are allowed"))?;

            let body = utils::get_bytes_value(field).await;
            if body.len() > consts::IMAGE_MAX_SIZE_BYTES {
                return Err(ApiError::validation("Each image must be 5MB or smaller"));
            }

            form.avatar = Some(forms::ImageUpload {
                filename_extension: extension,
                body,
            });

            continue;
        }

        let field_value = ammonia::clean(&utils::get_field_value(field).await);

        match field_name.as_str() {
            "firstName" => form.first_name = Some(field_value),
            "lastName" => form.last_name = Some(field_value),
            "phone" => form.phone = Some(field_value),
            "dateOfBirth" => form.date_of_birth = Some(field_value),
            "address" => form.address = Some(field_value),
            "city" => form.city = Some(field_value),
            "state" => form.state = Some(field_value),
            "zip" => form.zip = Some(field_value),
            "profileImage" => form.profile_image = Some(field_value),
            "livingType" => form.living_type = Some(field_value),
            "hasYard" => form.has_yard = Some(field_value),
            "householdMembers" => form.household_members = Some(field_value),
            "shelterName" => form.shelter_name = Some(field_value),
            "shelterDescription" => form.shelter_description = Some(field_value),
            "website" => form.website = Some(field_value),
            _ => {}
        }
    }

    Ok(form)
}

#[web::get("/profile")]
pub async fn get_profile(
    principal: access::Principal,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::get_user(principal.id, &app_state.repo).await?;

    Ok(responses::ok(&user, "Profile retrieved successfully"))
}

#[web::put("/profile")]
pub async fn update_profile(
    principal: access::Principal,
    payload: ntex_multipart::Multipart,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::get_user(principal.id, &app_state.repo).await?;

    let form = deserialize_profile_form(payload).await?;
    let (request, avatar) = form.into_parts()?;

    let avatar_url = match avatar {
        Some(upload) => utils::upload_images(
            &app_state.storage_service,
            consts::S3_USER_AVATARS_FOLDER,
            vec![upload],
        )
        .await?
        .pop(),
        None => None,
    };

    let updated = api::user::update_profile(user, request, avatar_url, &app_state.repo).await?;

    Ok(responses::ok(&updated, "Profile updated successfully"))
}

#[web::get("/favorites")]
pub async fn get_favorites(
    principal: access::Principal,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_ids = api::user::favorite_pet_ids(principal.id, &app_state.repo).await?;

    Ok(responses::ok(&pet_ids, "Favorites retrieved successfully"))
}

#[web::get("/favorites/pets")]
pub async fn get_favorite_pets(
    principal: access::Principal,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pets = api::user::favorite_pets(principal.id, &app_state.repo).await?;

    Ok(responses::ok(&pets, "Favorite pets retrieved successfully"))
}

#[web::post("/favorites/{petId}")]
pub async fn add_favorite(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    api::user::add_favorite(principal.id, pet_id, &app_state.repo).await?;

    Ok(responses::ok(
        &json!({ "favorited": true }),
        "Pet added to favorites",
    ))
}

#[web::delete("/favorites/{petId}")]
pub async fn remove_favorite(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    api::user::remove_favorite(principal.id, pet_id, &app_state.repo).await?;

    Ok(responses::ok(
        &json!({ "favorited": false }),
        "Pet removed from favorites",
    ))
}

#[web::get("/favorites/{petId}/check")]
pub async fn check_favorite(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    let favorited = api::user::is_favorited(principal.id, pet_id, &app_state.repo).await?;

    Ok(responses::ok(
        &json!({ "favorited": favorited }),
        "Favorite status retrieved successfully",
    ))
}

#[web::get("/{userId}")]
pub async fn get_user(
    principal: MaybePrincipal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_uuid_param(&path.0, "userId")?;

    // Owners see their whole record, everyone else the public projection
    if principal.0.is_some_and(|caller| caller.id == user_id) {
        let user = api::user::get_user(user_id, &app_state.repo).await?;
        return Ok(responses::ok(&user, "User retrieved successfully"));
    }

    let profile = api::user::public_profile(user_id, &app_state.repo).await?;

    Ok(responses::ok(&profile, "User retrieved successfully"))
}
