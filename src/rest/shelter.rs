//! Shelter directory endpoints. The directory and single-shelter pages
//! are public; profile edits and stats stay with the owning account.

use ntex::web;

use crate::{
    access::{self, Operation},
    api,
    rest::{AppState, responses, utils},
};

#[web::get("")]
pub async fn shelter_directory(
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelters = api::shelter::shelter_directory(&app_state.repo).await?;

    Ok(responses::ok(&shelters, "Shelters retrieved successfully"))
}

#[web::get("/{shelterId}")]
pub async fn get_shelter(
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelter_id = utils::parse_uuid_param(&path.0, "shelterId")?;

    let shelter = api::shelter::shelter_with_pets(shelter_id, &app_state.repo).await?;

    Ok(responses::ok(&shelter, "Shelter retrieved successfully"))
}

/// Shelter profiles reuse the account fields; the ownership check runs
/// before the account lookup so strangers learn nothing from the 403.
#[web::put("/{shelterId}")]
pub async fn update_shelter(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    form: web::types::Json<api::user::ProfileUpdateRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelter_id = utils::parse_uuid_param(&path.0, "shelterId")?;

    access::authorize(&principal, Operation::UpdateShelter { shelter: shelter_id })?;

    let shelter = api::shelter::get_shelter(shelter_id, &app_state.repo).await?;
    let updated = api::user::update_profile(shelter, form.0, None, &app_state.repo).await?;

    Ok(responses::ok(&updated, "Shelter updated successfully"))
}

#[web::get("/{shelterId}/stats")]
pub async fn shelter_stats(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelter_id = utils::parse_uuid_param(&path.0, "shelterId")?;

    access::authorize(&principal, Operation::ViewShelterStats { shelter: shelter_id })?;

    let stats = api::shelter::shelter_stats(shelter_id, &app_state.repo).await?;

    Ok(responses::ok(
        &stats,
        "Shelter statistics retrieved successfully",
    ))
}
