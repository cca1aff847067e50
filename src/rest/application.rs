//! Adoption application endpoints. Every route is authenticated; the
//! policy table decides who may see or move each application.

use ntex::web;

use crate::{
    access::{self, Operation},
    api,
    rest::{AppState, responses, utils},
};

#[web::post("")]
pub async fn create_application(
    principal: access::Principal,
    form: web::types::Json<api::application::CreateApplicationRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    access::authorize(&principal, Operation::CreateApplication)?;

    let application =
        api::application::create_application(principal.id, form.0, &app_state.repo).await?;

    Ok(responses::created(
        &application,
        "Application submitted successfully",
    ))
}

#[web::get("/{applicationId}")]
pub async fn get_application(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let application_id = utils::parse_uuid_param(&path.0, "applicationId")?;

    let application = api::application::get_application(application_id, &app_state.repo).await?;
    access::authorize(
        &principal,
        Operation::ViewApplication {
            applicant: application.user_id,
            shelter: application.shelter_id,
        },
    )?;

    let view = api::application::application_view(application, &app_state.repo).await?;

    Ok(responses::ok(&view, "Application retrieved successfully"))
}

#[web::get("/user/{userId}")]
pub async fn applications_by_user(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user_id = utils::parse_uuid_param(&path.0, "userId")?;

    access::authorize(&principal, Operation::ListUserApplications { user: user_id })?;

    let views = api::application::applications_by_user(user_id, &app_state.repo).await?;

    Ok(responses::ok(
        &views,
        "User applications retrieved successfully",
    ))
}

#[web::get("/pet/{petId}")]
pub async fn applications_by_pet(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let pet_id = utils::parse_uuid_param(&path.0, "petId")?;

    let pet = api::pet::get_pet(pet_id, &app_state.repo).await?;
    access::authorize(
        &principal,
        Operation::ListPetApplications { pet_owner: pet.shelter_id },
    )?;

    let views = api::application::applications_by_pet(pet_id, &app_state.repo).await?;

    Ok(responses::ok(
        &views,
        "Pet applications retrieved successfully",
    ))
}

#[web::get("/shelter/{shelterId}")]
pub async fn applications_by_shelter(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let shelter_id = utils::parse_uuid_param(&path.0, "shelterId")?;

    access::authorize(
        &principal,
        Operation::ListShelterApplications { shelter: shelter_id },
    )?;

    let views = api::application::applications_by_shelter(shelter_id, &app_state.repo).await?;

    Ok(responses::ok(
        &views,
        "Shelter applications retrieved successfully",
    ))
}

#[web::put("/{applicationId}")]
pub async fn update_application(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    form: web::types::Json<api::application::ApplicationUpdateRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let application_id = utils::parse_uuid_param(&path.0, "applicationId")?;

    let application = api::application::get_application(application_id, &app_state.repo).await?;
    access::authorize(
        &principal,
        Operation::UpdateApplication {
            applicant: application.user_id,
            shelter: application.shelter_id,
        },
    )?;

    let application =
        api::application::update_application(application, form.0, &app_state.repo).await?;

    Ok(responses::ok(
        &application,
        "Application updated successfully",
    ))
}

#[web::put("/{applicationId}/status")]
pub async fn update_application_status(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    form: web::types::Json<api::application::StatusUpdateRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let application_id = utils::parse_uuid_param(&path.0, "applicationId")?;

    let application = api::application::get_application(application_id, &app_state.repo).await?;
    access::authorize(
        &principal,
        Operation::UpdateApplicationStatus {
            shelter: application.shelter_id,
        },
    )?;

    let application = api::application::update_status(application, form.0, &app_state.repo).await?;

    Ok(responses::ok(
        &application,
        "Application status updated successfully",
    ))
}

#[web::delete("/{applicationId}")]
pub async fn delete_application(
    principal: access::Principal,
    path: web::types::Path<(String,)>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let application_id = utils::parse_uuid_param(&path.0, "applicationId")?;

    let application = api::application::get_application(application_id, &app_state.repo).await?;
    access::authorize(
        &principal,
        Operation::DeleteApplication {
            applicant: application.user_id,
        },
    )?;

    api::application::delete_application(application, &app_state.repo).await?;

    Ok(responses::ok_empty("Application deleted successfully"))
}
