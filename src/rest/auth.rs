//! Account endpoints: register, login, token refresh/verify, logout.
//!
//! Logout is stateless; tokens expire on their own and the client drops
//! its copy, the endpoint only exists so clients have something to call.

use ntex::web;
use serde::Deserialize;
use serde_json::json;

use crate::{
    access::Principal,
    api,
    errors::ApiError,
    rest::{AppState, responses},
};

#[web::post("/register")]
pub async fn register(
    form: web::types::Json<api::auth::RegisterRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let session =
        api::auth::register(form.0, &app_state.repo, &app_state.token_service).await?;

    Ok(responses::created(&session, "Registration successful"))
}

#[web::post("/login")]
pub async fn login(
    form: web::types::Json<api::auth::LoginRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let session = api::auth::login(form.0, &app_state.repo, &app_state.token_service).await?;

    Ok(responses::ok(&session, "Login successful"))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[web::post("/refresh")]
pub async fn refresh(
    form: web::types::Json<RefreshRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    if form.refresh_token.is_empty() {
        return Err(ApiError::Conflict("Refresh token required".to_string()).into());
    }

    let refreshed = api::auth::refresh(&form.refresh_token, &app_state.token_service)?;

    Ok(responses::ok(&refreshed, "Token refreshed successfully"))
}

/// Answers whether the presented access token still works; the extractor
/// does the actual checking.
#[web::get("/verify")]
pub async fn verify(
    principal: Principal,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let user = api::user::get_user(principal.id, &app_state.repo).await?;

    Ok(responses::ok(
        &json!({ "valid": true, "user": user }),
        "Token is valid",
    ))
}

#[web::get("/logout")]
pub async fn logout() -> Result<impl web::Responder, web::Error> {
    Ok(responses::ok_empty("Logged out successfully"))
}

#[web::post("/logout")]
pub async fn logout_post() -> Result<impl web::Responder, web::Error> {
    Ok(responses::ok_empty("Logged out successfully"))
}
