//! Handlers not tied to a resource scope

use ntex::web;
use serde_json::json;

use crate::errors::ApiError;

/// Liveness probe, deliberately outside `/api` and unauthenticated
#[web::get("/health")]
pub async fn health() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&json!({
        "success": true,
        "message": "Paw Adopt API is running",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })))
}

/// Endpoint map for anyone poking the root url
#[web::get("/")]
pub async fn index() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&json!({
        "success": true,
        "message": "Welcome to Paw Adopt API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "auth": "/api/auth",
            "pets": "/api/pets",
            "applications": "/api/applications",
            "users": "/api/users",
            "shelters": "/api/shelters",
        },
    })))
}

/// Answers every url no route claimed
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(ApiError::NotFound("Route not found".to_string()).into())
}
