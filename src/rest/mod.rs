pub mod application;
pub mod auth;
pub mod forms;
pub mod middleware;
pub mod pet;
pub mod responses;
pub mod routes;
pub mod server;
pub mod shelter;
pub mod user;
pub mod utils;

use crate::{repo, services};

pub struct AppState {
    pub repo: repo::ImplAppRepo,
    pub storage_service: services::ImplStorageService,
    pub token_service: services::ImplTokenService,
}
