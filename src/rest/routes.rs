//! REST route configuration.
//!
//! Routes are grouped by resource into scopes mounted under `/api`.
//! Inside a scope, literal paths are registered before parameterized
//! ones so `/pets/search` never falls into `/pets/{petId}`.

use ntex::web;

use super::{application, auth, pet, shelter, user};

/// Configures authentication and session routes.
///
/// # Routes
/// - `POST /api/auth/register` - Create an account and issue tokens
/// - `POST /api/auth/login` - Issue tokens for an existing account
/// - `POST /api/auth/refresh` - Exchange a refresh token for a new pair
/// - `GET /api/auth/verify` - Validate the caller's access token
/// - `GET|POST /api/auth/logout` - Stateless logout acknowledgement
pub fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/auth").service((
        auth::register,
        auth::login,
        auth::refresh,
        auth::verify,
        auth::logout,
        auth::logout_post,
    )));
}

/// Configures the pet catalog routes.
///
/// Browsing and searching are public; create, update and delete require
/// the owning shelter account.
///
/// # Routes
/// - `GET /api/pets` - Search with filters, sorting and pagination
/// - `GET /api/pets/search` - Quick text search
/// - `GET /api/pets/featured` - Newest available pets
/// - `GET /api/pets/by-shelter/{shelterId}` - One shelter's listings
/// - `GET /api/pets/{petId}` - Single listing
/// - `GET /api/pets/{petId}/similar` - Same-species suggestions
/// - `POST /api/pets` - Create listing (multipart, images required)
/// - `PUT /api/pets/{petId}` - Update listing (multipart)
/// - `DELETE /api/pets/{petId}` - Remove listing and its images
pub fn pets(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/pets").service((
        pet::get_pets,
        pet::search_pets,
        pet::featured_pets,
        pet::pets_by_shelter,
        pet::create_pet,
        pet::get_pet,
        pet::similar_pets,
        pet::update_pet,
        pet::delete_pet,
    )));
}

/// Configures adoption application routes. All of them authenticate.
///
/// # Routes
/// - `POST /api/applications` - Submit an application
/// - `GET /api/applications/{applicationId}` - Single application
/// - `GET /api/applications/user/{userId}` - An adopter's applications
/// - `GET /api/applications/pet/{petId}` - Applications for a listing
/// - `GET /api/applications/shelter/{shelterId}` - A shelter's inbox
/// - `PUT /api/applications/{applicationId}` - Update home-visit details
/// - `PUT /api/applications/{applicationId}/status` - Move the status
/// - `DELETE /api/applications/{applicationId}` - Withdraw (pending only)
pub fn applications(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/applications").service((
        application::create_application,
        application::applications_by_user,
        application::applications_by_pet,
        application::applications_by_shelter,
        application::get_application,
        application::update_application,
        application::update_application_status,
        application::delete_application,
    )));
}

/// Configures the shelter directory routes.
///
/// # Routes
/// - `GET /api/shelters` - All shelters with listing counters
/// - `GET /api/shelters/{shelterId}` - Shelter with its pets
/// - `PUT /api/shelters/{shelterId}` - Update own shelter profile
/// - `GET /api/shelters/{shelterId}/stats` - Own listing breakdown
pub fn shelters(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/shelters").service((
        shelter::shelter_directory,
        shelter::get_shelter,
        shelter::update_shelter,
        shelter::shelter_stats,
    )));
}

/// Configures account profile and favorites routes.
///
/// `{userId}` goes last so it cannot shadow `/profile` or `/favorites`.
///
/// # Routes
/// - `GET /api/users/profile` - Own full record
/// - `PUT /api/users/profile` - Update profile (multipart, optional avatar)
/// - `GET /api/users/favorites` - Favorite pet ids
/// - `GET /api/users/favorites/pets` - Favorites hydrated into pets
/// - `POST /api/users/favorites/{petId}` - Bookmark a pet
/// - `DELETE /api/users/favorites/{petId}` - Drop a bookmark
/// - `GET /api/users/favorites/{petId}/check` - Bookmark state
/// - `GET /api/users/{userId}` - Public profile (full record for self)
pub fn users(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/users").service((
        user::get_profile,
        user::update_profile,
        user::get_favorites,
        user::get_favorite_pets,
        user::add_favorite,
        user::remove_favorite,
        user::check_favorite,
        user::get_user,
    )));
}
