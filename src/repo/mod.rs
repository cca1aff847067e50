pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use uuid::Uuid;

pub type ImplAppRepo = Box<dyn AppRepo>;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AppRepo {
    async fn insert_user(&self, user: &models::user::User) -> anyhow::Result<()>;

    async fn get_user_by_id(&self, user_id: Uuid) -> anyhow::Result<Option<models::user::User>>;

    /// Lookup by the stored (lowercased) email
    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<models::user::User>>;

    async fn update_user(&self, user: &models::user::User) -> anyhow::Result<()>;

    /// Retrieves every shelter account, newest first
    async fn get_shelters(&self) -> anyhow::Result<Vec<models::user::User>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    async fn get_pet_by_id(&self, pet_id: Uuid) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    async fn delete_pet(&self, pet_id: Uuid) -> anyhow::Result<()>;

    /// Candidate set for search/featured, newest first
    async fn get_pets_by_status(
        &self,
        status: models::pet::AdoptionStatus,
    ) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pets_by_shelter(&self, shelter_id: Uuid)
    -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn set_pet_adoption_status(
        &self,
        pet_id: Uuid,
        status: models::pet::AdoptionStatus,
        adopted_by: Option<Uuid>,
    ) -> anyhow::Result<()>;

    /// Inserts the application and marks the pet pending in the same transaction
    async fn insert_application(
        &self,
        application: &models::application::Application,
    ) -> anyhow::Result<()>;

    async fn get_application_by_id(
        &self,
        application_id: Uuid,
    ) -> anyhow::Result<Option<models::application::Application>>;

    async fn update_application(
        &self,
        application: &models::application::Application,
    ) -> anyhow::Result<()>;

    async fn delete_application(&self, application_id: Uuid) -> anyhow::Result<()>;

    async fn get_applications_by_user(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>>;

    async fn get_applications_by_pet(
        &self,
        pet_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>>;

    async fn get_applications_by_shelter(
        &self,
        shelter_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>>;

    async fn has_user_applied(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<bool>;

    /// Idempotent: re-favoriting an already favorited pet is a no-op
    async fn insert_favorite(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<()>;

    async fn delete_favorite(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<()>;

    /// Retrieves the user favorites DESC order
    async fn get_favorites_by_user(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::favorite::Favorite>>;

    async fn is_pet_favorited(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<bool>;
}
