use crate::models;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::from_str;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::user::User {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;

        Ok(Self {
            id: id.into(),
            role: serde_json::from_str::<models::user::Role>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("role")?
            ))
            .unwrap_or_default(),
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            phone: row.try_get("phone")?,
            date_of_birth: row.try_get("date_of_birth")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            zip: row.try_get("zip")?,
            profile_image: row.try_get("profile_image")?,
            living_type: row.try_get("living_type")?,
            has_yard: row.try_get("has_yard")?,
            household_members: row.try_get("household_members")?,
            shelter_name: row.try_get("shelter_name")?,
            shelter_description: row.try_get("shelter_description")?,
            website: row.try_get("website")?,
            verified: row.try_get("verified")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;
        let shelter_id: uuid::fmt::Hyphenated = row.try_get("shelter_id")?;

        Ok(Self {
            id: id.into(),
            shelter_id: shelter_id.into(),
            name: row.try_get("name")?,
            species: serde_json::from_str::<models::pet::Species>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("species")?
            ))
            .unwrap_or_default(),
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
            weight: row.try_get("weight")?,
            gender: serde_json::from_str::<models::pet::Gender>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("gender")?
            ))
            .unwrap_or_default(),
            description: row.try_get("description")?,
            short_description: row.try_get("short_description")?,
            images: from_str(row.try_get::<&str, &str>("images")?).unwrap_or_default(),
            characteristics: from_str(row.try_get::<&str, &str>("characteristics")?)
                .unwrap_or_default(),
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            adoption_status: serde_json::from_str::<models::pet::AdoptionStatus>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("adoption_status")?
            ))
            .unwrap_or_default(),
            adopted_by: row
                .try_get::<Option<uuid::fmt::Hyphenated>, &str>("adopted_by")?
                .map(Into::into),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::application::Application {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: uuid::fmt::Hyphenated = row.try_get("id")?;
        let user_id: uuid::fmt::Hyphenated = row.try_get("user_id")?;
        let pet_id: uuid::fmt::Hyphenated = row.try_get("pet_id")?;
        let shelter_id: uuid::fmt::Hyphenated = row.try_get("shelter_id")?;

        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            pet_id: pet_id.into(),
            shelter_id: shelter_id.into(),
            status: serde_json::from_str::<models::application::ApplicationStatus>(&format!(
                "\"{}\"",
                row.try_get::<String, &str>("status")?
            ))
            .unwrap_or_default(),
            personal_info: from_str(row.try_get::<&str, &str>("personal_info")?)
                .unwrap_or_default(),
            living_info: from_str(row.try_get::<&str, &str>("living_info")?).unwrap_or_default(),
            pet_experience: from_str(row.try_get::<&str, &str>("pet_experience")?)
                .unwrap_or_default(),
            references: from_str(row.try_get::<&str, &str>("reference_list")?)
                .unwrap_or_default(),
            home_visit_required: row.try_get("home_visit_required")?,
            home_visit_completed: row.try_get("home_visit_completed")?,
            home_visit_date: row.try_get("home_visit_date")?,
            approval_date: row.try_get("approval_date")?,
            rejection_reason: row.try_get("rejection_reason")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::favorite::Favorite {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let user_id: uuid::fmt::Hyphenated = row.try_get("user_id")?;
        let pet_id: uuid::fmt::Hyphenated = row.try_get("pet_id")?;

        Ok(Self {
            user_id: user_id.into(),
            pet_id: pet_id.into(),
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn insert_user(&self, user: &models::user::User) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_USER)
            .bind(user.id.to_string())
            .bind(user.role.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(&user.date_of_birth)
            .bind(&user.address)
            .bind(&user.city)
            .bind(&user.state)
            .bind(&user.zip)
            .bind(&user.profile_image)
            .bind(&user.living_type)
            .bind(user.has_yard)
            .bind(user.household_members)
            .bind(&user.shelter_name)
            .bind(&user.shelter_description)
            .bind(&user.website)
            .bind(user.verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> anyhow::Result<Option<models::user::User>> {
        Ok(
            sqlx::query_as::<_, models::user::User>(sqlite_queries::QUERY_GET_USER_BY_ID)
                .bind(user_id.to_string())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<models::user::User>> {
        Ok(
            sqlx::query_as::<_, models::user::User>(sqlite_queries::QUERY_GET_USER_BY_EMAIL)
                .bind(email)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_user(&self, user: &models::user::User) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_USER)
            .bind(user.id.to_string())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(&user.date_of_birth)
            .bind(&user.address)
            .bind(&user.city)
            .bind(&user.state)
            .bind(&user.zip)
            .bind(&user.profile_image)
            .bind(&user.living_type)
            .bind(user.has_yard)
            .bind(user.household_members)
            .bind(&user.shelter_name)
            .bind(&user.shelter_description)
            .bind(&user.website)
            .bind(user.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_shelters(&self) -> anyhow::Result<Vec<models::user::User>> {
        Ok(
            sqlx::query_as::<_, models::user::User>(sqlite_queries::QUERY_GET_SHELTERS)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.id.to_string())
            .bind(pet.shelter_id.to_string())
            .bind(&pet.name)
            .bind(pet.species.to_string())
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(pet.gender.to_string())
            .bind(&pet.description)
            .bind(&pet.short_description)
            .bind(serde_json::to_string(&pet.images)?)
            .bind(serde_json::to_string(&pet.characteristics)?)
            .bind(&pet.city)
            .bind(&pet.state)
            .bind(pet.adoption_status.to_string())
            .bind(pet.adopted_by.map(|id| id.to_string()))
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_by_id(&self, pet_id: Uuid) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id.to_string())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id.to_string())
            .bind(&pet.name)
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(pet.gender.to_string())
            .bind(&pet.description)
            .bind(&pet.short_description)
            .bind(serde_json::to_string(&pet.images)?)
            .bind(serde_json::to_string(&pet.characteristics)?)
            .bind(&pet.city)
            .bind(&pet.state)
            .bind(pet.adoption_status.to_string())
            .bind(pet.adopted_by.map(|id| id.to_string()))
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_pet(&self, pet_id: Uuid) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(pet_id.to_string())
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pets_by_status(
        &self,
        status: models::pet::AdoptionStatus,
    ) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PETS_BY_STATUS)
                .bind(status.to_string())
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_pets_by_shelter(
        &self,
        shelter_id: Uuid,
    ) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PETS_BY_SHELTER)
                .bind(shelter_id.to_string())
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn set_pet_adoption_status(
        &self,
        pet_id: Uuid,
        status: models::pet::AdoptionStatus,
        adopted_by: Option<Uuid>,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_SET_PET_ADOPTION_STATUS)
            .bind(pet_id.to_string())
            .bind(status.to_string())
            .bind(adopted_by.map(|id| id.to_string()))
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn insert_application(
        &self,
        application: &models::application::Application,
    ) -> anyhow::Result<()> {
        let mut transaction = self.db_pool.begin().await?;

        sqlx::query(sqlite_queries::QUERY_INSERT_APPLICATION)
            .bind(application.id.to_string())
            .bind(application.user_id.to_string())
            .bind(application.pet_id.to_string())
            .bind(application.shelter_id.to_string())
            .bind(application.status.to_string())
            .bind(serde_json::to_string(&application.personal_info)?)
            .bind(serde_json::to_string(&application.living_info)?)
            .bind(serde_json::to_string(&application.pet_experience)?)
            .bind(serde_json::to_string(&application.references)?)
            .bind(application.home_visit_required)
            .bind(application.home_visit_completed)
            .bind(application.home_visit_date)
            .bind(application.approval_date)
            .bind(&application.rejection_reason)
            .bind(application.created_at)
            .bind(application.updated_at)
            .execute(&mut *transaction)
            .await?;

        sqlx::query(sqlite_queries::QUERY_SET_PET_ADOPTION_STATUS)
            .bind(application.pet_id.to_string())
            .bind(models::pet::AdoptionStatus::Pending.to_string())
            .bind(None::<String>)
            .bind(application.created_at)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(())
    }

    async fn get_application_by_id(
        &self,
        application_id: Uuid,
    ) -> anyhow::Result<Option<models::application::Application>> {
        Ok(sqlx::query_as::<_, models::application::Application>(
            sqlite_queries::QUERY_GET_APPLICATION_BY_ID,
        )
        .bind(application_id.to_string())
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn update_application(
        &self,
        application: &models::application::Application,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_APPLICATION)
            .bind(application.id.to_string())
            .bind(application.status.to_string())
            .bind(serde_json::to_string(&application.personal_info)?)
            .bind(serde_json::to_string(&application.living_info)?)
            .bind(serde_json::to_string(&application.pet_experience)?)
            .bind(serde_json::to_string(&application.references)?)
            .bind(application.home_visit_required)
            .bind(application.home_visit_completed)
            .bind(application.home_visit_date)
            .bind(application.approval_date)
            .bind(&application.rejection_reason)
            .bind(application.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_application(&self, application_id: Uuid) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_APPLICATION)
            .bind(application_id.to_string())
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_applications_by_user(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>> {
        Ok(sqlx::query_as::<_, models::application::Application>(
            sqlite_queries::QUERY_GET_APPLICATIONS_BY_USER,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn get_applications_by_pet(
        &self,
        pet_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>> {
        Ok(sqlx::query_as::<_, models::application::Application>(
            sqlite_queries::QUERY_GET_APPLICATIONS_BY_PET,
        )
        .bind(pet_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn get_applications_by_shelter(
        &self,
        shelter_id: Uuid,
    ) -> anyhow::Result<Vec<models::application::Application>> {
        Ok(sqlx::query_as::<_, models::application::Application>(
            sqlite_queries::QUERY_GET_APPLICATIONS_BY_SHELTER,
        )
        .bind(shelter_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn has_user_applied(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<bool> {
        Ok(sqlx::query_scalar(sqlite_queries::QUERY_HAS_USER_APPLIED)
            .bind(user_id.to_string())
            .bind(pet_id.to_string())
            .fetch_one(&self.db_pool)
            .await?)
    }

    async fn insert_favorite(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_FAVORITE)
            .bind(user_id.to_string())
            .bind(pet_id.to_string())
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_favorite(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_FAVORITE)
            .bind(user_id.to_string())
            .bind(pet_id.to_string())
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_favorites_by_user(
        &self,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<models::favorite::Favorite>> {
        Ok(sqlx::query_as::<_, models::favorite::Favorite>(
            sqlite_queries::QUERY_GET_FAVORITES_BY_USER,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn is_pet_favorited(&self, user_id: Uuid, pet_id: Uuid) -> anyhow::Result<bool> {
        Ok(sqlx::query_scalar(sqlite_queries::QUERY_IS_PET_FAVORITED)
            .bind(user_id.to_string())
            .bind(pet_id.to_string())
            .fetch_one(&self.db_pool)
            .await?)
    }
}
