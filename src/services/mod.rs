pub mod storage;
pub mod tokens;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait StorageService {
    /// Uploads one object under the bucket-relative `key`
    async fn save_image(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()>;

    async fn delete_image(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService {
    fn issue(
        &self,
        user_id: Uuid,
        role: models::user::Role,
        kind: tokens::TokenKind,
    ) -> anyhow::Result<String>;

    fn verify(&self, token: &str) -> Result<tokens::Claims, tokens::TokenError>;
}

pub type ImplStorageService = Box<dyn StorageService>;
pub type ImplTokenService = Box<dyn TokenService>;
