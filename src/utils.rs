//! Helper functions could be used in api/, rest/, ...

use crate::config;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
};
use std::str::FromStr;

pub async fn setup_sqlite_db_pool(encrypted: bool) -> anyhow::Result<SqlitePool> {
    if encrypted {
        return Ok(SqlitePool::connect_with(
            SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?
                .pragma("key", &config::APP_CONFIG.db_pass_encrypt)
                .pragma("cipher_page_size", "1024")
                .pragma("kdf_iter", "64000")
                .pragma("cipher_hmac_algorithm", "HMAC_SHA1")
                .pragma("cipher_kdf_algorithm", "PBKDF2_HMAC_SHA1")
                .pragma("foreign_keys", "ON")
                .journal_mode(SqliteJournalMode::Delete),
        )
        .await?);
    }

    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&config::APP_CONFIG.db_host)?.pragma("foreign_keys", "ON"),
    )
    .await?)
}

/// Extracts the object key from a public bucket URL.
///
/// Returns [`None`] when the URL does not point at the bucket host,
/// external image URLs are left untouched on delete.
pub fn storage_key_from_url(url: &str) -> Option<String> {
    url.split_once(".amazonaws.com/")
        .map(|(_, key)| key.to_string())
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_from_url() {
        assert_eq!(
            storage_key_from_url(
                "https://paw-adopt-app-storage.s3.us-east-2.amazonaws.com/pets/abc/0.png"
            ),
            Some("pets/abc/0.png".to_string())
        );
        assert_eq!(storage_key_from_url("https://example.com/pets/abc.png"), None);
        assert_eq!(
            storage_key_from_url("https://bucket.s3.us-east-2.amazonaws.com/"),
            None
        );
    }
}
