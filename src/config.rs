//! Application configuration management with security considerations.
//!
//! This module handles all configuration values required for the application.
//! It includes secure storage indicators for sensitive configuration fields
//! and validation mechanisms to ensure proper security practices.
//!
//! # Security Notes
//! - Sensitive fields are clearly marked and should never be logged
//! - Production environments should use secure secret management systems
//! - All sensitive data should be stored using encryption at rest

use envconfig::Envconfig;
use std::sync::LazyLock;

/// Application configuration with security-aware field management.
///
/// This struct contains all environment variables used to configure the application.
/// Sensitive fields are clearly marked and include security guidance.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Use secret management systems in production (AWS Secrets Manager, HashiCorp Vault, etc.)
/// - Never log or expose sensitive values
/// - Rotate sensitive credentials regularly
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/app.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost"
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    /// Common values: 80 (HTTP), 8080 (dev)
    pub web_server_port: u16,

    /// 🔒 SENSITIVE: secret used to sign bearer tokens (HMAC-SHA256)
    /// Security: Generate using cryptographically secure random generator
    /// Rotation: invalidates every issued token
    pub token_sign_secret: String,

    /// AWS region hosting the image bucket (NON-SENSITIVE)
    #[envconfig(default = "us-east-2")]
    pub aws_region: String,

    /// Origin allowed to call the API from a browser (NON-SENSITIVE)
    /// Example: "http://localhost:3000"
    #[envconfig(default = "http://localhost:3000")]
    pub cors_allowed_origin: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Public base URL of the image bucket, the prefix of every stored image URL
    pub fn storage_public_base_url(&self) -> String {
        format!(
            "https://{bucket}.s3.{region}.amazonaws.com",
            bucket = crate::consts::S3_MAIN_BUCKET_NAME,
            region = self.aws_region
        )
    }
}

/// Global application configuration instance with validation
///
/// This configuration is validated on first access to ensure security requirements.
/// If validation fails, the application will panic with a descriptive error message.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load and validate application configuration. Check environment variables and security requirements.")
});
