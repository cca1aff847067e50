//! # Auth API Module
//!
//! Registration, login and token handling. Passwords are stored as Argon2id
//! PHC strings; successful register/login answers with an access/refresh
//! token pair plus the account itself.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    consts,
    errors::ApiError,
    models, repo,
    services::{self, tokens::TokenKind},
};

/// Hashes a password with a fresh random salt, returning the PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow::anyhow!("failed to hash password: {err}"))
}

/// Verifies a password against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> anyhow::Result<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|err| anyhow::anyhow!("invalid password hash format: {err}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

/// Registration payload. `user_type` stays a raw string so an unknown role
/// surfaces as a validation message instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub phone: String,
    pub shelter_name: Option<String>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<models::user::Role, ApiError> {
        let mut errors = vec![];

        if !is_valid_email(&self.email) {
            errors.push("Valid email is required".to_string());
        }
        if self.password.chars().count() < consts::MIN_PASSWORD_CHARS {
            errors.push("Password must be at least 6 characters".to_string());
        }
        if self.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        if !self.phone.is_empty() && self.phone.chars().filter(char::is_ascii_digit).count() < 7 {
            errors.push("Valid phone number required".to_string());
        }

        let role = serde_json::from_str::<models::user::Role>(&format!("\"{}\"", self.user_type));
        if role.is_err() {
            errors.push("User type must be adopter or shelter".to_string());
        }

        match role {
            Ok(role) if errors.is_empty() => Ok(role),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = vec![];

        if !is_valid_email(&self.email) {
            errors.push("Valid email is required".to_string());
        }
        if self.password.is_empty() {
            errors.push("Password is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

/// Token pair plus the account, returned by register and login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub refresh_token: String,
    pub user: models::user::User,
}

#[derive(Debug, Serialize)]
pub struct RefreshedToken {
    pub token: String,
}

/// Creates an account and signs it in.
///
/// Emails are stored lowercased and must be unique. Role-specific profile
/// fields start from the same defaults for everyone: adopters get an empty
/// living situation, shelters an unverified empty shelter card.
///
/// # Errors
/// * `Validation` - malformed fields per the rules above
/// * `Conflict` - email already registered
pub async fn register(
    request: RegisterRequest,
    repo: &repo::ImplAppRepo,
    token_service: &services::ImplTokenService,
) -> Result<AuthSession, ApiError> {
    let role = request.validate()?;
    let email = request.email.trim().to_lowercase();

    if repo.get_user_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let now = Utc::now();
    let mut user = models::user::User {
        id: Uuid::new_v4(),
        role,
        email,
        password_hash: hash_password(&request.password)?,
        first_name: request.first_name,
        last_name: request.last_name,
        phone: request.phone,
        created_at: now,
        updated_at: now,
        ..Default::default()
    };

    match role {
        models::user::Role::Adopter => {
            user.living_type = Some(String::new());
            user.has_yard = Some(false);
            user.household_members = Some(1);
        }
        models::user::Role::Shelter => {
            user.shelter_name = Some(request.shelter_name.unwrap_or_default());
            user.shelter_description = Some(String::new());
            user.website = Some(String::new());
            user.verified = Some(false);
        }
    }

    repo.insert_user(&user).await?;

    Ok(AuthSession {
        token: token_service.issue(user.id, user.role, TokenKind::Access)?,
        refresh_token: token_service.issue(user.id, user.role, TokenKind::Refresh)?,
        user,
    })
}

/// Authenticates by email and password.
///
/// The same `Unauthorized` answer covers an unknown email and a wrong
/// password so the endpoint does not leak which one failed.
pub async fn login(
    request: LoginRequest,
    repo: &repo::ImplAppRepo,
    token_service: &services::ImplTokenService,
) -> Result<AuthSession, ApiError> {
    request.validate()?;

    let email = request.email.trim().to_lowercase();
    let Some(user) = repo.get_user_by_email(&email).await? else {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    Ok(AuthSession {
        token: token_service.issue(user.id, user.role, TokenKind::Access)?,
        refresh_token: token_service.issue(user.id, user.role, TokenKind::Refresh)?,
        user,
    })
}

/// Exchanges a refresh token for a fresh access token. Any verification
/// failure, including an access token presented here, is rejected alike.
pub fn refresh(
    refresh_token: &str,
    token_service: &services::ImplTokenService,
) -> Result<RefreshedToken, ApiError> {
    let claims = token_service
        .verify(refresh_token)
        .ok()
        .filter(|claims| claims.kind == TokenKind::Refresh)
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    Ok(RefreshedToken {
        token: token_service.issue(claims.user_id, claims.role, TokenKind::Access)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use crate::services::tokens::{Claims, TokenError};
    use crate::services::{MockTokenService, TokenService};
    use mockall::predicate::*;

    fn register_request(email: &str, user_type: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Diaz".to_string(),
            user_type: user_type.to_string(),
            phone: "555-867-5309".to_string(),
            shelter_name: None,
        }
    }

    fn token_service_issuing(token: &'static str) -> Box<dyn TokenService> {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .returning(move |_, _, _| Ok(token.to_string()));
        Box::new(tokens)
    }

    fn stored_user(email: &str, password: &str) -> models::user::User {
        models::user::User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter22").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("hunter22", &second).unwrap());
    }

    #[ntex::test]
    async fn register_rejects_bad_fields_with_all_messages() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            user_type: "wizard".to_string(),
            ..Default::default()
        };

        let repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());
        let tokens: Box<dyn TokenService> = Box::new(MockTokenService::new());

        let result = register(request, &repo, &tokens).await;

        let Err(ApiError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.contains(&"Valid email is required".to_string()));
        assert!(errors.contains(&"Password must be at least 6 characters".to_string()));
        assert!(errors.contains(&"First name is required".to_string()));
        assert!(errors.contains(&"Last name is required".to_string()));
        assert!(errors.contains(&"User type must be adopter or shelter".to_string()));
    }

    #[ntex::test]
    async fn register_rejects_duplicate_email() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_email()
            .with(eq("taken@example.com"))
            .times(1)
            .returning(|email| {
                let user = stored_user(email, "hunter22");
                Box::pin(async move { Ok(Some(user)) })
            });

        let repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let tokens: Box<dyn TokenService> = Box::new(MockTokenService::new());

        let result = register(register_request("Taken@Example.com", "adopter"), &repo, &tokens).await;

        assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg == "Email already registered"));
    }

    #[ntex::test]
    async fn register_lowercases_email_and_defaults_adopter_fields() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_email()
            .with(eq("jordan@example.com"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_insert_user()
            .withf(|user| {
                user.email == "jordan@example.com"
                    && user.living_type == Some(String::new())
                    && user.has_yard == Some(false)
                    && user.household_members == Some(1)
                    && user.shelter_name.is_none()
            })
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let tokens = token_service_issuing("signed-token");

        let session = register(register_request("Jordan@Example.com", "adopter"), &repo, &tokens)
            .await
            .unwrap();

        assert_eq!(session.token, "signed-token");
        assert_eq!(session.user.role, models::user::Role::Adopter);
        assert!(session.user.verified.is_none());
    }

    #[ntex::test]
    async fn register_shelter_starts_unverified() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_email()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_insert_user()
            .withf(|user| {
                user.verified == Some(false)
                    && user.shelter_name == Some("Paws Haven".to_string())
                    && user.living_type.is_none()
            })
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));

        let repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let tokens = token_service_issuing("signed-token");

        let mut request = register_request("haven@example.com", "shelter");
        request.shelter_name = Some("Paws Haven".to_string());

        let session = register(request, &repo, &tokens).await.unwrap();
        assert_eq!(session.user.role, models::user::Role::Shelter);
    }

    #[ntex::test]
    async fn login_accepts_correct_password() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_email()
            .with(eq("jordan@example.com"))
            .times(1)
            .returning(|email| {
                let user = stored_user(email, "hunter22");
                Box::pin(async move { Ok(Some(user)) })
            });

        let repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let tokens = token_service_issuing("signed-token");

        let request = LoginRequest {
            email: "Jordan@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let session = login(request, &repo, &tokens).await.unwrap();
        assert_eq!(session.refresh_token, "signed-token");
    }

    #[ntex::test]
    async fn login_answers_alike_for_unknown_email_and_wrong_password() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_user_by_email()
            .with(eq("ghost@example.com"))
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_get_user_by_email()
            .with(eq("jordan@example.com"))
            .returning(|email| {
                let user = stored_user(email, "hunter22");
                Box::pin(async move { Ok(Some(user)) })
            });

        let repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let tokens: Box<dyn TokenService> = Box::new(MockTokenService::new());

        for (email, password) in [
            ("ghost@example.com", "hunter22"),
            ("jordan@example.com", "wrong-password"),
        ] {
            let result = login(
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                &repo,
                &tokens,
            )
            .await;

            assert!(
                matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Invalid email or password")
            );
        }
    }

    #[test]
    fn refresh_requires_a_refresh_token() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenService::new();
        tokens.expect_verify().with(eq("access-token")).returning(move |_| {
            Ok(Claims {
                user_id,
                role: models::user::Role::Adopter,
                kind: TokenKind::Access,
                exp: i64::MAX,
            })
        });
        tokens
            .expect_verify()
            .with(eq("stale-token"))
            .returning(|_| Err(TokenError::Expired));
        let tokens: Box<dyn TokenService> = Box::new(tokens);

        for token in ["access-token", "stale-token"] {
            let result = refresh(token, &tokens);
            assert!(
                matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Invalid refresh token")
            );
        }
    }

    #[test]
    fn refresh_issues_a_new_access_token() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenService::new();
        tokens.expect_verify().returning(move |_| {
            Ok(Claims {
                user_id,
                role: models::user::Role::Shelter,
                kind: TokenKind::Refresh,
                exp: i64::MAX,
            })
        });
        tokens
            .expect_issue()
            .with(eq(user_id), eq(models::user::Role::Shelter), eq(TokenKind::Access))
            .times(1)
            .returning(|_, _, _| Ok("fresh-access".to_string()));
        let tokens: Box<dyn TokenService> = Box::new(tokens);

        let refreshed = refresh("refresh-token", &tokens).unwrap();
        assert_eq!(refreshed.token, "fresh-access");
    }
}
