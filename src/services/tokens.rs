//! Signed bearer tokens.
//!
//! A token is `base64url(claims-json).hex(hmac-sha256)`, signed with the
//! server secret. Access tokens authenticate requests; refresh tokens are
//! only accepted by the refresh endpoint. Verification recomputes the mac
//! over the encoded payload and compares in constant time before the
//! claims are parsed or the expiry is checked.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::Utc;
use derive_more::{Display, Error};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::{consts, models, services::TokenService};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenKind {
    #[serde(rename = "access")]
    Access,
    #[serde(rename = "refresh")]
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub role: models::user::Role,
    pub kind: TokenKind,
    /// Expiry as unix seconds
    pub exp: i64,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[display("Token expired")]
    Expired,
    #[display("Invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct HmacTokenService {
    pub sign_secret: String,
}

impl HmacTokenService {
    fn encode(&self, claims: &Claims) -> anyhow::Result<String> {
        let payload = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);

        let mut mac = HmacSha256::new_from_slice(self.sign_secret.as_bytes())?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }
}

impl TokenService for HmacTokenService {
    fn issue(
        &self,
        user_id: Uuid,
        role: models::user::Role,
        kind: TokenKind,
    ) -> anyhow::Result<String> {
        let ttl = match kind {
            TokenKind::Access => consts::ACCESS_TOKEN_TTL_SECONDS,
            TokenKind::Refresh => consts::REFRESH_TOKEN_TTL_SECONDS,
        };

        self.encode(&Claims {
            user_id,
            role,
            kind,
            exp: Utc::now().timestamp() + ttl,
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let (payload, signature_hex) = token.split_once('.').ok_or(TokenError::Invalid)?;
        let received = hex::decode(signature_hex).map_err(|_| TokenError::Invalid)?;

        let mut mac = HmacSha256::new_from_slice(self.sign_secret.as_bytes())
            .map_err(|_| TokenError::Invalid)?;
        mac.update(payload.as_bytes());
        let computed = mac.finalize().into_bytes();

        if !bool::from(computed.ct_eq(&received[..])) {
            return Err(TokenError::Invalid);
        }

        let claims = BASE64_URL_SAFE_NO_PAD
            .decode(payload.as_bytes())
            .ok()
            .and_then(|raw| serde_json::from_slice::<Claims>(&raw).ok())
            .ok_or(TokenError::Invalid)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
