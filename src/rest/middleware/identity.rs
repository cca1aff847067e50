//! Bearer-token identity extraction.
//!
//! Naming [Principal](crate::access::Principal) in a handler signature
//! makes the route require a valid access token; [MaybePrincipal] resolves
//! the caller when a token is present but lets anonymous requests through.
//! The user row is re-read on every request so deleted accounts stop
//! authenticating the moment they are gone, even with a live token.

use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};

use crate::{
    access::Principal,
    errors::ApiError,
    rest::AppState,
    services::tokens::{TokenError, TokenKind},
};

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn resolve_principal(req: &HttpRequest) -> Result<Principal, ApiError> {
    let Some(token) = bearer_token(req) else {
        return Err(ApiError::Unauthorized("No token provided".to_string()));
    };

    let Some(app_state) = req.app_state::<AppState>() else {
        return Err(ApiError::Dependency(
            "AppState is missing from the request".to_string(),
        ));
    };

    let claims = app_state
        .token_service
        .verify(token)
        .map_err(|err| match err {
            TokenError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            TokenError::Invalid => ApiError::Unauthorized("Invalid token".to_string()),
        })?;

    // refresh tokens are only good at the refresh endpoint
    if claims.kind != TokenKind::Access {
        return Err(ApiError::Unauthorized("Invalid token".to_string()));
    }

    let user = app_state
        .repo
        .get_user_by_id(claims.user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Principal::new(user.id, user.role))
}

impl<Err> FromRequest<Err> for Principal {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let req = req.clone();

        async move { resolve_principal(&req).await.map_err(Error::from) }
    }
}

/// Caller identity when the route works with or without a token.
/// Resolution failures degrade to anonymous instead of rejecting.
pub struct MaybePrincipal(pub Option<Principal>);

impl<Err> FromRequest<Err> for MaybePrincipal {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let req = req.clone();

        async move { Ok(MaybePrincipal(resolve_principal(&req).await.ok())) }
    }
}
