//! Request authentication and role gating
//!
//! `Caller` verifies the bearer token with the identity provider. `RoleGate<R>`
//! additionally loads the caller's stored account and checks it against the
//! role named by `R`. Both re-run on every request.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::api::error::ApiError;
use crate::domain::{AuthError, RequiredRole, Role, UserRepository};
use crate::infrastructure::AppState;
use crate::models::User;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AuthError::Unauthenticated("Missing Authorization header".into()))?
        .to_str()
        .map_err(|_| AuthError::Unauthenticated("Invalid Authorization header".into()))?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        AuthError::Unauthenticated("Invalid Authorization header format".into())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthenticated("Empty bearer token".into()));
    }
    Ok(token)
}

/// The single access policy: the caller's stored role must equal `required`.
/// A missing account or an unrecognised stored role is denied as well.
pub async fn authorize(
    users: &dyn UserRepository,
    email: &str,
    required: Role,
) -> Result<User, ApiError> {
    let Some(user) = users.find_by_email(email).await? else {
        tracing::warn!("No account for {} (route requires {})", email, required);
        return Err(AuthError::Forbidden.into());
    };

    match user.role.parse::<Role>() {
        Ok(role) if role == required => Ok(user),
        _ => {
            tracing::warn!(
                "Role '{}' of {} does not grant {} access",
                user.role,
                email,
                required
            );
            Err(AuthError::Forbidden.into())
        }
    }
}

/// A caller whose bearer token the identity provider accepted
#[derive(Debug, Clone)]
pub struct Caller {
    pub uid: String,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let identity = state.identity.verify(token).await?;

        Ok(Caller {
            uid: identity.uid,
            email: identity.email,
        })
    }
}

/// A verified caller whose stored role is `R::ROLE`
pub struct RoleGate<R: RequiredRole> {
    pub caller: Caller,
    pub user: User,
    _role: PhantomData<R>,
}

#[async_trait]
impl<R: RequiredRole> FromRequestParts<AppState> for RoleGate<R> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = Caller::from_request_parts(parts, state).await?;
        let user = authorize(state.users.as_ref(), &caller.email, R::ROLE).await?;

        Ok(RoleGate {
            caller,
            user,
            _role: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::Unauthenticated(_))
        ));
        assert!(matches!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::Unauthenticated(_))
        ));
        assert!(matches!(
            bearer_token(&headers_with("Bearer    ")),
            Err(AuthError::Unauthenticated(_))
        ));
        assert!(matches!(
            bearer_token(&headers_with("abc.def.ghi")),
            Err(AuthError::Unauthenticated(_))
        ));
    }
}
