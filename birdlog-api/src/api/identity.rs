//! Request identity
//!
//! The fronting auth layer signs users in and forwards the e-mail address in
//! `X-User-Email`. Handlers that read or write per-user rows take a
//! [`CurrentUser`] argument; requests without the header get a 401.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName},
};
use tracing::warn;

use crate::error::ApiError;

pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");

/// E-mail of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn email(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(&USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match email {
            Some(email) => Ok(CurrentUser(email.to_string())),
            None => {
                warn!("Rejected {} {}: no user identity", parts.method, parts.uri.path());
                Err(ApiError::Unauthorized)
            }
        }
    }
}
