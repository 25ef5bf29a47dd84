use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Principal;

/// Extractor handing the authenticated `Principal` to a handler.
/// The auth gate middleware must already have inserted it into request extensions;
/// if not (route mounted outside the gate) the request is answered with a bare 401.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(principal) => Ok(CurrentPrincipal(principal.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "no principal in request extensions; route is not behind the auth gate"
                );
                Err(AppError::Unauthenticated)
            }
        }
    }
}
