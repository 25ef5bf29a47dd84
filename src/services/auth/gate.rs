//! Bearer auth gate: `Authorization` header → token → `Principal`.
//!
//! The gate is transport-agnostic: it only reads a `HeaderMap` and returns an
//! `AuthResult`. Wiring into axum (extensions, 401 responses) lives in
//! `middleware::auth::access`.

use std::{fmt, sync::Arc};

use axum::http::{HeaderMap, header};

use super::{Principal, TokenError, TokenValidator};

const BEARER_SCHEME: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingHeader,
    MalformedHeader,
    InvalidToken,
    UnknownPrincipal,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::InvalidToken => "invalid_token",
            Self::UnknownPrincipal => "unknown_principal",
        }
    }

    /// Client-facing message. Never contains the token.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingHeader => "Authorization header is missing",
            Self::MalformedHeader => "Authorization header must be 'Bearer <token>'",
            Self::InvalidToken => "Invalid or expired token",
            Self::UnknownPrincipal => "Token does not reference a known user",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authorized(Principal),
    Rejected(RejectReason),
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is case-sensitive and separated by exactly one space; the token must be
/// non-empty and contain no whitespace.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, RejectReason> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(RejectReason::MissingHeader)?;

    let value = value.to_str().map_err(|_| RejectReason::MalformedHeader)?;

    let token = value
        .strip_prefix(BEARER_SCHEME)
        .ok_or(RejectReason::MalformedHeader)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(RejectReason::MalformedHeader);
    }

    Ok(token)
}

/// Guards protected handlers. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<dyn TokenValidator>,
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    pub async fn authorize(&self, headers: &HeaderMap) -> AuthResult {
        let token = match bearer_token(headers) {
            Ok(token) => token,
            Err(reason) => return AuthResult::Rejected(reason),
        };

        match self.validator.validate(token).await {
            Ok(principal) => AuthResult::Authorized(principal),
            Err(TokenError::UnknownPrincipal) => {
                AuthResult::Rejected(RejectReason::UnknownPrincipal)
            }
            Err(TokenError::Backend(err)) => {
                // fail closed
                tracing::warn!(error = %err, "token validator backend failure");
                AuthResult::Rejected(RejectReason::InvalidToken)
            }
            Err(TokenError::Invalid | TokenError::Expired) => {
                AuthResult::Rejected(RejectReason::InvalidToken)
            }
        }
    }
}
