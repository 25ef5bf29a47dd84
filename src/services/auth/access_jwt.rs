use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;

use super::{Principal, PrincipalStore, TokenError, TokenValidator};

/// Access token (JWT) claims.
///
/// `sub` carries the internal user id as a decimal string.
/// `exp` / `nbf` are checked by `Validation` and not needed afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
}

impl AccessTokenClaims {
    // ASCII digits only: no sign, padding or whitespace.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        let sub = self.sub.as_str();
        if sub.is_empty() || !sub.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Invalid);
        }
        sub.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(TokenError::Invalid)
    }
}

/// HS256 access-token verifier backed by a `PrincipalStore`.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    principals: Arc<dyn PrincipalStore>,
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtValidator {
    pub fn new(secret: &[u8], leeway_seconds: u64, principals: Arc<dyn PrincipalStore>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            principals,
        }
    }

    // Signature + exp/nbf only. No principal lookup.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                // ImmatureSignature (nbf in the future) lands here too
                _ => TokenError::Invalid,
            })
    }
}

#[async_trait]
impl TokenValidator for JwtValidator {
    async fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        let claims = self.verify(token)?;
        let user_id = claims.user_id()?;

        match self.principals.find_principal(user_id).await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => Err(TokenError::UnknownPrincipal),
            Err(err) => Err(TokenError::Backend(err.to_string())),
        }
    }
}
