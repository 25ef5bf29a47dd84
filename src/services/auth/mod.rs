pub mod access_jwt;
pub mod factory;
pub mod gate;
pub mod principal;
pub mod principal_store;
#[cfg(test)]
pub mod testing;
pub mod validator;

pub use access_jwt::JwtValidator;
pub use factory::build_auth_gate;
pub use gate::{AuthGate, AuthResult, RejectReason};
pub use principal::{Principal, PrincipalStore};
pub use validator::{TokenError, TokenValidator};
