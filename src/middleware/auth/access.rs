//! Bearer token check → `Principal` into request extensions.
//!
//! Every route behind `apply` goes through `AuthGate::authorize` before its handler.
//! Handlers read the caller with the `CurrentPrincipal` extractor and never look at
//! the `Authorization` header themselves.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthGate, AuthResult};

/// Guard every route of `router` with the auth gate.
///
/// Uses `route_layer`, so unmatched paths still 404 instead of 401.
///
/// ```ignore
/// let users = Router::new().route("/user", get(list_users));
/// let app = Router::new().nest("/u/v1", access::apply(users, gate));
/// ```
pub fn apply<S>(router: Router<S>, gate: AuthGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(gate, access_middleware))
}

async fn access_middleware(
    State(gate): State<AuthGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match gate.authorize(req.headers()).await {
        AuthResult::Authorized(principal) => principal,
        AuthResult::Rejected(reason) => {
            tracing::warn!(
                reason = %reason,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by auth gate"
            );
            return Err(reason.into());
        }
    };

    tracing::debug!(
        principal_id = principal.id,
        username = principal.username.as_deref().unwrap_or("-"),
        "request authorized"
    );

    // middleware → extractor
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use axum::{
        Json,
        http::{StatusCode, header},
        routing::get,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::v1::extractors::CurrentPrincipal;
    use crate::services::auth::{Principal, TokenError, testing::StaticValidator};

    fn app(hits: Arc<AtomicUsize>) -> Router {
        let validator = StaticValidator::new()
            .with_principal("good-token-123", Principal::new(42))
            .with_error("expired-token", TokenError::Expired);
        let gate = AuthGate::new(Arc::new(validator));

        let protected = Router::new().route(
            "/whoami",
            get(move |CurrentPrincipal(principal): CurrentPrincipal| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "id": principal.id }))
                }
            }),
        );

        apply(protected, gate).route("/open", get(|| async { "open" }))
    }

    fn request(auth: Option<&str>, uri: &str) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_principal() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (status, body) = send(
            app(hits.clone()),
            request(Some("Bearer good-token-123"), "/whoami"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 42);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn basic_scheme_is_rejected_before_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (status, body) = send(app(hits.clone()), request(Some("Basic xyz"), "/whoami")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let message = body["error_message"].as_str().unwrap();
        assert!(!message.is_empty() && message.chars().count() <= 200);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_and_invalid_tokens_are_rejected() {
        let hits = Arc::new(AtomicUsize::new(0));
        for auth in [None, Some("Bearer nope"), Some("Bearer expired-token"), Some("Bearer")] {
            let (status, body) = send(app(hits.clone()), request(auth, "/whoami")).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "auth: {auth:?}");
            assert!(body["error_message"].is_string());
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejection_body_does_not_echo_token() {
        let hits = Arc::new(AtomicUsize::new(0));
        let (_, body) = send(
            app(hits),
            request(Some("Bearer super-secret-value"), "/whoami"),
        )
        .await;

        assert!(!body.to_string().contains("super-secret-value"));
    }

    #[tokio::test]
    async fn routes_outside_the_gate_are_public() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = app(hits).oneshot(request(None, "/open")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found_not_unauthorized() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = app(hits).oneshot(request(None, "/nowhere")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
