use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::jwt::JwtKeys;
use crate::{
    error::StoreError,
    state::AppState,
    users::{model::Identity, repo::UserStore},
};

/// Returns the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves an access token to an active user's identity.
///
/// `Ok(None)` covers every "not authenticated" outcome: bad token, unknown
/// user, deactivated user. Only store failures are errors.
pub(crate) async fn resolve_identity(
    keys: &JwtKeys,
    users: &dyn UserStore,
    token: &str,
) -> Result<Option<Identity>, StoreError> {
    let claims = match keys.verify_access(token) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "token rejected");
            return Ok(None);
        }
    };

    match users.find_by_id(claims.sub).await? {
        Some(user) if user.is_active => Ok(Some(Identity::from(&user))),
        Some(_) => {
            debug!(user_id = claims.sub, "token for inactive user");
            Ok(None)
        }
        None => {
            debug!(user_id = claims.sub, "token for unknown user");
            Ok(None)
        }
    }
}

/// Best-effort identity resolution that never rejects a request.
///
/// On success the caller's [`Identity`] is placed in the request extensions,
/// where [`super::extractors::CurrentUser`] picks it up.
pub async fn optional_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        let keys = JwtKeys::from(&state.config.jwt);
        match resolve_identity(&keys, state.users.as_ref(), token).await {
            Ok(Some(identity)) => {
                debug!(user_id = identity.id, "optional auth resolved");
                req.extensions_mut().insert(identity);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "optional auth lookup failed; continuing anonymously"),
        }
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::auth::extractors::CurrentUser;
    use crate::auth::jwt::tests::expired_access_token;
    use crate::settings::memory::MemorySettingsStore;
    use crate::users::memory::{BrokenUserStore, MemoryUserStore};
    use crate::users::model::Role;

    async fn whoami(CurrentUser(identity): CurrentUser) -> String {
        match identity {
            Some(i) => format!("{}:{}", i.id, i.role),
            None => "anonymous".to_string(),
        }
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(state.clone(), optional_auth))
            .with_state(state)
    }

    async fn call(state: AppState, auth: Option<String>) -> (StatusCode, String) {
        let mut req = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth {
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = app(state)
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn state_with(users: Arc<MemoryUserStore>) -> AppState {
        AppState::fake(users, Arc::new(MemorySettingsStore::new()))
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Bearer tok.en".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("tok.en"));
    }

    #[tokio::test]
    async fn no_header_proceeds_anonymously() {
        let state = state_with(Arc::new(MemoryUserStore::new()));
        assert_eq!(call(state, None).await, (StatusCode::OK, "anonymous".into()));
    }

    #[tokio::test]
    async fn valid_token_for_active_user_sets_identity() {
        let users = Arc::new(MemoryUserStore::new());
        let id = users.seed("admin@example.com", Role::Admin, true);
        let state = state_with(users);
        let token = JwtKeys::from(&state.config.jwt).sign_access(id).unwrap();

        let (status, body) = call(state, Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{id}:admin"));
    }

    #[tokio::test]
    async fn garbage_and_expired_tokens_proceed_anonymously() {
        let users = Arc::new(MemoryUserStore::new());
        let id = users.seed("u@example.com", Role::User, true);
        let state = state_with(users);
        let keys = JwtKeys::from(&state.config.jwt);

        let expired = expired_access_token(&keys, id);
        for token in ["not-a-jwt".to_string(), expired] {
            let (status, body) = call(state.clone(), Some(format!("Bearer {token}"))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "anonymous");
        }
    }

    #[tokio::test]
    async fn refresh_token_is_not_accepted_as_identity() {
        let users = Arc::new(MemoryUserStore::new());
        let id = users.seed("u@example.com", Role::User, true);
        let state = state_with(users);
        let token = JwtKeys::from(&state.config.jwt).sign_refresh(id).unwrap();

        let (_, body) = call(state, Some(format!("Bearer {token}"))).await;
        assert_eq!(body, "anonymous");
    }

    #[tokio::test]
    async fn unknown_or_inactive_user_proceeds_anonymously() {
        let users = Arc::new(MemoryUserStore::new());
        let inactive = users.seed("gone@example.com", Role::Admin, false);
        let state = state_with(users);
        let keys = JwtKeys::from(&state.config.jwt);

        for id in [inactive, 999] {
            let token = keys.sign_access(id).unwrap();
            let (status, body) = call(state.clone(), Some(format!("Bearer {token}"))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "anonymous");
        }
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let state = AppState::fake(
            Arc::new(BrokenUserStore),
            Arc::new(MemorySettingsStore::new()),
        );
        let token = JwtKeys::from(&state.config.jwt).sign_access(1).unwrap();

        let (status, body) = call(state, Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }
}
