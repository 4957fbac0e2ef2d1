use crate::common::{Actor, AuthError, MemberId};
use crate::domains::auth::JwtService;
use crate::server::response::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub member_id: MemberId,
    pub email: String,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.member_id, self.is_admin)
    }
}

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// Requests always continue. A token that fails verification leaves
/// `AuthError::InvalidToken` in the extensions instead, so protected handlers
/// can tell it apart from a missing header.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_auth_user(&request, &jwt_service) {
        Ok(Some(user)) => {
            debug!(member_id = %user.member_id, is_admin = user.is_admin, "Authenticated user");
            request.extensions_mut().insert(user);
        }
        Ok(None) => debug!("No authentication token"),
        Err(err) => {
            debug!(error = %err, "Rejected authentication token");
            request.extensions_mut().insert(err);
        }
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Result<Option<AuthUser>, AuthError> {
    // Get Authorization header
    let Some(auth_header) = request.headers().get("authorization") else {
        return Ok(None);
    };
    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidToken)?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service
        .verify_token(token)
        .map_err(|_| AuthError::InvalidToken)?;

    Ok(Some(AuthUser {
        member_id: MemberId::from_uuid(claims.member_id),
        email: claims.email,
        is_admin: claims.is_admin,
    }))
}

/// Extractor for handlers that need an authenticated caller.
///
/// Rejects with 401 when the middleware found no valid token. Capability
/// checks happen in the actions.
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(CurrentActor(user.actor()));
        }

        let err = parts
            .extensions
            .get::<AuthError>()
            .cloned()
            .unwrap_or(AuthError::AuthenticationRequired);
        Err(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let member_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(member_id, "admin@example.com".to_string(), true)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", format!("Bearer {}", token))
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap().unwrap();
        assert_eq!(auth_user.member_id, MemberId::from_uuid(member_id));
        assert_eq!(auth_user.email, "admin@example.com");
        assert!(auth_user.is_admin);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let member_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(member_id, "staff@example.com".to_string(), false)
            .unwrap();

        let request = axum::http::Request::builder()
            .header("authorization", token)
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.unwrap().member_id, MemberId::from_uuid(member_id));
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert!(matches!(auth_user, Ok(None)));
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = axum::http::Request::builder()
            .header("authorization", "Bearer invalid_token")
            .body(axum::body::Body::empty())
            .unwrap();

        let result = extract_auth_user(&request, &jwt_service);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_current_actor_reports_rejected_token() {
        let (mut parts, _) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(AuthError::InvalidToken);

        let result = CurrentActor::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Invalid or expired token"));
    }

    #[tokio::test]
    async fn test_current_actor_without_token_requires_authentication() {
        let (mut parts, _) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();

        let result = CurrentActor::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(msg)) if msg == "Authentication required"));
    }
}
