//! Administrator gate for the `/admin` routes
//!
//! Expects `Authorization: Bearer <token>`, an HS256 JWT whose `roles`
//! claim lists the configured administrator role.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ServerError};
use crate::AppState;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

pub struct AdminGuard {
    key: DecodingKey,
    validation: Validation,
    admin_role: String,
}

impl AdminGuard {
    pub fn new(secret: &str, admin_role: impl Into<String>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            admin_role: admin_role.into(),
        }
    }

    /// Check an `Authorization` header value; returns the token subject
    pub fn authorize(&self, header: Option<&str>) -> Result<String> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| ServerError::Unauthorized("missing bearer token".into()))?;

        let data = decode::<AdminClaims>(token, &self.key, &self.validation)
            .map_err(|e| ServerError::Unauthorized(e.to_string()))?;

        if !data.claims.roles.iter().any(|r| r == &self.admin_role) {
            warn!(sub = %data.claims.sub, "Token lacks administrator role");
            return Err(ServerError::Forbidden);
        }
        Ok(data.claims.sub)
    }
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.guard.authorize(header) {
        Ok(subject) => {
            debug!(%subject, path = %req.uri().path(), "Administrator authorized");
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-jwt-key-min-32-chars!!";

    fn token(roles: &[&str]) -> String {
        let claims = AdminClaims {
            sub: "admin".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 4_102_444_800,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_administrator_token_passes() {
        let guard = AdminGuard::new(SECRET, "Administrators");
        let header = format!("Bearer {}", token(&["Administrators"]));
        assert_eq!(guard.authorize(Some(&header)).unwrap(), "admin");
    }

    #[test]
    fn test_missing_role_is_forbidden() {
        let guard = AdminGuard::new(SECRET, "Administrators");
        let header = format!("Bearer {}", token(&["Managers"]));
        assert!(matches!(guard.authorize(Some(&header)), Err(ServerError::Forbidden)));
    }

    #[test]
    fn test_bad_tokens_are_unauthorized() {
        let guard = AdminGuard::new(SECRET, "Administrators");
        assert!(matches!(guard.authorize(None), Err(ServerError::Unauthorized(_))));
        assert!(matches!(
            guard.authorize(Some("Bearer invalid.token.here")),
            Err(ServerError::Unauthorized(_))
        ));

        let other = AdminGuard::new("another-secret-entirely-32-chars!!", "Administrators");
        let header = format!("Bearer {}", token(&["Administrators"]));
        assert!(matches!(other.authorize(Some(&header)), Err(ServerError::Unauthorized(_))));
    }
}
