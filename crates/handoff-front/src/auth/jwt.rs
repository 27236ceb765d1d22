use chrono::{Duration, Utc};
use handoff_core::models::AuthTokenResponse;
use handoff_core::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// HS256 token issuer and validator
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl JwtAuth {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    /// Issue a token for `subject`
    pub fn issue(&self, subject: &str) -> Result<AuthTokenResponse, AppError> {
        let now = Utc::now();
        let expires_at = now + self.expiry;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode token: {}", e)))?;

        Ok(AuthTokenResponse { token, expires_at })
    }

    /// Validate and decode a token
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                _ => AppError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("keys", &"[REDACTED]")
            .field("expiry_hours", &self.expiry.num_hours())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "jwt-secret-for-tests-at-least-32-chars";

    #[test]
    fn test_issue_then_validate() {
        let auth = JwtAuth::new(SECRET, 1);
        let issued = auth.issue("alice").unwrap();
        let claims = auth.validate(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = JwtAuth::new(SECRET, -1);
        let issued = auth.issue("alice").unwrap();
        let err = auth.validate(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "Token has expired"));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issued = JwtAuth::new("another-secret-that-is-also-32-chars!", 1)
            .issue("mallory")
            .unwrap();
        let result = JwtAuth::new(SECRET, 1).validate(&issued.token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = JwtAuth::new(SECRET, 1).validate("not.a.jwt");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let debug = format!("{:?}", JwtAuth::new(SECRET, 24));
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("expiry_hours: 24"));
    }
}
