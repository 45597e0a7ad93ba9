use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::services::errors::auth_service_errors::AuthServiceError;

/// Claims carried by the platform's access tokens. Token issuance lives in
/// the identity service; this subsystem only verifies and extracts the
/// canonical user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");
        Self::with_jwt_secret(&secret)
    }

    pub fn with_jwt_secret(secret: &str) -> Self {
        AuthService {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthServiceError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthServiceError::ExpiredToken,
                _ => AuthServiceError::InvalidToken,
            })
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        Ok(self.verify_token(token)?.sub)
    }
}
