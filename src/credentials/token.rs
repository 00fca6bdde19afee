use super::CredentialError;
use crate::model::{Role, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_EXPIRATION_HOURS: u64 = 24;
pub const DEFAULT_TOKEN_ISSUER: &str = "actor-shop";

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (numeric user ID).
    pub sub: String,
    pub role: Role,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, CredentialError> {
        self.sub
            .parse::<u32>()
            .map(UserId)
            .map_err(|_| CredentialError::InvalidToken)
    }
}

/// Issues and validates HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    expiration_hours: u64,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &SecretString, expiration_hours: u64, issuer: impl Into<String>) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            expiration_hours,
            issuer: issuer.into(),
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Generates a token for a user.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, CredentialError> {
        let now = Utc::now();
        let hours = i64::try_from(self.expiration_hours).unwrap_or(i64::MAX / 3600);
        let claims = Claims {
            sub: user_id.0.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(hours)).timestamp(),
            iss: self.issuer.clone(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, CredentialError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| CredentialError::TokenSigning(e.to_string()))
    }

    /// Validates and decodes a token.
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| CredentialError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(
            &SecretString::from(secret.to_string()),
            DEFAULT_TOKEN_EXPIRATION_HOURS,
            DEFAULT_TOKEN_ISSUER,
        )
    }

    #[test]
    fn issue_and_verify() {
        let tokens = issuer("test-secret-key-must-be-long-enough-for-hs256");
        let token = tokens.issue(UserId(7), Role::Admin).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), UserId(7));
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss, DEFAULT_TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let one = issuer("secret-one-must-be-long-enough-for-hs256");
        let two = issuer("secret-two-must-be-long-enough-for-hs256");
        let token = one.issue(UserId(1), Role::User).unwrap();
        assert_eq!(two.verify(&token), Err(CredentialError::InvalidToken));
        assert_eq!(two.verify("invalid-token"), Err(CredentialError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = issuer("test-secret-key-must-be-long-enough-for-hs256");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "1".into(),
            role: Role::User,
            iat: past.timestamp(),
            exp: (past + Duration::hours(1)).timestamp(),
            iss: DEFAULT_TOKEN_ISSUER.into(),
        };
        let token = tokens.sign(&claims).unwrap();
        assert_eq!(tokens.verify(&token), Err(CredentialError::InvalidToken));
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let secret = SecretString::from("shared-secret-long-enough-for-hs256-use".to_string());
        let theirs = TokenIssuer::new(&secret, 1, "someone-else");
        let ours = TokenIssuer::new(&secret, 1, DEFAULT_TOKEN_ISSUER);
        let token = theirs.issue(UserId(1), Role::User).unwrap();
        assert_eq!(ours.verify(&token), Err(CredentialError::InvalidToken));
    }
}
