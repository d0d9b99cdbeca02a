//! Identity service - Owns authentication accounts and caller tokens.
//!
//! Deleting an absent account is reported as `AppError::NotFound`, never as
//! success; callers decide whether that counts as done.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, IdentityStore, JwtConfig, OptionExt};
use domain::{AuthRecord, UserId, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use crate::repository::AccountRepository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the caller
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Token issued for an account
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Identity service trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Get account by user id
    async fn get_account(&self, uid: &UserId) -> AppResult<AuthRecord>;

    /// Create an account (registration tooling and seeding)
    async fn create_account(&self, record: AuthRecord) -> AppResult<AuthRecord>;

    /// Delete an account; NotFound when it does not exist
    async fn delete_account(&self, uid: &UserId) -> AppResult<()>;

    /// Verify a caller token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Issue a token for an existing account
    async fn issue_token(&self, uid: &UserId) -> AppResult<TokenResponse>;
}

/// Concrete implementation of IdentityService backed by a repository.
pub struct IdentityManager {
    repo: Arc<dyn AccountRepository>,
    jwt: JwtConfig,
}

impl IdentityManager {
    /// Create new identity service instance
    pub fn new(repo: Arc<dyn AccountRepository>, jwt: JwtConfig) -> Self {
        Self { repo, jwt }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt.secret.as_bytes()
    }

    fn generate_token(&self, record: &AuthRecord) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: record.uid.to_string(),
            email: record.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl IdentityService for IdentityManager {
    async fn get_account(&self, uid: &UserId) -> AppResult<AuthRecord> {
        self.repo
            .find(uid)
            .await?
            .ok_or_not_found(format!("Account {}", uid))
    }

    async fn create_account(&self, record: AuthRecord) -> AppResult<AuthRecord> {
        let record = self.repo.insert(record).await?;
        info!(uid = %record.uid, "Account created");
        Ok(record)
    }

    async fn delete_account(&self, uid: &UserId) -> AppResult<()> {
        self.repo.delete(uid).await?;
        info!(uid = %uid, "Account deleted");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        if token_data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(token_data.claims)
    }

    async fn issue_token(&self, uid: &UserId) -> AppResult<TokenResponse> {
        let record = self.get_account(uid).await?;
        if record.disabled {
            return Err(AppError::Unauthorized);
        }
        debug!(uid = %uid, "Issuing token");
        self.generate_token(&record)
    }
}

#[async_trait]
impl IdentityStore for IdentityManager {
    async fn delete_account(&self, uid: &UserId) -> AppResult<()> {
        IdentityService::delete_account(self, uid).await
    }
}
