//! Authentication service - login, registration and bearer tokens.
//!
//! Uses the domain Password value object for hashing and verification.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{
    AccountId, Password, Session, User, UserAccount, MIN_NAME_LENGTH, SECONDS_PER_HOUR,
};
use record_service_lib::repository::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Verified against when the username is unknown.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$Wq3nO0v5y6Xn1QX9m0bT0b2c9gqk0Zp6yW0rR1m3vYo";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pegawai_id: Option<String>,
    /// Token id, used for revocation
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate and open a session.
    /// Unknown username and wrong password fail identically.
    async fn login(&self, username: &str, password: &str) -> AppResult<Session>;

    /// Create a blank employee with a linked USER account, then log in
    async fn register(&self, name: &str, username: &str, password: &str) -> AppResult<Session>;

    /// Resolve a bearer token to the current identity of its account
    async fn verify_token(&self, token: &str) -> AppResult<User>;

    /// Revoke a token. Unknown or malformed tokens are ignored.
    async fn logout(&self, token: &str) -> AppResult<()>;

    /// Token lifetime in seconds
    fn expires_in(&self) -> i64;
}

/// Concrete implementation of AuthService over the record store.
pub struct Authenticator {
    store: Arc<dyn RecordStore>,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    /// Revoked token ids with their expiry timestamp
    revoked: RwLock<HashMap<String, i64>>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(store: Arc<dyn RecordStore>, jwt_secret: String, jwt_expiration_hours: i64) -> Self {
        Self {
            store,
            jwt_secret,
            jwt_expiration_hours,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    fn issue_session(&self, account: &UserAccount) -> AppResult<Session> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            role: account.role.to_string(),
            pegawai_id: account.employee_id.as_ref().map(|id| id.to_string()),
            jti: Uuid::new_v4().to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Token encoding failed: {}", e)))?;

        Ok(Session {
            token,
            user: User::from(account),
        })
    }

    fn decode_claims(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "Token rejected");
            AppError::Unauthorized
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let secret = self.store.find_account_by_username(username).await?;

        let stored = match &secret {
            Some(secret) => secret.password.clone(),
            None => Password::from_hash(DUMMY_HASH),
        };
        let password_valid = stored.verify(password);

        let Some(secret) = secret.filter(|_| password_valid) else {
            warn!(username, "Login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let session = self.issue_session(&secret.account)?;
        info!(
            account_id = %secret.account.id,
            role = %secret.account.role,
            "Login succeeded"
        );
        Ok(session)
    }

    async fn register(&self, name: &str, username: &str, password: &str) -> AppResult<Session> {
        if name.trim().chars().count() < MIN_NAME_LENGTH {
            return Err(AppError::validation("Name is required"));
        }
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }

        if self.store.find_account_by_username(username).await?.is_some() {
            warn!(username, "Registration rejected: username taken");
            return Err(AppError::UsernameTaken);
        }

        let password = Password::new(password)?;
        let (employee, account) = self
            .store
            .register(name.trim().to_string(), username.to_string(), password)
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::UsernameTaken) {
                    warn!(username, "Registration rejected: username taken");
                }
            })?;

        info!(
            account_id = %account.id,
            employee_id = %employee.id,
            "Account registered"
        );
        self.issue_session(&account)
    }

    async fn verify_token(&self, token: &str) -> AppResult<User> {
        let claims = self.decode_claims(token)?;

        if self.revoked.read().await.contains_key(&claims.jti) {
            debug!(jti = %claims.jti, "Revoked token presented");
            return Err(AppError::Unauthorized);
        }

        // The account may have been deleted or changed since the token was issued.
        let secret = self
            .store
            .find_account_by_username(&claims.username)
            .await?
            .filter(|secret| secret.account.id == AccountId::new(claims.sub.as_str()))
            .ok_or(AppError::Unauthorized)?;

        Ok(User::from(secret.account))
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        let claims = match self.decode_claims(token) {
            Ok(claims) => claims,
            Err(_) => return Ok(()),
        };

        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti, claims.exp);

        info!(account_id = %claims.sub, "Logged out");
        Ok(())
    }

    fn expires_in(&self) -> i64 {
        self.jwt_expiration_hours * SECONDS_PER_HOUR
    }
}
