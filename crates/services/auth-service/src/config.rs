//! Auth service configuration.

use std::env;

use common::{JwtConfig, SessionStorageConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};
use tracing::warn;
use uuid::Uuid;

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub jwt: JwtConfig,
    pub session: SessionStorageConfig,
}

impl Default for AuthServiceConfig {
    /// Per-process secret and default token lifetime.
    fn default() -> Self {
        Self {
            jwt: JwtConfig {
                secret: ephemeral_secret(),
                expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            },
            session: SessionStorageConfig::default(),
        }
    }
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing or short `JWT_SECRET` falls back to a random secret that
    /// lives as long as the process, so tokens do not survive a restart.
    pub fn from_env() -> Self {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_JWT_SECRET_LENGTH => secret,
            Ok(_) => {
                warn!(
                    "JWT_SECRET shorter than {} characters, using a per-process secret",
                    MIN_JWT_SECRET_LENGTH
                );
                ephemeral_secret()
            }
            Err(_) => {
                warn!("JWT_SECRET not set, using a per-process secret");
                ephemeral_secret()
            }
        };

        Self {
            jwt: JwtConfig {
                secret,
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .filter(|h: &i64| *h > 0)
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
            session: SessionStorageConfig {
                path: env::var("SESSION_FILE")
                    .unwrap_or_else(|_| SessionStorageConfig::default().path),
            },
        }
    }
}

fn ephemeral_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_secret_is_long_enough() {
        let secret = ephemeral_secret();
        assert!(secret.len() >= MIN_JWT_SECRET_LENGTH);
        assert_ne!(secret, ephemeral_secret());
    }

    #[test]
    fn test_default_config_never_signs_with_empty_secret() {
        let first = AuthServiceConfig::default();
        let second = AuthServiceConfig::default();

        assert!(first.jwt.secret.len() >= MIN_JWT_SECRET_LENGTH);
        assert_ne!(first.jwt.secret, second.jwt.secret);
        assert_eq!(first.jwt.expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
    }
}
