use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AdminUser, AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

const MIN_PASSWORD_LEN: usize = 6;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Create an admin account with an argon2 password hash.
    #[instrument(skip(self, password))]
    pub async fn create_user(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if self.repo.find_by_username(username).await?.is_some() {
            debug!("user exists: {}", username);
            return Err(AuthError::Conflict);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let created = self.repo.create_user(username, &hash).await?;
        info!(user_id = %created.user.id, username = %created.user.username, "admin_user_created");
        Ok(created.user)
    }

    /// Create the account unless it already exists. Used for the bootstrap
    /// admin at startup; an existing password is left untouched.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        match self.create_user(username, password).await {
            Ok(_) => Ok(true),
            Err(AuthError::Conflict) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Authenticate and issue a signed token.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let found = self.repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&found.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }
        if !found.user.enabled {
            return Err(AuthError::Disabled);
        }

        let token = self.issue_token(&found.user.username)?;
        Ok(AuthSession { user: found.user, token })
    }

    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Validate signature and expiry; returns the claims on success.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn service() -> (AuthService, Arc<MockAuthRepository>) {
        let repo = Arc::new(MockAuthRepository::default());
        let cfg = AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 };
        (AuthService::new(repo.clone(), cfg), repo)
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let (svc, _) = service();
        svc.create_user("admin", "123456").await.unwrap();

        let session = svc.login(login("admin", "123456")).await.unwrap();
        assert_eq!(session.user.username, "admin");
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_user_is_unauthorized() {
        let (svc, _) = service();
        svc.create_user("admin", "123456").await.unwrap();

        assert!(matches!(svc.login(login("admin", "654321")).await, Err(AuthError::Unauthorized)));
        assert!(matches!(svc.login(login("nobody", "123456")).await, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn disabled_account_cannot_log_in() {
        let (svc, repo) = service();
        svc.create_user("admin", "123456").await.unwrap();
        repo.set_enabled("admin", false);
        assert!(matches!(svc.login(login("admin", "123456")).await, Err(AuthError::Disabled)));
    }

    #[tokio::test]
    async fn create_user_validates_and_rejects_duplicates() {
        let (svc, _) = service();
        assert!(matches!(svc.create_user("admin", "123").await, Err(AuthError::Validation(_))));
        assert!(matches!(svc.create_user("a b", "123456").await, Err(AuthError::Validation(_))));
        svc.create_user("admin", "123456").await.unwrap();
        assert!(matches!(svc.create_user("admin", "abcdef").await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let (svc, _) = service();
        assert!(svc.ensure_user("admin", "123456").await.unwrap());
        assert!(!svc.ensure_user("admin", "other-password").await.unwrap());
        assert!(svc.login(login("admin", "123456")).await.is_ok());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let (svc, _) = service();
        let other = AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 },
        );
        let token = other.issue_token("admin").unwrap();
        assert!(matches!(svc.verify_token(&token), Err(AuthError::TokenError(_))));
        assert!(svc.verify_token("garbage").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = AuthService::new(repo, AuthConfig { jwt_secret: "s".into(), token_ttl_hours: -1 });
        let token = svc.issue_token("admin").unwrap();
        assert!(svc.verify_token(&token).is_err());
    }
}
