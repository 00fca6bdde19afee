use crate::clients::actor_client::ActorClient;
use crate::credentials::{verify_password, PasswordHasherConfig};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Role, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::{Registration, UserError};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Client for interacting with the User actor.
///
/// Owns the password-hashing configuration, so plaintext passwords never reach
/// the actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    hasher: PasswordHasherConfig,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>, hasher: PasswordHasherConfig) -> Self {
        Self { inner, hasher }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Conflict(reason) => UserError::AlreadyExists(reason),
            other => other
                .into_entity_error::<UserError>()
                .unwrap_or_else(|e| UserError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl UserClient {
    /// Fetches a user, treating absence as an error.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Registers a regular user.
    pub async fn register(&self, registration: Registration) -> Result<User, UserError> {
        self.register_with_role(registration, Role::User).await
    }

    /// Hashes the password off the async runtime, then stores the user.
    ///
    /// Username/email collisions come back from the actor as `AlreadyExists`.
    #[instrument(skip(self))]
    pub async fn register_with_role(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<User, UserError> {
        if registration.username.trim().is_empty() || registration.password.is_empty() {
            return Err(UserError::ValidationError(
                "Username and password are required".into(),
            ));
        }

        let hasher = self.hasher;
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| UserError::CredentialError(e.to_string()))?
            .map_err(|e| UserError::CredentialError(e.to_string()))?;

        let payload = UserCreate {
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            role,
        };
        debug!("Sending request");
        let id = self.inner.create(payload).await.map_err(Self::map_error)?;
        info!(%id, ?role, "User registered");
        self.find_by_id(id).await
    }

    /// Looks up a user by (normalized) email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = email.trim().to_lowercase();
        let mut found = self
            .inner
            .find(move |user| user.email.as_deref() == Some(email.as_str()))
            .await
            .map_err(Self::map_error)?;
        Ok(found.pop())
    }

    /// Checks an email/password pair and stamps `last_login` on success.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, UserError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(UserError::ValidationError(
                "Email and password are required".into(),
            ));
        }
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let hash = user.password_hash.clone();
        let candidate = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| UserError::CredentialError(e.to_string()))?;
        if !valid {
            debug!(id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let update = UserUpdate {
            last_login: Some(Utc::now()),
            ..Default::default()
        };
        self.inner.update(user.id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<User, UserError> {
        debug!("Sending request");
        let update = UserUpdate {
            first_name,
            last_name,
            last_login: None,
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
