//! ActorEntity trait implementation for the User domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`User`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! See the trait implementation on [`User`] for method documentation.

use super::UserError;
use crate::framework::ActorEntity;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 255;
const NAME_MAX: usize = 50;

fn validation(msg: impl Into<String>) -> UserError {
    UserError::ValidationError(msg.into())
}

/// Trims a username and checks its length.
fn normalize_username(raw: &str) -> Result<String, UserError> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(validation(format!(
            "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    Ok(username.to_string())
}

/// Trims and lowercases an email. Blank input means "no email".
fn normalize_email(raw: Option<String>) -> Result<Option<String>, UserError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Ok(None);
    }
    if email.chars().count() > EMAIL_MAX {
        return Err(validation(format!("Email exceeds {EMAIL_MAX} characters")));
    }
    Ok(Some(email))
}

fn normalize_name(field: &str, raw: Option<String>) -> Result<Option<String>, UserError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let name = raw.trim().to_string();
    if name.chars().count() > NAME_MAX {
        return Err(validation(format!("{field} exceeds {NAME_MAX} characters")));
    }
    Ok(Some(name))
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    ///
    /// Username and email are normalized here so the uniqueness check compares
    /// the stored forms.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        if params.password_hash.is_empty() {
            return Err(validation("Password is required"));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            username: normalize_username(&params.username)?,
            email: normalize_email(params.email)?,
            password_hash: params.password_hash,
            first_name: normalize_name("firstName", params.first_name)?,
            last_name: normalize_name("lastName", params.last_name)?,
            role: params.role,
            created_at: now,
            updated_at: now,
            last_login: None,
        })
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `first_name`, `last_name`: profile fields
    /// - `last_login`: stamped by a successful login
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(first_name) = normalize_name("firstName", update.first_name)? {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = normalize_name("lastName", update.last_name)? {
            self.last_name = Some(last_name);
        }
        if let Some(last_login) = update.last_login {
            self.last_login = Some(last_login);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), UserError> {
        Ok(())
    }

    /// Usernames are unique; emails are unique when present.
    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.username == other.username {
            return Some(format!("username {} is taken", self.username));
        }
        match (&self.email, &other.email) {
            (Some(mine), Some(theirs)) if mine == theirs => {
                Some(format!("email {mine} is taken"))
            }
            _ => None,
        }
    }
}
