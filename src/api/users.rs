//! `/users` routes: registration, login and profiles.

use super::auth::Authenticated;
use super::error::{ApiError, ApiJson, ApiPath};
use super::state::AppState;
use crate::model::{UserId, UserView};
use crate::user_actor::Registration;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/login", post(login))
        .route("/users/{id}", get(get_user).put(update_user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    username: Option<String>,
    password: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(ApiError::InvalidInput(
            "Username and password are required".into(),
        ));
    };
    let registration = Registration {
        username,
        password,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
    };
    let user = state.users.register(registration).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    user: UserView,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(ApiError::InvalidInput(
            "Email and password are required".into(),
        ));
    };
    let user = state.users.login(&email, &password).await?;
    let token = state.tokens.issue(user.id, user.role)?;
    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

async fn get_user(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserView>, ApiError> {
    let user = state.users.find_by_id(id).await?;
    Ok(Json(user.into()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdate {
    first_name: Option<String>,
    last_name: Option<String>,
}

async fn update_user(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(body): ApiJson<ProfileUpdate>,
) -> Result<Json<UserView>, ApiError> {
    if identity.user_id != id {
        return Err(ApiError::Forbidden("Cannot update other user's profile".into()));
    }
    let user = state
        .users
        .update_profile(id, body.first_name, body.last_name)
        .await?;
    Ok(Json(user.into()))
}
