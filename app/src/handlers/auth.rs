use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    core::state::AppState,
    models::user::Model as User,
    repos::users::UsersRepo,
    utils::{
        jwt::create_jwt,
        password::{hash_password, verify_password},
        response::APIError,
    },
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub user_id: String,
}

pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), APIError> {
    payload
        .validate()
        .map_err(|e| APIError::BadRequest(e.to_string()))?;

    let users_repo = UsersRepo::new(state.database.clone());

    if users_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(APIError::Conflict(
            "User with same email already exists.".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| APIError::Internal(format!("Failed to hash password: {}", e)))?;

    let user = users_repo
        .create(payload.name, payload.email, password_hash)
        .await?;

    info!("Account created for {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse { user_id: user.id }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub token: String,
}

pub async fn authenticate_with_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthenticateRequest>,
) -> Result<(StatusCode, Json<AuthenticateResponse>), APIError> {
    let users_repo = UsersRepo::new(state.database.clone());

    // Same failure for unknown email, passwordless account and bad password,
    // so callers cannot probe which emails are registered.
    let invalid_credentials = || APIError::BadRequest("Invalid credentials.".to_string());

    let user = users_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_hash = user
        .password_hash
        .clone()
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&payload.password, &password_hash) {
        return Err(invalid_credentials());
    }

    let user = users_repo.touch_last_login(user).await?;

    let token = create_jwt(
        user.id.clone(),
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )
    .map_err(|e| APIError::Internal(format!("Failed to create session token: {}", e)))?;

    info!("User authenticated: {}", user.email);

    Ok((StatusCode::CREATED, Json(AuthenticateResponse { token })))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
}

pub async fn get_profile(Extension(user): Extension<User>) -> Json<ProfileResponse> {
    Json(ProfileResponse { user })
}
