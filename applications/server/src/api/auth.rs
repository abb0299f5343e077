/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::bearer_token,
    services::Claims,
    state::AppState,
};
use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub credentials: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/users/authenticate
pub async fn authenticate(
    State(app_state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthenticateResponse>> {
    let credentials = app_state
        .directory
        .authenticate(&req.email, &req.password)
        .await?;
    Ok(Json(AuthenticateResponse { credentials }))
}

/// POST /api/users/token
pub async fn issue_token(
    State(app_state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>> {
    let token = app_state
        .directory
        .authenticate_and_issue_token(&req.email, &req.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/users/validate
/// Reads the token from the `Authorization: Bearer` header
pub async fn validate_token(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Claims>> {
    let token = bearer_token(&headers).ok_or(ServerError::InvalidToken)?;
    let claims = app_state.directory.validate_token(token)?;
    Ok(Json(claims))
}
