/// Account API routes
use crate::{
    error::{Result, ServerError},
    services::{Caller, CreateAccount, FindQuery},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tessera_core::{Account, AccountFilter, AccountId, Pagination};

/// Query string accepted by `GET /api/users`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Milliseconds since the Unix epoch
    pub updated_since: Option<i64>,
    #[serde(default)]
    pub credentials: bool,
}

impl ListParams {
    fn into_query(self) -> Result<FindQuery> {
        let updated_since = self
            .updated_since
            .map(|millis| {
                DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
                    ServerError::validation("updated_since must be a millisecond timestamp")
                })
            })
            .transpose()?;

        Ok(FindQuery {
            filter: AccountFilter {
                id: self.id.map(AccountId::new),
                name: self.name,
                email: self.email,
                updated_since,
            },
            page: Pagination::new(self.limit, self.offset),
            include_credential: self.credentials,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
}

/// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    caller: Caller,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Account>>> {
    let accounts = app_state.directory.find(&caller, params.into_query()?).await?;
    Ok(Json(accounts))
}

/// GET /api/users/:id
pub async fn get_user(
    State(app_state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<Account>> {
    let account = app_state
        .directory
        .find_one(&caller, AccountId::new(id))
        .await?;
    Ok(Json(account))
}

/// POST /api/users
/// Admin only
pub async fn create_user(
    State(app_state): State<AppState>,
    caller: Caller,
    Json(req): Json<CreateAccount>,
) -> Result<Json<Account>> {
    let account = app_state.directory.create(&caller, req).await?;
    Ok(Json(account))
}

/// PATCH /api/users
pub async fn update_user(
    State(app_state): State<AppState>,
    caller: Caller,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Account>> {
    let account = app_state
        .directory
        .update(&caller, AccountId::new(req.id), &req.name)
        .await?;
    Ok(Json(account))
}

/// DELETE /api/users
/// Admin only; soft-deletes the account
pub async fn delete_user(
    State(app_state): State<AppState>,
    caller: Caller,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<Account>> {
    let account = app_state
        .directory
        .delete(&caller, AccountId::new(req.id))
        .await?;
    Ok(Json(account))
}
