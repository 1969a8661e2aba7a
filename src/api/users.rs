use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::{
    error::AppResult,
    models::{User, UserData, UserId},
};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: UserId,
    #[serde(flatten)]
    pub user: UserData,
}

pub async fn all_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.all_users().await?))
}

pub async fn user_by_id(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.user_by_id(id).await?))
}

pub async fn add_user(
    State(state): State<AppState>,
    Json(user): Json<UserData>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.users.add_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.update_user(request.id, request.user).await?))
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    state.users.add_friend(id, friend_id).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    state.users.remove_friend(id, friend_id).await?;
    Ok(StatusCode::OK)
}

pub async fn friends_of(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.friends_of(id).await?))
}

pub async fn common_friends(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.common_friends(id, other_id).await?))
}
