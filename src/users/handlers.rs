use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    users::{
        dto::{CreateUserRequest, UpdateUserRequest},
        repo_types::{NewUser, User, UserChanges},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let user = state.users.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<User>)> {
    let Json(payload) = payload?;
    let new_user = NewUser::try_from(payload)?;

    let user = state.users.create(&new_user).await.map_err(|e| {
        warn!(error = %e, "create user failed");
        ApiError::from(e)
    })?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/users/{}", user.id).parse::<HeaderValue>() {
        headers.insert(header::LOCATION, location);
    }

    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, headers, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let changes = UserChanges::try_from(payload)?;

    let user = state
        .users
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    if !state.users.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
