use axum::{
    extract::{multipart::Field, DefaultBodyLimit, Multipart, Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    non_empty, AvatarUpload, DeletedUser, LoginRequest, ProfileUpdate, PublicUser,
    RegisterRequest, TokenData,
};
use super::extractors::AuthUser;
use super::{repo, services};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/get", get(list_users))
        .route("/get/:user_id", get(get_user))
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/load", get(load_user))
        .route("/update-user", patch(update_user))
        .route("/delete-user/:user_id", delete(delete_user))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PublicUser>>>, ApiError> {
    let users = repo::list_all(&state.db).await?;
    let data: Vec<PublicUser> = users.into_iter().map(PublicUser::from).collect();
    let count = data.len();
    Ok(Json(
        ApiResponse::success("data fetch successfully", data).with_count(count),
    ))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Option<PublicUser>>>, ApiError> {
    let user = repo::find_by_id(&state.db, user_id).await?;
    Ok(Json(ApiResponse::success(
        "data fetch successfully",
        user.map(PublicUser::from),
    )))
}

#[instrument(skip(state))]
pub async fn load_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found_id(user_id))?;
    Ok(Json(ApiResponse::success(
        "data fetch successfully",
        PublicUser::from(user),
    )))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<TokenData>>, ApiError> {
    let token = services::register(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "User was created",
        TokenData { token },
    )))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenData>>, ApiError> {
    let token = services::login(&state, &payload).await?;
    Ok(Json(ApiResponse::success(
        "login successfully",
        TokenData { token },
    )))
}

#[instrument(skip(state, multipart))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PublicUser>>, ApiError> {
    let update = parse_profile_update(multipart).await?;
    let user = services::update_profile(&state, user_id, update).await?;
    Ok(Json(ApiResponse::success(
        "data update successfully",
        PublicUser::from(user),
    )))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedUser>>, ApiError> {
    let id = services::delete_user(&state, caller_id, user_id).await?;
    Ok(Json(ApiResponse::success(
        "data delete successfully",
        DeletedUser { id },
    )))
}

/// Collects the multipart body into an update payload. Text fields left
/// empty by the client count as absent, never as "clear the field".
async fn parse_profile_update(mut multipart: Multipart) -> Result<ProfileUpdate, ApiError> {
    let mut update = ProfileUpdate::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("name") => update.name = non_empty(read_text(field).await?),
            Some("address") => update.address = non_empty(read_text(field).await?),
            Some("phone") => update.phone = non_empty(read_text(field).await?),
            Some("occupation") => update.occupation = non_empty(read_text(field).await?),
            Some("avatar") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                if !bytes.is_empty() {
                    update.avatar = Some(AvatarUpload {
                        bytes,
                        content_type,
                    });
                }
            }
            _ => {}
        }
    }
    Ok(update)
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(bad_multipart)
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(format!("invalid multipart payload: {e}"))
}
