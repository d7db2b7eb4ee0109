use axum::extract::FromRef;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{LoginRequest, ProfileUpdate, RegisterRequest};
use super::jwt::JwtKeys;
use super::password;
use super::repo;
use super::repo_types::{NewUser, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Credential workflow: hash, persist, issue a token.
pub async fn register(state: &AppState, req: &RegisterRequest) -> Result<String, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".into(),
        ));
    }

    if repo::find_by_email(&state.db, &req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(ApiError::Conflict);
    }

    let hash = password::hash_password(&req.password, state.config.password.time_cost)
        .await
        .map_err(ApiError::Store)?;

    let user = repo::create(
        &state.db,
        NewUser {
            email: &req.email,
            password_hash: &hash,
            name: req.name.as_deref(),
            occupation: req.occupation.as_deref(),
            gender: req.gender.as_deref(),
            address: req.address.as_deref(),
            phone: req.phone.as_deref(),
            status: req.status.as_deref(),
            battery: req.battery,
            remote: req.remote,
            signal: req.signal,
        },
    )
    .await?;

    let token = JwtKeys::from_ref(state)
        .sign(&user.email, user.id)
        .map_err(ApiError::Store)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(token)
}

/// Credential workflow: fetch, compare, issue a token. Never mutates the
/// record.
pub async fn login(state: &AppState, req: &LoginRequest) -> Result<String, ApiError> {
    let user = repo::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %req.email, "login unknown email");
            ApiError::NotFound("account not found".into())
        })?;

    let ok = password::verify_password(&req.password, &user.password_hash)
        .await
        .map_err(ApiError::Store)?;
    if !ok {
        warn!(email = %user.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Auth(req.email.clone()));
    }

    let token = JwtKeys::from_ref(state)
        .sign(&user.email, user.id)
        .map_err(ApiError::Store)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(token)
}

/// Profile mutation workflow. The target id comes exclusively from the
/// verified identity; the record is only written when something changed.
pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<User, ApiError> {
    let mut user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found_id(user_id))?;

    let mut dirty = merge_profile(&mut user, &update);

    if let Some(avatar) = update.avatar {
        let key = avatar_key(user.id, &avatar.content_type);
        let url = state
            .storage
            .upload(&key, avatar.bytes, &avatar.content_type)
            .await
            .map_err(ApiError::Store)?;
        user.avatar = Some(url);
        dirty = true;
    }

    if dirty {
        user.updated_at = OffsetDateTime::now_utc();
        user = repo::update(&state.db, &user).await?;
        info!(user_id = %user.id, "profile updated");
    }

    Ok(user)
}

/// Physical delete. Any verified caller may remove any record; the
/// caller id is kept for the audit trail only.
pub async fn delete_user(state: &AppState, caller_id: Uuid, id: Uuid) -> Result<Uuid, ApiError> {
    let removed = repo::delete_by_id(&state.db, id).await?;
    if removed == 0 {
        warn!(user_id = %id, "delete target not found");
        return Err(ApiError::not_found_id(id));
    }
    info!(user_id = %id, deleted_by = %caller_id, "user deleted");
    Ok(id)
}

/// Applies the text-field subset of an update. Each field is merged
/// independently; untouched fields keep their stored value. Returns
/// whether anything changed.
fn merge_profile(user: &mut User, update: &ProfileUpdate) -> bool {
    let mut dirty = false;
    if let Some(name) = &update.name {
        user.name = Some(name.clone());
        dirty = true;
    }
    if let Some(address) = &update.address {
        user.address = Some(address.clone());
        dirty = true;
    }
    if let Some(phone) = &update.phone {
        user.phone = Some(phone.clone());
        dirty = true;
    }
    if let Some(occupation) = &update.occupation {
        user.occupation = Some(occupation.clone());
        dirty = true;
    }
    dirty
}

fn avatar_key(user_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("avatars/{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}
