use bytes::Bytes;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::User;

/// Registration body. Email and password are the only required fields;
/// the rest of the profile may be filled in now or later.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub battery: Option<i32>,
    pub remote: Option<bool>,
    pub signal: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued session token.
#[derive(Debug, Serialize)]
pub struct TokenData {
    pub token: String,
}

/// Echo of a deleted record's id.
#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub id: Uuid,
}

/// Outbound projection of a user record. The password hash never leaves
/// the repo layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub battery: Option<i32>,
    pub remote: Option<bool>,
    pub signal: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            occupation: u.occupation,
            gender: u.gender,
            avatar: u.avatar,
            address: u.address,
            phone: u.phone,
            status: u.status,
            battery: u.battery,
            remote: u.remote,
            signal: u.signal,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Parsed PATCH /update-user payload. Absent and empty text fields both
/// arrive here as `None`; only a deliberately non-empty value overwrites.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub avatar: Option<AvatarUpload>,
}

/// Raw avatar attachment as received from the multipart field.
#[derive(Debug)]
pub struct AvatarUpload {
    pub bytes: Bytes,
    pub content_type: String,
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
