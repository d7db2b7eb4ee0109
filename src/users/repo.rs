use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User};

pub async fn list_all(db: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, occupation, gender, address, phone,
               avatar, status, battery, remote, signal, created_at, updated_at
        FROM users
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, occupation, gender, address, phone,
               avatar, status, battery, remote, signal, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, name, occupation, gender, address, phone,
               avatar, status, battery, remote, signal, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn create(db: &PgPool, new: NewUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, name, occupation, gender, address,
                           phone, status, battery, remote, signal)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, email, password_hash, name, occupation, gender, address, phone,
                  avatar, status, battery, remote, signal, created_at, updated_at
        "#,
    )
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.name)
    .bind(new.occupation)
    .bind(new.gender)
    .bind(new.address)
    .bind(new.phone)
    .bind(new.status)
    .bind(new.battery)
    .bind(new.remote)
    .bind(new.signal)
    .fetch_one(db)
    .await
}

/// Persists the mutable profile fields and the new update timestamp.
/// Email and password hash are deliberately not part of the SET list.
pub async fn update(db: &PgPool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $2, occupation = $3, gender = $4, address = $5, phone = $6,
            avatar = $7, status = $8, battery = $9, remote = $10, signal = $11,
            updated_at = $12
        WHERE id = $1
        RETURNING id, email, password_hash, name, occupation, gender, address, phone,
                  avatar, status, battery, remote, signal, created_at, updated_at
        "#,
    )
    .bind(user.id)
    .bind(user.name.as_deref())
    .bind(user.occupation.as_deref())
    .bind(user.gender.as_deref())
    .bind(user.address.as_deref())
    .bind(user.phone.as_deref())
    .bind(user.avatar.as_deref())
    .bind(user.status.as_deref())
    .bind(user.battery)
    .bind(user.remote)
    .bind(user.signal)
    .bind(user.updated_at)
    .fetch_one(db)
    .await
}

pub async fn delete_by_id(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
