//! User table operations.

use crate::Result;
use crate::backend::errors::BackendError;
use crate::user::{NewUser, User, UserId};

use super::{Sqlite, SqlxResultExt, is_unique_violation};

type UserRow = (i64, String, String, String);

fn from_row((id, email, password, name): UserRow) -> User {
    User {
        id: UserId(id),
        email,
        name,
        password_hash: password,
    }
}

/// Insert a user, failing with `EmailTaken` if the email is already stored.
pub async fn insert(backend: &Sqlite, user: NewUser) -> Result<User> {
    let mut tx = backend
        .pool()
        .begin()
        .await
        .sql_context("Failed to begin transaction")?;

    let existing: Option<(i64,)> = sqlx::query_as(r#"SELECT id FROM "user" WHERE email = ?"#)
        .bind(&user.email)
        .fetch_optional(&mut *tx)
        .await
        .sql_context("Failed to check email")?;

    if existing.is_some() {
        return Err(BackendError::EmailTaken { email: user.email }.into());
    }

    let inserted: std::result::Result<(i64,), sqlx::Error> = sqlx::query_as(
        r#"INSERT INTO "user" (email, password, name) VALUES (?, ?, ?) RETURNING id"#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .fetch_one(&mut *tx)
    .await;

    let (id,) = match inserted {
        Ok(row) => row,
        Err(e) if is_unique_violation(&e) => {
            return Err(BackendError::EmailTaken { email: user.email }.into());
        }
        Err(e) => return Err(e).sql_context("Failed to insert user"),
    };

    tx.commit().await.sql_context("Failed to commit user")?;
    Ok(user.into_user(UserId(id)))
}

/// Get a user by id.
pub async fn get(backend: &Sqlite, id: UserId) -> Result<Option<User>> {
    let row: Option<UserRow> =
        sqlx::query_as(r#"SELECT id, email, password, name FROM "user" WHERE id = ?"#)
            .bind(id.0)
            .fetch_optional(backend.pool())
            .await
            .sql_context("Failed to get user")?;

    Ok(row.map(from_row))
}

/// Get a user by exact email.
pub async fn find_by_email(backend: &Sqlite, email: &str) -> Result<Option<User>> {
    let row: Option<UserRow> =
        sqlx::query_as(r#"SELECT id, email, password, name FROM "user" WHERE email = ?"#)
            .bind(email)
            .fetch_optional(backend.pool())
            .await
            .sql_context("Failed to find user by email")?;

    Ok(row.map(from_row))
}
