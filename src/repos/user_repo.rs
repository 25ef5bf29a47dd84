/*
 * Responsibility
 * - SQLx reads against the `users` table
 * - Takes a PgPool; errors come back as RepoError
 * - No writes: user registration is handled elsewhere
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub created_date: DateTime<Utc>,
    pub last_login_date: Option<DateTime<Utc>>,
}

pub async fn list(db: &PgPool) -> Result<Vec<UserRow>, RepoError> {
    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, firstname, lastname, username, email, created_date, last_login_date
        FROM users
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: i64) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, firstname, lastname, username, email, created_date, last_login_date
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
