/*
 * Responsibility
 * - Users response DTOs
 * - password columns are never selected, so they cannot leak here
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::repos::user_repo::UserRow;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub created_date: DateTime<Utc>,
    pub last_login_date: Option<String>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.to_string(),
            firstname: row.firstname,
            lastname: row.lastname,
            username: row.username,
            email: row.email,
            created_date: row.created_date,
            last_login_date: row.last_login_date.map(|d| d.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub userlist: Vec<UserResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_row_serializes_with_string_id() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let res = UserResponse::from(UserRow {
            id: 42,
            firstname: "erwin".into(),
            lastname: "alberto".into(),
            username: "ealberto".into(),
            email: "ealberto-test@me.com".into(),
            created_date: created,
            last_login_date: None,
        });

        let json = serde_json::to_value(UserListResponse { userlist: vec![res] }).unwrap();
        let user = &json["userlist"][0];

        assert_eq!(user["id"], "42");
        assert_eq!(user["email"], "ealberto-test@me.com");
        assert!(user["last_login_date"].is_null());
        assert!(user.get("password").is_none());
    }
}
