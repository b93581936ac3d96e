//! User entity model and DTOs.

use forkline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output. There is
/// deliberately no accessor that returns the hash as a credential; it is
/// only ever written through the lifecycle functions in
/// [`crate::credentials`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    /// When the current password stops being acceptable for login.
    pub password_expires_at: Option<Timestamp>,
    /// Nullable: users without a role hold no permissions.
    pub role_id: Option<DbId>,
    pub active: bool,
    pub stars: i32,
    pub salary: i32,
    pub commission: i32,
    pub credit_card: Option<i64>,
    pub cv: Option<i32>,
    pub ctype: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Full display name: first name, middle initial when present, last name.
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(first) = self.first_name.as_deref() {
            parts.push(first);
        }
        if let Some(mi) = self.middle_initial.as_deref() {
            parts.push(mi);
        }
        if let Some(last) = self.last_name.as_deref() {
            parts.push(last);
        }
        parts.join(" ")
    }

    /// Build the safe external representation, given the resolved role name.
    pub fn to_response(&self, role: Option<String>) -> UserResponse {
        UserResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name(),
            role,
            role_id: self.role_id,
            active: self.active,
            stars: self.stars,
            password_expires_at: self.password_expires_at,
            created_at: self.created_at,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Resolved role name (e.g. `"customer"`, `"manager"`), if any.
    pub role: Option<String>,
    pub role_id: Option<DbId>,
    pub active: bool,
    pub stars: i32,
    pub password_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub password_expires_at: Option<Timestamp>,
    pub role_id: Option<DbId>,
    pub active: bool,
    pub stars: i32,
    pub salary: i32,
    pub commission: i32,
    pub credit_card: Option<i64>,
    pub cv: Option<i32>,
    pub ctype: Option<String>,
}

impl Default for CreateUser {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            first_name: None,
            middle_initial: None,
            last_name: None,
            phone_number: None,
            address: None,
            password_hash: String::new(),
            password_expires_at: None,
            role_id: None,
            active: false,
            stars: 0,
            salary: 0,
            commission: 10,
            credit_card: None,
            cv: None,
            ctype: None,
        }
    }
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub role_id: Option<DbId>,
    pub active: Option<bool>,
    pub stars: Option<i32>,
    pub salary: Option<i32>,
    pub commission: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn named_user(first: Option<&str>, mi: Option<&str>, last: Option<&str>) -> User {
        User {
            id: 1,
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            first_name: first.map(String::from),
            middle_initial: mi.map(String::from),
            last_name: last.map(String::from),
            phone_number: None,
            address: None,
            password_hash: String::new(),
            password_expires_at: None,
            role_id: None,
            active: true,
            stars: 0,
            salary: 0,
            commission: 10,
            credit_card: None,
            cv: None,
            ctype: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn full_name_includes_middle_initial_when_present() {
        let user = named_user(Some("Ada"), Some("B"), Some("Lovelace"));
        assert_eq!(user.full_name(), "Ada B Lovelace");
    }

    #[test]
    fn full_name_skips_absent_parts() {
        let user = named_user(Some("Ada"), None, Some("Lovelace"));
        assert_eq!(user.full_name(), "Ada Lovelace");
        let user = named_user(None, None, None);
        assert_eq!(user.full_name(), "");
    }
}
