//! Users repository
//!
//! Each operation is a single auto-committed statement against a borrowed
//! pool handle. Nothing is retried; engine failures propagate with their
//! diagnostic intact.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::Error;

/// A persisted user. `id` is generated by storage on insert.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All users, in whatever order the engine returns them.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    /// Primary-key lookup; `None` when the id does not exist.
    pub async fn get(&self, id: i32) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Insert a user and return the generated id. Empty fields are rejected
    /// before the pool is touched.
    pub async fn insert(&self, name: &str, email: &str) -> Result<i32, Error> {
        validate_insert(name, email)?;

        let id: i32 =
            sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(email)
                .fetch_one(self.pool)
                .await?;

        tracing::info!(id, "user added");
        Ok(id)
    }

    /// Delete one user. `false` when the id did not exist; absence is a
    /// normal outcome, not an error.
    pub async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        tracing::info!(id, deleted, "delete user");
        Ok(deleted)
    }

    /// Delete every user, returning how many were removed (0 is valid).
    pub async fn delete_all(&self) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM users").execute(self.pool).await?;

        let count = result.rows_affected();
        tracing::info!(count, "deleted all users");
        Ok(count)
    }
}

fn validate_insert(name: &str, email: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::Validation { field: "name" });
    }
    if email.trim().is_empty() {
        return Err(Error::Validation { field: "email" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Repository tests against a real database live in tests/handler_flow.rs
    // (run with --ignored and DB_* env vars set).

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            validate_insert("", "a@x.com"),
            Err(Error::Validation { field: "name" })
        ));
        assert!(matches!(
            validate_insert("Alice", "   "),
            Err(Error::Validation { field: "email" })
        ));
        assert!(validate_insert("Alice", "a@x.com").is_ok());
    }

    #[test]
    fn user_serializes_flat() {
        let user = User {
            id: 7,
            name: "Alice".into(),
            email: "a@x.com".into(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["email"], "a@x.com");
    }
}
