//! Schema bootstrap
//!
//! The table is normally provisioned out of band; `run` exists for local
//! development and integration tests (`fixtured --migrate`).

use sqlx::PgPool;

use crate::error::Error;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name text NOT NULL,
    email text NOT NULL
)
"#;

/// Create the users table if it does not exist.
pub async fn run(pool: &PgPool) -> Result<(), Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    tracing::info!("users table ready");
    Ok(())
}
