//! Table definition for the vote store.

use sqlx::PgConnection;

use crate::errors::VoteStoreError;

/// Idempotent DDL for the `votes` table, one row per voter.
pub const CREATE_VOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS votes (
    id VARCHAR(255) NOT NULL UNIQUE,
    vote VARCHAR(255) NOT NULL
)
"#;

/// Create the votes table if it does not exist yet.
///
/// Safe to run on every connect.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), VoteStoreError> {
    sqlx::query(CREATE_VOTES_TABLE).execute(conn).await?;
    Ok(())
}
