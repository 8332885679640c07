//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Sessions are opaque random tokens stored in SQLite next to the user they
//! authenticate. The browser only ever sees the token inside a signed,
//! HttpOnly cookie; everything else stays server-side.
//!
//! TRADE-OFFS
//! ==========
//! Expired rows are filtered at read time and swept by a background task,
//! so a session is invalid the moment it expires even if the sweeper lags.

use std::fmt::Write;
use std::time::Duration;

use rand::Rng;
use sqlx::{Row, SqlitePool};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::db::now_unix;

/// Fallback label for a session user with neither email nor name.
pub const ANONYMOUS_LABEL: &str = "User";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: String,
    /// Email reported by the identity provider.
    pub email: Option<String>,
    /// Display name reported by the identity provider.
    pub name: Option<String>,
    /// Avatar image URL, if available.
    pub image: Option<String>,
    /// Unix timestamp after which the session is no longer valid.
    pub expires_at: i64,
}

impl SessionUser {
    /// Label shown for the signed-in viewer: email, then name, then `"User"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        display_label(self.email.as_deref(), self.name.as_deref())
    }
}

/// Null-coalescing label: a present value wins even if empty.
#[must_use]
pub fn display_label(email: Option<&str>, name: Option<&str>) -> String {
    email.or(name).unwrap_or(ANONYMOUS_LABEL).to_owned()
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &SqlitePool, user_id: &str, ttl_secs: i64) -> Result<String, sqlx::Error> {
    let token = generate_token();
    let now = now_unix();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .bind(now.saturating_add(ttl_secs))
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &SqlitePool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email, u.name, u.image, s.expires_at
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = ?1 AND s.expires_at > ?2",
    )
    .bind(token)
    .bind(now_unix())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
        image: r.get("image"),
        expires_at: r.get("expires_at"),
    }))
}

/// Delete a session by token. Deleting an unknown token is not an error.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = ?1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete every expired session, returning how many rows were removed.
pub async fn purge_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?1")
        .bind(now_unix())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Spawn the background sweeper that purges expired sessions.
pub fn spawn_session_sweeper(pool: SqlitePool, interval_secs: u64) -> JoinHandle<()> {
    info!(interval_secs, "session sweeper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match purge_expired(&pool).await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "purged expired sessions"),
                Err(e) => warn!(error = %e, "session purge failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
