//! User accounts created from provider profiles.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::identity::{Provider, ProviderProfile};
use crate::db::now_unix;

/// Upsert a user from their provider profile. Returns the user's id.
///
/// Returning users are matched on `(provider, account id)` and get their
/// email, name and image refreshed.
pub async fn upsert_user(
    pool: &SqlitePool,
    provider: Provider,
    profile: &ProviderProfile,
) -> Result<String, sqlx::Error> {
    let now = now_unix();
    let row = sqlx::query(
        r"INSERT INTO users (id, email, name, image, provider, provider_account_id, created_at, updated_at)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
          ON CONFLICT (provider, provider_account_id) DO UPDATE SET
              email = excluded.email,
              name = excluded.name,
              image = excluded.image,
              updated_at = excluded.updated_at
          RETURNING id",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&profile.email)
    .bind(&profile.name)
    .bind(&profile.image)
    .bind(provider.as_str())
    .bind(&profile.account_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.get("id"))
}
