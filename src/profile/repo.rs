use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::profile::model::ProfileData;

/// Loads a user's profile, or the guest defaults when no row exists yet.
/// A row appears on first mutation; sign-out never deletes it.
pub async fn load_or_default(db: &PgPool, user_id: Uuid) -> anyhow::Result<ProfileData> {
    let row: Option<(serde_json::Value,)> =
        sqlx::query_as(r#"SELECT data FROM profiles WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_optional(db)
            .await
            .context("load profile")?;

    match row {
        Some((value,)) => serde_json::from_value(value).context("deserialize profile"),
        None => Ok(ProfileData::default()),
    }
}

/// Applies `mutate` to the profile and persists the result, all inside one
/// transaction holding a row lock, so concurrent mutations for the same user
/// serialize instead of overwriting each other. The write is acknowledged:
/// the caller gets the committed state or the error.
///
/// `mutate` returning false declines the edit; nothing is written and `None`
/// is returned.
pub async fn update<F>(db: &PgPool, user_id: Uuid, mutate: F) -> anyhow::Result<Option<ProfileData>>
where
    F: FnOnce(&mut ProfileData) -> bool,
{
    let mut tx = db.begin().await.context("begin profile update")?;

    let row: Option<(serde_json::Value,)> =
        sqlx::query_as(r#"SELECT data FROM profiles WHERE user_id = $1 FOR UPDATE"#)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await
            .context("lock profile")?;
    let mut profile = match row {
        Some((value,)) => serde_json::from_value(value).context("deserialize profile")?,
        None => ProfileData::default(),
    };

    if !mutate(&mut profile) {
        // Dropping the transaction rolls the lock back.
        return Ok(None);
    }

    let data = serde_json::to_value(&profile).context("serialize profile")?;
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, data, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (user_id) DO UPDATE SET data = EXCLUDED.data, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(data)
    .execute(&mut *tx)
    .await
    .context("save profile")?;
    tx.commit().await.context("commit profile update")?;
    Ok(Some(profile))
}
