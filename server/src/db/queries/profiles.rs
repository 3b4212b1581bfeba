use sqlx::SqlitePool;

use crate::db::models::ProfileRow;

/// Create a profile.
pub async fn create_profile(pool: &SqlitePool, id: &str, name: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO profiles (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

/// Get a profile by ID.
pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT id, name, created_at FROM profiles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
