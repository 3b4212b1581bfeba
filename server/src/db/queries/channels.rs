use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::models::ChannelRow;

/// Create a channel in a server.
pub async fn create_channel(
    pool: &SqlitePool,
    channel_id: &str,
    server_id: &str,
    name: &str,
    channel_type: &str,
    created_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO channels (id, server_id, name, channel_type, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(channel_id)
    .bind(server_id)
    .bind(name)
    .bind(channel_type)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// List all channels in a server, oldest first. Insertion order breaks ties.
pub async fn list_channels(pool: &SqlitePool, server_id: &str) -> Result<Vec<ChannelRow>, sqlx::Error> {
    sqlx::query_as::<_, ChannelRow>(
        "SELECT id, server_id, name, channel_type, created_at FROM channels \
         WHERE server_id = ? ORDER BY created_at, rowid",
    )
    .bind(server_id)
    .fetch_all(pool)
    .await
}
