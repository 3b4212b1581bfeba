use sqlx::Connection;
use sqlx::SqlitePool;

use crate::db::models::{NewServerParams, ServerRow};

/// Create a server, its owner's ADMIN membership and its default TEXT channel
/// in one transaction.
pub async fn create_server(pool: &SqlitePool, params: &NewServerParams<'_>) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let mut tx = conn.begin().await?;

    sqlx::query(
        "INSERT INTO servers (id, name, image_url, invite_code, owner_profile_id) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(params.id)
    .bind(params.name)
    .bind(params.image_url)
    .bind(params.invite_code)
    .bind(params.owner_profile_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO members (id, server_id, profile_id, role) VALUES (?, ?, ?, 'ADMIN')")
        .bind(params.owner_member_id)
        .bind(params.id)
        .bind(params.owner_profile_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO channels (id, server_id, name, channel_type, created_at) \
         VALUES (?, ?, ?, 'TEXT', ?)",
    )
    .bind(params.default_channel_id)
    .bind(params.id)
    .bind(params.default_channel_name)
    .bind(params.created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Get a server by ID.
pub async fn get_server(pool: &SqlitePool, server_id: &str) -> Result<Option<ServerRow>, sqlx::Error> {
    sqlx::query_as::<_, ServerRow>("SELECT * FROM servers WHERE id = ?")
        .bind(server_id)
        .fetch_optional(pool)
        .await
}

/// Get a server by its invite code.
pub async fn get_server_by_invite(
    pool: &SqlitePool,
    invite_code: &str,
) -> Result<Option<ServerRow>, sqlx::Error> {
    sqlx::query_as::<_, ServerRow>("SELECT * FROM servers WHERE invite_code = ?")
        .bind(invite_code)
        .fetch_optional(pool)
        .await
}

/// List all servers a profile is a member of.
pub async fn list_servers_for_profile(
    pool: &SqlitePool,
    profile_id: &str,
) -> Result<Vec<ServerRow>, sqlx::Error> {
    sqlx::query_as::<_, ServerRow>(
        "SELECT s.* FROM servers s \
         JOIN members m ON s.id = m.server_id \
         WHERE m.profile_id = ? \
         ORDER BY s.created_at, s.rowid",
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await
}
