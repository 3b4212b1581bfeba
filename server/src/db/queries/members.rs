use sqlx::SqlitePool;

use crate::db::models::MemberRow;

const MEMBER_COLUMNS: &str = "m.id, m.server_id, m.profile_id, m.role, \
                              p.name AS profile_name, m.joined_at";

/// Add a profile to a server. A second add for the same pair is ignored.
/// Returns whether a row was inserted.
pub async fn add_member(
    pool: &SqlitePool,
    id: &str,
    server_id: &str,
    profile_id: &str,
    role: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO members (id, server_id, profile_id, role) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(server_id)
    .bind(profile_id)
    .bind(role)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Get a profile's membership in a server.
pub async fn get_member(
    pool: &SqlitePool,
    server_id: &str,
    profile_id: &str,
) -> Result<Option<MemberRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members m \
         JOIN profiles p ON p.id = m.profile_id \
         WHERE m.server_id = ? AND m.profile_id = ?"
    ))
    .bind(server_id)
    .bind(profile_id)
    .fetch_optional(pool)
    .await
}

/// List a server's members with their profile names: admins, then
/// moderators, then guests, each by join order. Unrecognized roles sort last.
pub async fn list_members(pool: &SqlitePool, server_id: &str) -> Result<Vec<MemberRow>, sqlx::Error> {
    sqlx::query_as::<_, MemberRow>(&format!(
        "SELECT {MEMBER_COLUMNS} FROM members m \
         JOIN profiles p ON p.id = m.profile_id \
         WHERE m.server_id = ? \
         ORDER BY CASE m.role \
             WHEN 'ADMIN' THEN 0 \
             WHEN 'MODERATOR' THEN 1 \
             WHEN 'GUEST' THEN 2 \
             ELSE 3 END, \
         m.joined_at, m.rowid"
    ))
    .bind(server_id)
    .fetch_all(pool)
    .await
}

/// Change a member's role.
pub async fn update_member_role(
    pool: &SqlitePool,
    server_id: &str,
    profile_id: &str,
    role: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE members SET role = ? WHERE server_id = ? AND profile_id = ?")
        .bind(role)
        .bind(server_id)
        .bind(profile_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
