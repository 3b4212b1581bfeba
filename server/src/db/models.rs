use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored profile (the identity behind a member).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// A stored server from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServerRow {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    pub owner_profile_id: String,
    pub created_at: String,
}

/// A server membership joined with the member's profile name.
/// `role` is kept as stored; it is checked when converted to the domain model.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberRow {
    pub id: String,
    pub server_id: String,
    pub profile_id: String,
    pub role: String,
    pub profile_name: String,
    pub joined_at: String,
}

/// A stored channel. `channel_type` is kept as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChannelRow {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub channel_type: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a server with its owner membership and default channel.
pub struct NewServerParams<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub image_url: &'a str,
    pub invite_code: &'a str,
    pub owner_profile_id: &'a str,
    pub owner_member_id: &'a str,
    pub default_channel_id: &'a str,
    pub default_channel_name: &'a str,
    pub created_at: DateTime<Utc>,
}
