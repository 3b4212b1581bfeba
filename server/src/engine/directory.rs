use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::models::NewServerParams;
use crate::db::queries::{channels, members, profiles, servers};

use super::error::NavError;
use super::model::{
    Capabilities, Channel, ChannelType, Member, MemberRole, Profile, Server, ServerSummary,
};
use super::navigation::{self, NavigationIndex};
use super::validation::{self, CreateServerForm, DEFAULT_CHANNEL_NAME, Limits};

/// Everything the sidebar renders for one viewer.
#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub server: ServerSummary,
    pub viewer_role: Option<MemberRole>,
    pub capabilities: Capabilities,
    #[serde(flatten)]
    pub navigation: NavigationIndex,
}

#[derive(Debug)]
pub enum DirectoryError {
    /// Rejected user input.
    Validation(String),
    /// Stored data outside the closed role/channel-type sets.
    InvalidData(NavError),
    NotFound(&'static str),
    Forbidden(&'static str),
    Database(sqlx::Error),
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryError::Validation(msg) => write!(f, "{msg}"),
            DirectoryError::InvalidData(e) => write!(f, "data integrity fault: {e}"),
            DirectoryError::NotFound(what) => write!(f, "{what} not found"),
            DirectoryError::Forbidden(why) => write!(f, "{why}"),
            DirectoryError::Database(e) => write!(f, "database error: {e}"),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::InvalidData(e) => Some(e),
            DirectoryError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DirectoryError {
    fn from(e: sqlx::Error) -> Self {
        DirectoryError::Database(e)
    }
}

impl From<NavError> for DirectoryError {
    fn from(e: NavError) -> Self {
        DirectoryError::InvalidData(e)
    }
}

/// Data-access front for servers, channels and members. Every read goes to
/// the database; nothing is cached between calls.
#[derive(Clone)]
pub struct Directory {
    db: SqlitePool,
    limits: Limits,
}

impl Directory {
    pub fn new(db: SqlitePool, limits: Limits) -> Self {
        Self { db, limits }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    // ── Profiles ────────────────────────────────────────────────────

    pub async fn create_profile(&self, name: &str) -> Result<Profile, DirectoryError> {
        validation::validate_profile_name(name).map_err(DirectoryError::Validation)?;

        let id = Uuid::new_v4().to_string();
        let name = name.trim();
        profiles::create_profile(&self.db, &id, name).await?;

        info!(profile_id = %id, "profile created");
        Ok(Profile {
            id,
            name: name.to_string(),
        })
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>, DirectoryError> {
        Ok(profiles::get_profile(&self.db, profile_id)
            .await?
            .map(Profile::from))
    }

    // ── Servers ─────────────────────────────────────────────────────

    /// Create a server from the setup dialog. The creator becomes its admin
    /// and it starts with a `general` text channel.
    pub async fn create_server(
        &self,
        owner_profile_id: &str,
        form: &CreateServerForm,
    ) -> Result<ServerSummary, DirectoryError> {
        validation::validate_server_form(form, &self.limits).map_err(DirectoryError::Validation)?;

        if profiles::get_profile(&self.db, owner_profile_id).await?.is_none() {
            return Err(DirectoryError::NotFound("Profile"));
        }

        let server_id = Uuid::new_v4().to_string();
        let invite_code = Uuid::new_v4().simple().to_string();
        let owner_member_id = Uuid::new_v4().to_string();
        let channel_id = Uuid::new_v4().to_string();
        let name = form.name.trim();

        servers::create_server(
            &self.db,
            &NewServerParams {
                id: &server_id,
                name,
                image_url: &form.image_url,
                invite_code: &invite_code,
                owner_profile_id,
                owner_member_id: &owner_member_id,
                default_channel_id: &channel_id,
                default_channel_name: DEFAULT_CHANNEL_NAME,
                created_at: Utc::now(),
            },
        )
        .await?;

        info!(%server_id, %name, "server created");
        Ok(ServerSummary {
            id: server_id,
            name: name.to_string(),
            image_url: form.image_url.clone(),
            invite_code,
        })
    }

    pub async fn server_summary(&self, server_id: &str) -> Result<Option<ServerSummary>, DirectoryError> {
        Ok(servers::get_server(&self.db, server_id)
            .await?
            .map(ServerSummary::from))
    }

    pub async fn servers_for_profile(&self, profile_id: &str) -> Result<Vec<ServerSummary>, DirectoryError> {
        Ok(servers::list_servers_for_profile(&self.db, profile_id)
            .await?
            .into_iter()
            .map(ServerSummary::from)
            .collect())
    }

    /// Load a fresh snapshot: channels oldest first, members by role. One
    /// stored channel type or role outside the closed sets fails the whole load.
    pub async fn load_snapshot(&self, server_id: &str) -> Result<Option<Server>, DirectoryError> {
        let Some(row) = servers::get_server(&self.db, server_id).await? else {
            return Ok(None);
        };
        let channel_rows = channels::list_channels(&self.db, server_id).await?;
        let member_rows = members::list_members(&self.db, server_id).await?;

        let server = Server::from_rows(row, channel_rows, member_rows)?;
        Ok(Some(server))
    }

    /// Sidebar for `viewer_profile_id`, or `None` when the server does not exist.
    pub async fn sidebar(
        &self,
        server_id: &str,
        viewer_profile_id: &str,
    ) -> Result<Option<Sidebar>, DirectoryError> {
        let Some(server) = self.load_snapshot(server_id).await? else {
            return Ok(None);
        };

        let viewer_role = navigation::viewer_role(&server, viewer_profile_id);
        Ok(Some(Sidebar {
            server: server.summary(),
            viewer_role,
            capabilities: Capabilities::for_role(viewer_role),
            navigation: navigation::build(&server, viewer_profile_id),
        }))
    }

    // ── Members ─────────────────────────────────────────────────────

    pub async fn member_role(
        &self,
        server_id: &str,
        profile_id: &str,
    ) -> Result<Option<MemberRole>, DirectoryError> {
        match members::get_member(&self.db, server_id, profile_id).await? {
            Some(row) => Ok(Some(MemberRole::parse(&row.role)?)),
            None => Ok(None),
        }
    }

    /// Join a server through its invite code as a guest. Joining again
    /// returns the existing membership unchanged.
    pub async fn join_by_invite(
        &self,
        invite_code: &str,
        profile_id: &str,
    ) -> Result<(ServerSummary, Member), DirectoryError> {
        let server = servers::get_server_by_invite(&self.db, invite_code)
            .await?
            .ok_or(DirectoryError::NotFound("Invite"))?;
        if profiles::get_profile(&self.db, profile_id).await?.is_none() {
            return Err(DirectoryError::NotFound("Profile"));
        }

        let member_id = Uuid::new_v4().to_string();
        let inserted = members::add_member(
            &self.db,
            &member_id,
            &server.id,
            profile_id,
            MemberRole::Guest.as_str(),
        )
        .await?;
        if inserted {
            info!(server_id = %server.id, %profile_id, "member joined");
        }

        let row = members::get_member(&self.db, &server.id, profile_id)
            .await?
            .ok_or(DirectoryError::NotFound("Member"))?;
        Ok((ServerSummary::from(server), Member::try_from(row)?))
    }

    // ── Channels ────────────────────────────────────────────────────

    /// Create a channel. Only admins and moderators may do this.
    pub async fn create_channel(
        &self,
        server_id: &str,
        actor_profile_id: &str,
        name: &str,
        channel_type: &str,
    ) -> Result<Channel, DirectoryError> {
        validation::validate_channel_name(name).map_err(DirectoryError::Validation)?;
        let channel_type = ChannelType::parse(channel_type)
            .map_err(|e| DirectoryError::Validation(e.to_string()))?;

        if servers::get_server(&self.db, server_id).await?.is_none() {
            return Err(DirectoryError::NotFound("Server"));
        }
        match self.member_role(server_id, actor_profile_id).await? {
            Some(role) if role.can_manage_channels() => {}
            Some(_) => {
                warn!(%server_id, profile_id = %actor_profile_id, "channel creation denied");
                return Err(DirectoryError::Forbidden("Insufficient permissions"));
            }
            None => return Err(DirectoryError::Forbidden("Not a member of this server")),
        }

        let channel = Channel {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            channel_type,
            created_at: Utc::now(),
        };
        channels::create_channel(
            &self.db,
            &channel.id,
            server_id,
            &channel.name,
            channel.channel_type.as_str(),
            channel.created_at,
        )
        .await?;

        info!(%server_id, channel_id = %channel.id, kind = channel.channel_type.as_str(), "channel created");
        Ok(channel)
    }

    /// Change a member's role. Only admins may do this, and not to themselves.
    pub async fn set_member_role(
        &self,
        server_id: &str,
        actor_profile_id: &str,
        target_profile_id: &str,
        role: MemberRole,
    ) -> Result<(), DirectoryError> {
        match self.member_role(server_id, actor_profile_id).await? {
            Some(actor) if actor.can_manage_members() => {}
            _ => return Err(DirectoryError::Forbidden("Insufficient permissions")),
        }
        if actor_profile_id == target_profile_id {
            return Err(DirectoryError::Validation("Cannot change your own role".into()));
        }
        if !members::update_member_role(&self.db, server_id, target_profile_id, role.as_str()).await? {
            return Err(DirectoryError::NotFound("Member"));
        }
        info!(%server_id, profile_id = %target_profile_id, role = role.as_str(), "member role changed");
        Ok(())
    }
}
