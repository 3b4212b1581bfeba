use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{ChannelRow, MemberRow, ProfileRow, ServerRow};

use super::error::NavError;

/// Opaque identity token of a person.
pub type ProfileId = String;

/// Permission tier of a member within one server.
///
/// Ordered `Guest < Moderator < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Guest,
    Moderator,
    Admin,
}

impl MemberRole {
    /// Parse the stored representation. Anything outside the three tiers is a
    /// data-integrity fault.
    pub fn parse(s: &str) -> Result<Self, NavError> {
        match s {
            "GUEST" => Ok(Self::Guest),
            "MODERATOR" => Ok(Self::Moderator),
            "ADMIN" => Ok(Self::Admin),
            other => Err(NavError::invalid_enum("role", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "GUEST",
            Self::Moderator => "MODERATOR",
            Self::Admin => "ADMIN",
        }
    }

    pub fn can_manage_channels(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }

    pub fn can_manage_server(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_manage_members(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Management actions the sidebar header offers a viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub manage_channels: bool,
    pub manage_server: bool,
    pub manage_members: bool,
}

impl Capabilities {
    /// Non-members get nothing.
    pub fn for_role(role: Option<MemberRole>) -> Self {
        match role {
            Some(role) => Self {
                manage_channels: role.can_manage_channels(),
                manage_server: role.can_manage_server(),
                manage_members: role.can_manage_members(),
            },
            None => Self::default(),
        }
    }
}

/// Kind of communication room. Fixed when the channel is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelType {
    Text,
    Audio,
    Video,
}

impl ChannelType {
    pub fn parse(s: &str) -> Result<Self, NavError> {
        match s {
            "TEXT" => Ok(Self::Text),
            "AUDIO" => Ok(Self::Audio),
            "VIDEO" => Ok(Self::Video),
            other => Err(NavError::invalid_enum("channel_type", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// A profile's participation in one server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub profile_id: ProfileId,
    pub role: MemberRole,
    pub profile: Profile,
}

impl TryFrom<MemberRow> for Member {
    type Error = NavError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            role: MemberRole::parse(&row.role)?,
            profile: Profile {
                id: row.profile_id.clone(),
                name: row.profile_name,
            },
            id: row.id,
            profile_id: row.profile_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ChannelRow> for Channel {
    type Error = NavError;

    fn try_from(row: ChannelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            channel_type: ChannelType::parse(&row.channel_type)?,
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        })
    }
}

/// Public-facing description of a server, without its channels or members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
}

impl From<ServerRow> for ServerSummary {
    fn from(row: ServerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            invite_code: row.invite_code,
        }
    }
}

/// Immutable snapshot of a server aggregate.
///
/// `channels` are in ascending creation order and `members` in role order
/// (admins, moderators, guests); both orders come from the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub invite_code: String,
    pub channels: Vec<Channel>,
    pub members: Vec<Member>,
}

impl Server {
    /// Assemble a snapshot from stored rows, keeping the row order.
    /// Fails on the first channel type or member role outside the closed sets.
    pub fn from_rows(
        server: ServerRow,
        channels: Vec<ChannelRow>,
        members: Vec<MemberRow>,
    ) -> Result<Self, NavError> {
        let channels = channels
            .into_iter()
            .map(Channel::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let members = members
            .into_iter()
            .map(Member::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let summary = ServerSummary::from(server);

        Ok(Self {
            id: summary.id,
            name: summary.name,
            image_url: summary.image_url,
            invite_code: summary.invite_code,
            channels,
            members,
        })
    }

    pub fn summary(&self) -> ServerSummary {
        ServerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            invite_code: self.invite_code.clone(),
        }
    }

    pub fn member_for(&self, profile_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.profile_id == profile_id)
    }
}
