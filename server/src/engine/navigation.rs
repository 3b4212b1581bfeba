//! Role-aware navigation index for the server sidebar.
//!
//! Turns a server snapshot plus the viewer's profile id into the four fixed
//! sections the sidebar search widget renders: text, audio and video channels,
//! then every member except the viewer.

use serde::Serialize;

use super::model::{Channel, ChannelType, Member, MemberRole, Server};

pub const TEXT_CHANNELS_LABEL: &str = "Text Channels";
pub const AUDIO_CHANNELS_LABEL: &str = "Audio Channels";
pub const VIDEO_CHANNELS_LABEL: &str = "Video Channels";
pub const MEMBERS_LABEL: &str = "Members";

/// Icon the renderer draws next to an entry. Serialized as the icon name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTag {
    Hash,
    Mic,
    Video,
    ShieldCheck,
    ShieldAlert,
}

pub fn channel_icon(channel_type: ChannelType) -> IconTag {
    match channel_type {
        ChannelType::Text => IconTag::Hash,
        ChannelType::Audio => IconTag::Mic,
        ChannelType::Video => IconTag::Video,
    }
}

/// Guests carry no badge.
pub fn role_icon(role: MemberRole) -> Option<IconTag> {
    match role {
        MemberRole::Guest => None,
        MemberRole::Moderator => Some(IconTag::ShieldCheck),
        MemberRole::Admin => Some(IconTag::ShieldAlert),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Channel,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Channel id, or the member id (not the profile id) for member entries.
    pub id: String,
    pub display_name: String,
    pub icon_tag: Option<IconTag>,
}

impl Entry {
    fn channel(channel: &Channel) -> Self {
        Self {
            id: channel.id.clone(),
            display_name: channel.name.clone(),
            icon_tag: Some(channel_icon(channel.channel_type)),
        }
    }

    fn member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            display_name: member.profile.name.clone(),
            icon_tag: role_icon(member.role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: &'static str,
    pub kind: SectionKind,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationIndex {
    pub sections: Vec<Section>,
}

#[cfg(test)]
impl NavigationIndex {
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    /// Entries of the named section; empty when the label is unknown.
    pub fn entries(&self, label: &str) -> &[Entry] {
        self.section(label)
            .map(|s| s.entries.as_slice())
            .unwrap_or_default()
    }
}

/// Build the sidebar index for `viewer_profile_id`.
///
/// Always yields the four sections in order, empty ones included. Channels
/// keep the snapshot's order within their type. A viewer who is not a member
/// sees every member.
pub fn build(server: &Server, viewer_profile_id: &str) -> NavigationIndex {
    let mut text = Vec::new();
    let mut audio = Vec::new();
    let mut video = Vec::new();

    for channel in &server.channels {
        let bucket = match channel.channel_type {
            ChannelType::Text => &mut text,
            ChannelType::Audio => &mut audio,
            ChannelType::Video => &mut video,
        };
        bucket.push(Entry::channel(channel));
    }

    let members = server
        .members
        .iter()
        .filter(|m| m.profile_id != viewer_profile_id)
        .map(Entry::member)
        .collect();

    NavigationIndex {
        sections: vec![
            Section {
                label: TEXT_CHANNELS_LABEL,
                kind: SectionKind::Channel,
                entries: text,
            },
            Section {
                label: AUDIO_CHANNELS_LABEL,
                kind: SectionKind::Channel,
                entries: audio,
            },
            Section {
                label: VIDEO_CHANNELS_LABEL,
                kind: SectionKind::Channel,
                entries: video,
            },
            Section {
                label: MEMBERS_LABEL,
                kind: SectionKind::Member,
                entries: members,
            },
        ],
    }
}

/// The viewer's own role, or `None` when they are not a member.
pub fn viewer_role(server: &Server, viewer_profile_id: &str) -> Option<MemberRole> {
    server.member_for(viewer_profile_id).map(|m| m.role)
}
