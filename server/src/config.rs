use anyhow::Context;
use axum::http::HeaderName;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::engine::validation::{Limits, MAX_IMAGE_URL_LENGTH, MAX_SERVER_NAME_LENGTH};

/// Top-level configuration, loaded from sidebar.toml.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub identity: IdentitySection,
    pub limits: LimitsSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub web_address: String,
    /// Origin allowed by CORS. Localhost origins allow any.
    pub public_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            web_address: "0.0.0.0:8080".into(),
            public_url: "http://localhost:8080".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite:sidebar.db?mode=rwc".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IdentitySection {
    /// Request header carrying the viewer's profile id, set by the trusted
    /// session layer in front of this service.
    pub header: String,
}

impl Default for IdentitySection {
    fn default() -> Self {
        Self {
            header: "x-profile-id".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    pub max_server_name_length: usize,
    pub max_image_url_length: usize,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_server_name_length: MAX_SERVER_NAME_LENGTH,
            max_image_url_length: MAX_IMAGE_URL_LENGTH,
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file. Falls back to defaults if the file doesn't exist.
    /// Environment variables override TOML values.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {path}"))?;
            Self::from_toml(&contents).with_context(|| format!("failed to parse config file {path}"))?
        } else {
            info!("No config file found at {}, using defaults", path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.normalize()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("WEB_ADDRESS") {
            self.server.web_address = v;
        }
        if let Some(v) = var("PUBLIC_URL") {
            self.server.public_url = v;
        }
        if let Some(v) = var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = var("IDENTITY_HEADER")
            && !v.trim().is_empty()
        {
            self.identity.header = v;
        }
        if let Some(v) = var("MAX_SERVER_NAME_LENGTH")
            && let Ok(len) = v.parse()
        {
            self.limits.max_server_name_length = len;
        }
        if let Some(v) = var("MAX_IMAGE_URL_LENGTH")
            && let Ok(len) = v.parse()
        {
            self.limits.max_image_url_length = len;
        }
    }

    /// Trim and lower-case the identity header, whichever source set it, and
    /// reject names that can never appear on a request.
    fn normalize(&mut self) -> anyhow::Result<()> {
        let header = self.identity.header.trim().to_ascii_lowercase();
        HeaderName::from_bytes(header.as_bytes())
            .with_context(|| format!("invalid identity header name {header:?}"))?;
        self.identity.header = header;
        Ok(())
    }

    /// Validation limits for the directory layer.
    pub fn to_limits(&self) -> Limits {
        Limits {
            max_server_name_length: self.limits.max_server_name_length,
            max_image_url_length: self.limits.max_image_url_length,
        }
    }
}
