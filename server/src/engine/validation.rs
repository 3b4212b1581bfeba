use serde::Deserialize;

/// Maximum server name length.
pub const MAX_SERVER_NAME_LENGTH: usize = 100;

/// Maximum server image URL length.
pub const MAX_IMAGE_URL_LENGTH: usize = 2000;

/// Maximum channel name length.
pub const MAX_CHANNEL_NAME_LENGTH: usize = 50;

/// Maximum profile display name length.
pub const MAX_PROFILE_NAME_LENGTH: usize = 32;

/// Name of the channel every new server starts with. Users cannot create another.
pub const DEFAULT_CHANNEL_NAME: &str = "general";

/// Length limits that deployments may tune.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_server_name_length: usize,
    pub max_image_url_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_server_name_length: MAX_SERVER_NAME_LENGTH,
            max_image_url_length: MAX_IMAGE_URL_LENGTH,
        }
    }
}

/// Fields of the "customize your server" dialog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServerForm {
    pub name: String,
    pub image_url: String,
}

/// Validate a server name. Required, and capped at the configured length
/// after trimming.
pub fn validate_server_name(name: &str, limits: &Limits) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Server name is required.".into());
    }
    if trimmed.chars().count() > limits.max_server_name_length {
        return Err(format!(
            "Server name too long (max {} characters)",
            limits.max_server_name_length
        ));
    }
    Ok(())
}

/// Validate the uploaded server image URL. Required, and capped at the configured length.
pub fn validate_image_url(image_url: &str, limits: &Limits) -> Result<(), String> {
    if image_url.trim().is_empty() {
        return Err("Server image is required.".into());
    }
    if image_url.chars().count() > limits.max_image_url_length {
        return Err(format!(
            "Image URL too long (max {} characters)",
            limits.max_image_url_length
        ));
    }
    Ok(())
}

pub fn validate_server_form(form: &CreateServerForm, limits: &Limits) -> Result<(), String> {
    validate_server_name(&form.name, limits)?;
    validate_image_url(&form.image_url, limits)
}

/// Validate a channel name. 1-50 chars, no spaces, and not the reserved default name.
pub fn validate_channel_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Channel name is required.".into());
    }
    if name.chars().count() > MAX_CHANNEL_NAME_LENGTH {
        return Err(format!(
            "Channel name too long (max {} characters)",
            MAX_CHANNEL_NAME_LENGTH
        ));
    }
    if name.contains(' ') {
        return Err("Channel name cannot contain spaces".into());
    }
    if name == DEFAULT_CHANNEL_NAME {
        return Err(format!("Channel name cannot be '{DEFAULT_CHANNEL_NAME}'"));
    }
    Ok(())
}

/// Validate a profile display name. 1-32 chars after trimming.
pub fn validate_profile_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Profile name is required.".into());
    }
    if trimmed.chars().count() > MAX_PROFILE_NAME_LENGTH {
        return Err(format!(
            "Profile name too long (max {} characters)",
            MAX_PROFILE_NAME_LENGTH
        ));
    }
    Ok(())
}
