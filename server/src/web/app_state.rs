use crate::engine::directory::Directory;

/// Shared state handed to every handler.
pub struct AppState {
    pub directory: Directory,
    /// Lower-case header name carrying the viewer's profile id.
    pub identity_header: String,
    pub public_url: String,
}
