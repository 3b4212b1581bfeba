use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use super::app_state::AppState;

/// The profile viewing the request, as asserted by the trusted session layer
/// through the configured identity header. No verification happens here.
pub struct Viewer {
    pub profile_id: String,
}

impl FromRequestParts<Arc<AppState>> for Viewer {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let profile_id = parts
            .headers
            .get(state.identity_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or((StatusCode::UNAUTHORIZED, "Not authenticated"))?;

        Ok(Viewer {
            profile_id: profile_id.to_string(),
        })
    }
}
