use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::engine::directory::DirectoryError;
use crate::engine::model::{Member, MemberRole, ServerSummary};
use crate::engine::validation::CreateServerForm;

use super::app_state::AppState;
use super::identity::Viewer;

/// Map a directory failure onto a status code. Integrity and database
/// faults are logged and hidden behind a generic message.
fn error_response(e: DirectoryError) -> Response {
    match e {
        DirectoryError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        DirectoryError::NotFound(what) => {
            (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
        }
        DirectoryError::Forbidden(why) => (StatusCode::FORBIDDEN, why).into_response(),
        DirectoryError::InvalidData(e) => {
            error!(error = %e, "stored server data is invalid");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid server data").into_response()
        }
        DirectoryError::Database(e) => {
            error!(error = %e, "database error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// GET /api/health
pub async fn health() -> &'static str {
    "ok"
}

// ── Profiles ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
}

/// POST /api/profiles — register a profile.
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProfileRequest>,
) -> Response {
    match state.directory.create_profile(&body.name).await {
        Ok(profile) => (StatusCode::CREATED, Json(profile)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/profiles/:id
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Response {
    match state.directory.get_profile(&profile_id).await {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => error_response(e),
    }
}

// ── Servers ─────────────────────────────────────────────

/// GET /api/servers — servers the viewer belongs to.
pub async fn list_servers(State(state): State<Arc<AppState>>, viewer: Viewer) -> Response {
    match state.directory.servers_for_profile(&viewer.profile_id).await {
        Ok(servers) => Json(servers).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/servers — create a server from the setup dialog.
pub async fn create_server(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Json(form): Json<CreateServerForm>,
) -> Response {
    match state.directory.create_server(&viewer.profile_id, &form).await {
        Ok(server) => (StatusCode::CREATED, Json(server)).into_response(),
        Err(e) => {
            warn!(profile_id = %viewer.profile_id, error = %e, "server creation rejected");
            error_response(e)
        }
    }
}

/// GET /api/servers/:id — server info, members only.
pub async fn get_server(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Path(server_id): Path<String>,
) -> Response {
    match state.directory.member_role(&server_id, &viewer.profile_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::FORBIDDEN, "Not a member of this server").into_response(),
        Err(e) => return error_response(e),
    }

    match state.directory.server_summary(&server_id).await {
        Ok(Some(server)) => Json(server).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Server not found").into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/servers/:id/navigation — the viewer's sidebar index.
pub async fn get_navigation(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Path(server_id): Path<String>,
) -> Response {
    match state.directory.sidebar(&server_id, &viewer.profile_id).await {
        Ok(Some(sidebar)) => Json(sidebar).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Server not found").into_response(),
        Err(e) => error_response(e),
    }
}

// ── Channels ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub channel_type: String,
}

/// POST /api/servers/:id/channels — admins and moderators only.
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Path(server_id): Path<String>,
    Json(body): Json<CreateChannelRequest>,
) -> Response {
    match state
        .directory
        .create_channel(&server_id, &viewer.profile_id, &body.name, &body.channel_type)
        .await
    {
        Ok(channel) => (StatusCode::CREATED, Json(channel)).into_response(),
        Err(e) => error_response(e),
    }
}

// ── Members ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct JoinResponse {
    pub server: ServerSummary,
    pub member: Member,
}

/// POST /api/invite/:code — join a server as a guest.
pub async fn join_server(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Path(invite_code): Path<String>,
) -> Response {
    match state
        .directory
        .join_by_invite(&invite_code, &viewer.profile_id)
        .await
    {
        Ok((server, member)) => Json(JoinResponse { server, member }).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: MemberRole,
}

/// PATCH /api/servers/:id/members/:profile_id — admins only.
pub async fn update_member_role(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Path((server_id, profile_id)): Path<(String, String)>,
    Json(body): Json<UpdateRoleRequest>,
) -> Response {
    match state
        .directory
        .set_member_role(&server_id, &viewer.profile_id, &profile_id, body.role)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
