//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::domain::{AccountId, Resolution, resolve};
use crate::infrastructure::dto::http::{
    AuthStatusResponse, CommandRequest, CommandResponse, ErrorResponse, SendRequest,
    SuccessResponse, WebhookPayload,
};
use crate::usecase::{GateError, SendError};
use crate::ui::state::AppState;

fn error_response(status: StatusCode, reason: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(reason))).into_response()
}

/// Extract the session account id from the configured cookie, if present.
fn session_from_cookies(state: &AppState, jar: &CookieJar) -> Option<AccountId> {
    jar.get(&state.session_cookie)
        .map(|cookie| AccountId::new(cookie.value()))
}

/// `POST /chat/webhook` — game-originated event ingest.
///
/// When a shared secret is configured, the push must carry it in a `key`
/// or `authorization` header; with no secret configured every event is
/// accepted (insecure default for trusted networks, stated in the config
/// docs rather than hidden).
pub async fn chat_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Response {
    if let Some(secret) = &state.webhook_secret {
        let presented = headers
            .get("key")
            .or_else(|| headers.get("authorization"))
            .and_then(|value| value.to_str().ok());
        if presented != Some(secret.as_str()) {
            tracing::warn!("Webhook push rejected: missing or wrong shared secret");
            return error_response(StatusCode::UNAUTHORIZED, "Invalid webhook secret");
        }
    }

    match state.ingest_event_usecase.execute(payload).await {
        Ok(_) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// `POST /chat/send` — browser-originated chat message.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<SendRequest>,
) -> Response {
    let session = session_from_cookies(&state, &jar);

    match state
        .send_chat_usecase
        .execute(session, &request.message)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => {
            let status = match &e {
                SendError::EmptyMessage => StatusCode::BAD_REQUEST,
                SendError::Unauthenticated => StatusCode::UNAUTHORIZED,
                SendError::AccountNotLinked => StatusCode::FORBIDDEN,
                SendError::IdentityUnavailable(_) | SendError::DeliveryFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            error_response(status, e.to_string())
        }
    }
}

/// `POST /admin/command` — administrator console command.
pub async fn admin_command(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<CommandRequest>,
) -> Response {
    let session = session_from_cookies(&state, &jar);

    match state
        .admin_command_usecase
        .execute(session, &request.command)
        .await
    {
        Ok(response) => (
            StatusCode::OK,
            Json(CommandResponse {
                success: true,
                response,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                GateError::Unauthenticated => StatusCode::UNAUTHORIZED,
                GateError::Forbidden => StatusCode::FORBIDDEN,
                GateError::EmptyCommand => StatusCode::BAD_REQUEST,
                GateError::IdentityUnavailable(_) | GateError::Channel(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            error_response(status, e.to_string())
        }
    }
}

/// `GET /chat/auth-status` — whether the current session is authenticated
/// and linked to a game account. Always 200; the flags carry the answer.
pub async fn auth_status(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let session = session_from_cookies(&state, &jar);
    let account_id = session.as_ref().map(|id| id.as_str().to_string());

    match resolve(state.identity_store.as_ref(), session.as_ref()).await {
        Ok(Resolution::NotAuthenticated) => {
            (StatusCode::OK, Json(AuthStatusResponse::anonymous())).into_response()
        }
        Ok(Resolution::NotLinked) => (
            StatusCode::OK,
            Json(AuthStatusResponse {
                authenticated: true,
                linked: false,
                account_id,
                game_uuid: None,
                player_name: None,
            }),
        )
            .into_response(),
        Ok(Resolution::Identity(identity)) => (
            StatusCode::OK,
            Json(AuthStatusResponse {
                authenticated: true,
                linked: true,
                account_id,
                game_uuid: Some(identity.game_uuid),
                player_name: Some(identity.display_name),
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
