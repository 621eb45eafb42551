//! WhatsApp webhook server
//!
//! Handles the Cloud API's subscription handshake (GET), signed event
//! deliveries (POST), and a health endpoint for deploy probes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::net::TcpListener;

use super::{WebhookPayload, WhatsAppAdapter};
use crate::application::services::MessageService;

type HmacSha256 = Hmac<Sha256>;

/// Shared state for the webhook handlers.
pub struct WebhookState {
    pub service: MessageService<WhatsAppAdapter>,
    /// Token echoed during the subscription handshake
    pub verify_token: Option<String>,
    /// App secret for X-Hub-Signature-256; unset disables verification
    pub app_secret: Option<String>,
    pub drive_available: bool,
    pub bot_name: String,
}

/// Start the webhook server. Blocks until the listener fails.
pub async fn serve(port: u16, webhook_path: &str, state: Arc<WebhookState>) {
    let app = Router::new()
        .route(webhook_path, get(verify_subscription).post(handle_events))
        .route("/health", get(health))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "Failed to bind webhook server");
            return;
        }
    };
    tracing::info!(port, path = webhook_path, "Webhook server listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Webhook server exited with error");
    }
}

/// GET side of the subscription handshake: echo `hub.challenge` back when
/// the mode and verify token match.
async fn verify_subscription(
    State(state): State<Arc<WebhookState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mode = params.get("hub.mode").map(String::as_str);
    let token = params.get("hub.verify_token");
    let challenge = params.get("hub.challenge").cloned().unwrap_or_default();

    if mode == Some("subscribe") && token.is_some() && token == state.verify_token.as_ref() {
        return (StatusCode::OK, challenge).into_response();
    }
    tracing::warn!("Webhook verification failed");
    (StatusCode::FORBIDDEN, "Verification failed".to_string()).into_response()
}

async fn handle_events(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(secret) = &state.app_secret {
        let signature = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok());
        if !signature_valid(secret, signature, &body) {
            tracing::warn!("Rejected webhook request: invalid signature");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            // Providers send delivery/status events this bot does not model.
            tracing::debug!("Ignoring unparseable webhook payload: {}", e);
            return (StatusCode::OK, "OK").into_response();
        }
    };

    if payload.object != "whatsapp_business_account" {
        tracing::debug!(object = %payload.object, "Ignoring webhook for unknown object");
        return (StatusCode::OK, "OK").into_response();
    }

    for message in payload.inbound_messages() {
        state.service.handle_inbound(message).await;
    }

    (StatusCode::OK, "OK").into_response()
}

/// Check an `X-Hub-Signature-256` header against the request body.
pub fn signature_valid(secret: &str, header: Option<&str>, body: &[u8]) -> bool {
    let Some(header) = header else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = format!("sha256={}", hex::encode(mac.finalize().into_bytes()));
    expected == header
}

async fn health(State(state): State<Arc<WebhookState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.bot_name,
        "drive_status": if state.drive_available { "connected" } else { "disconnected" },
    }))
}
