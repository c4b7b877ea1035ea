//! Router serving the webhook endpoint.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::{ErrorResponse, TRACING_TARGET, WebhookConfig, WebhookEvent, WorkflowSink};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct WebhookState {
    sink: Arc<dyn WorkflowSink>,
}

/// Builds the router for the webhook endpoint.
///
/// The single `POST` route answers subscription challenges and forwards
/// every other JSON body to `sink`.
pub fn routes(config: &WebhookConfig, sink: Arc<dyn WorkflowSink>) -> Router {
    Router::new()
        .route(&config.path, post(receive))
        .with_state(WebhookState { sink })
        .with_observability()
}

async fn receive(State(state): State<WebhookState>, body: Bytes) -> Response {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(target: TRACING_TARGET, error = %err, "Rejected malformed body");
            return ErrorResponse::malformed_body("request body is not valid JSON").into_response();
        }
    };

    if let Some(challenge) = body.get("challenge") {
        tracing::info!(target: TRACING_TARGET, "Answering subscription challenge");
        return Json(json!({ "challenge": challenge })).into_response();
    }

    let event = WebhookEvent::new(body);
    let request_id = event.request_id;
    let event_type = event.monday_event().map(|event| event.event_type);

    match state.sink.emit(event).await {
        Ok(()) => {
            tracing::debug!(
                target: TRACING_TARGET,
                %request_id,
                event_type = event_type.as_deref().unwrap_or("unknown"),
                "Forwarded event"
            );
            StatusCode::OK.into_response()
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                %request_id,
                error = %error,
                "Failed to forward event"
            );
            ErrorResponse::from(error).into_response()
        }
    }
}

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers [`SetRequestId`], [`Trace`] and [`PropagateRequestId`] middlewares
    /// and marks credential headers as sensitive.
    ///
    /// [`SetRequestId`]: tower_http::request_id::SetRequestIdLayer
    /// [`Trace`]: tower_http::trace::TraceLayer
    /// [`PropagateRequestId`]: tower_http::request_id::PropagateRequestIdLayer
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        // Apply layers in reverse order (last layer wraps first)
        self.layer(PropagateRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
    }
}
