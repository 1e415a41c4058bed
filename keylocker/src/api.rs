use std::{io, time::Duration};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use bon::Builder;
use http::{Request, Response, StatusCode};
use keylocker_registry::{RegistryError, SharedRegistry};
use keylocker_types::{Identifier, KeyToken};
use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::{ServiceBuilderExt, request_id::MakeRequestUuid};
use tracing::{Level, Span, debug, span};

#[derive(Debug, Deserialize)]
pub struct SetKeysRequest {
    pub uuid: String,
    pub keys: Vec<KeyToken>,
}

#[derive(Debug, Serialize)]
pub struct SetKeysResponse {
    pub identifier: Identifier,
}

#[derive(Debug, Serialize)]
pub struct GetKeysResponse {
    pub identifier: Identifier,
    pub keys: Vec<KeyToken>,
}

#[derive(Debug, Clone, Builder)]
pub struct ApiServer {
    registry: SharedRegistry,
}

impl ApiServer {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/v1/keys", post(Self::set_keys))
            .route("/v1/keys/{uuid}", get(Self::get_keys))
            .route("/i/health", get(Self::health))
            .with_state(self.clone())
            .layer(
                ServiceBuilder::new()
                    .set_x_request_id(MakeRequestUuid)
                    .layer(TraceLayer::new_for_http()
                        .make_span_with(|r: &Request<Body>| {
                            span!(
                                Level::DEBUG,
                                "request",
                                method = %r.method(),
                                uri = %r.uri(),
                                id = %r.headers()
                                    .get("x-request-id")
                                    .and_then(|id| id.to_str().ok())
                                    .unwrap_or("N/A")
                            )
                        })
                        .on_request(|_r: &Request<Body>, _s: &Span| {
                            debug!("request received")
                        })
                        .on_response(|r: &Response<Body>, d: Duration, _span: &Span| {
                            debug!(status = %r.status().as_u16(), duration = ?d, "response created")
                        })
                )
            )
    }

    pub async fn serve<A: ToSocketAddrs>(self, addr: A) -> io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }

    async fn health(this: State<Self>) -> StatusCode {
        if this.registry.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }

    async fn set_keys(this: State<Self>, req: Json<SetKeysRequest>) -> impl IntoResponse {
        let identifier = Identifier::derive(&req.uuid);
        match this.registry.set_keys(identifier, req.0.keys) {
            Ok(()) => (StatusCode::OK, Json(SetKeysResponse { identifier })).into_response(),
            Err(err) => failure(err),
        }
    }

    async fn get_keys(this: State<Self>, Path(uuid): Path<String>) -> impl IntoResponse {
        let identifier = Identifier::derive(&uuid);
        match this.registry.get_keys(&identifier) {
            Ok(keys) => (StatusCode::OK, Json(GetKeysResponse { identifier, keys })).into_response(),
            Err(err) => failure(err),
        }
    }
}

fn failure(err: RegistryError) -> axum::response::Response {
    // set/get only ever fail with EmptyKeys or NotInitialized
    let status = match err {
        RegistryError::EmptyKeys => StatusCode::BAD_REQUEST,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, err.to_string()).into_response()
}
