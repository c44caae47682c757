//! HTTP + WebSocket server.
//!
//! Each WebSocket connection owns one interaction [`Shell`]. Geometry messages
//! are applied synchronously; an analysis request runs in a spawned task and
//! reports back over a channel, so slider updates keep flowing while it is
//! pending.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use trilemma_core::{
    analysis::{Outcome, Request},
    AnalysisState, AnalysisStatus, GeometryParameters, Layout, Shell, TextGenerator, CENTROID,
};

use crate::{markdown, render::{render_svg, RenderConfig}};

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub generator: Arc<dyn TextGenerator>,
    pub render: RenderConfig,
}

/// Messages from client to server
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    SetRadius { value: f64 },
    SetSeparation { value: f64 },
    SetRotation { value: f64 },
    SetContext { text: String },
    /// Request an analysis of the current context
    Submit,
    /// Ping to keep connection alive
    Ping,
}

/// Messages from server to client
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Fresh layout after any geometry change
    Layout {
        layout: Layout,
        badge: String,
        ratio: f64,
        /// Separation beyond which the center empties, `r·√3`
        void_threshold: f64,
        gap_hint: u32,
        /// `d - r`; positive while the center is empty
        gap: f64,
        covers_centroid: bool,
    },
    /// Analysis lifecycle update
    Analysis {
        status: AnalysisStatus,
        /// Generated text or the failure message; empty while idle or loading
        result: String,
        /// Rendered markdown, only on success
        html: Option<String>,
        can_submit: bool,
    },
    /// Error occurred
    Error { message: String },
    /// Pong response
    Pong,
}

impl ServerMessage {
    fn layout(shell: &Shell) -> Self {
        let params = shell.params();
        let layout = shell.layout();
        ServerMessage::Layout {
            layout: layout.clone(),
            badge: layout.state.badge().to_string(),
            ratio: params.ratio(),
            void_threshold: params.void_threshold(),
            gap_hint: params.gap_hint(),
            gap: layout.gap(),
            covers_centroid: layout.covers_centroid(),
        }
    }

    fn analysis(shell: &Shell) -> Self {
        let analysis = shell.analysis();
        let html = match analysis.state() {
            AnalysisState::Success { text } => Some(markdown::to_html(text)),
            _ => None,
        };
        ServerMessage::Analysis {
            status: analysis.status(),
            result: analysis.result_text().to_string(),
            html,
            can_submit: analysis.can_submit(),
        }
    }
}

/// Apply one client message to the shell. Returns the replies to send and,
/// for an accepted submit, the request to dispatch.
pub fn apply(shell: &mut Shell, msg: ClientMessage) -> (Vec<ServerMessage>, Option<Request>) {
    match msg {
        ClientMessage::SetRadius { value } => {
            shell.set_radius(value);
            (vec![ServerMessage::layout(shell)], None)
        }
        ClientMessage::SetSeparation { value } => {
            shell.set_separation(value);
            (vec![ServerMessage::layout(shell)], None)
        }
        ClientMessage::SetRotation { value } => {
            shell.set_rotation(value);
            (vec![ServerMessage::layout(shell)], None)
        }
        ClientMessage::SetContext { text } => {
            shell.set_context(text);
            (vec![ServerMessage::analysis(shell)], None)
        }
        ClientMessage::Submit => {
            let request = shell.submit();
            (vec![ServerMessage::analysis(shell)], request)
        }
        ClientMessage::Ping => (vec![ServerMessage::Pong], None),
    }
}

pub fn router(config: ServerConfig) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/layout", get(layout_json))
        .route("/layout.svg", get(layout_svg))
        .with_state(Arc::new(config))
}

/// Run the server
pub async fn run_server(port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{} (WebSocket at /ws)", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct LayoutQuery {
    radius: Option<f64>,
    separation: Option<f64>,
    rotation: Option<f64>,
}

impl LayoutQuery {
    fn layout(&self) -> Result<Layout, Response> {
        let defaults = GeometryParameters::default();
        let params = GeometryParameters::new(
            self.radius.unwrap_or(defaults.radius),
            self.separation.unwrap_or(defaults.separation),
            self.rotation.unwrap_or(defaults.rotation),
        );
        Layout::new(params, CENTROID).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()).into_response())
    }
}

async fn layout_json(Query(query): Query<LayoutQuery>) -> Response {
    match query.layout() {
        Ok(layout) => Json(layout).into_response(),
        Err(response) => response,
    }
}

async fn layout_svg(State(config): State<Arc<ServerConfig>>, Query(query): Query<LayoutQuery>) -> Response {
    let layout = match query.layout() {
        Ok(layout) => layout,
        Err(response) => return response,
    };
    match render_svg(&layout, &config.render) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(config): State<Arc<ServerConfig>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, config))
}

async fn handle_socket(socket: WebSocket, config: Arc<ServerConfig>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel for sending messages back to the client
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    // Finished analysis requests
    let (done_tx, mut done_rx) = mpsc::channel::<Outcome>(1);

    // Task to forward messages to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize {:?}: {}", msg, e);
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let mut shell = Shell::new();
    let _ = tx.send(ServerMessage::layout(&shell)).await;
    let _ = tx.send(ServerMessage::analysis(&shell)).await;

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let msg = match incoming {
                    Some(Ok(m)) => m,
                    _ => break,
                };
                match msg {
                    Message::Text(text) => {
                        let client_msg: Result<ClientMessage, _> = serde_json::from_str(&text);
                        match client_msg {
                            Ok(client_msg) => {
                                debug!("client message: {:?}", client_msg);
                                let (replies, request) = apply(&mut shell, client_msg);
                                for reply in replies {
                                    let _ = tx.send(reply).await;
                                }
                                if let Some(request) = request {
                                    dispatch(request, config.generator.clone(), done_tx.clone());
                                }
                            }
                            Err(e) => {
                                let _ = tx.send(ServerMessage::Error {
                                    message: format!("Invalid message: {}", e),
                                }).await;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(outcome) = done_rx.recv() => {
                if shell.resolve(outcome) {
                    let _ = tx.send(ServerMessage::analysis(&shell)).await;
                }
            }
        }
    }

    // Clean up
    drop(tx);
    let _ = send_task.await;
}

/// Run `request` in the background; no cancellation, it completes or fails.
fn dispatch(request: Request, generator: Arc<dyn TextGenerator>, done: mpsc::Sender<Outcome>) {
    let ticket = request.ticket;
    info!("dispatching analysis {} to {}", ticket, generator.name());
    tokio::spawn(async move {
        let outcome = request.dispatch(generator.as_ref()).await;
        if done.send(outcome).await.is_err() {
            warn!("connection closed before analysis {} finished", ticket);
        }
    });
}
