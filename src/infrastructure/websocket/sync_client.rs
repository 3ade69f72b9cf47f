use futures::channel::mpsc;
use futures::{FutureExt, SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use gloo_timers::future::sleep;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;

use crate::domain::annotation::Annotation;
use crate::domain::errors::AppError;
use crate::domain::logging::{get_logger, LogComponent};

/// Inbound event kinds on the realtime channel.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// `annotations_data`: initial snapshot after a `get_annotations` request.
    Snapshot(Vec<Annotation>),
    /// `annotations_updated`: pushed after any server-side mutation.
    Updated(Vec<Annotation>),
    /// Server-reported error frame.
    ServerError(String),
    Connected,
    Disconnected { reason: String },
}

#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    annotations: Vec<Annotation>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutboundFrame<'a> {
    event: &'a str,
}

#[derive(Debug)]
enum Command {
    RequestAnnotations,
}

/// Cloneable handle for poking the running sync client.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SyncHandle {
    /// Ask the server for a fresh snapshot now.
    pub fn request_annotations(&self) {
        let _ = self.tx.unbounded_send(Command::RequestAnnotations);
    }

    /// Ask after a short delay, giving server-side persistence time to settle
    /// before the refetch that follows a local mutation.
    pub fn request_annotations_after(&self, delay_ms: u64) {
        let tx = self.tx.clone();
        spawn_local(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            let _ = tx.unbounded_send(Command::RequestAnnotations);
        });
    }
}

/// Realtime sync client for the annotation channel.
///
/// Mirrors the reconnect loop of the market data stream client: exponential
/// backoff capped at 32s, push events processed in server-send order.
pub struct AnnotationSyncClient {
    url: String,
    rx: mpsc::UnboundedReceiver<Command>,
    handle: SyncHandle,
}

impl AnnotationSyncClient {
    pub fn new(url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded();
        Self { url: url.into(), rx, handle: SyncHandle { tx } }
    }

    /// Channel URL derived from the page origin.
    pub fn from_window_location() -> Self {
        let url = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .map(|host| format!("ws://{host}/ws/annotations"))
            .unwrap_or_else(|| "ws://localhost/ws/annotations".to_string());
        Self::new(url)
    }

    pub fn handle(&self) -> SyncHandle {
        self.handle.clone()
    }

    fn connect(&self) -> Result<WebSocket, AppError> {
        get_logger().info(
            LogComponent::Infrastructure("AnnotationSync"),
            &format!("Connecting to annotation channel: {}", self.url),
        );
        WebSocket::open(&self.url)
            .map_err(|e| AppError::Network(format!("Failed to open WebSocket: {e:?}")))
    }

    /// Decode one inbound frame.
    pub fn parse_message(text: &str) -> Result<SyncEvent, AppError> {
        let frame: InboundFrame = serde_json::from_str(text)
            .map_err(|e| AppError::Network(format!("Failed to parse channel frame: {e}")))?;
        match frame.event.as_str() {
            "annotations_data" => Ok(SyncEvent::Snapshot(frame.annotations)),
            "annotations_updated" => Ok(SyncEvent::Updated(frame.annotations)),
            "error" => Ok(SyncEvent::ServerError(
                frame.message.unwrap_or_else(|| "unknown server error".to_string()),
            )),
            other => Err(AppError::Network(format!("Unknown channel event: {other}"))),
        }
    }

    fn request_frame() -> String {
        serde_json::to_string(&OutboundFrame { event: "get_annotations" })
            .unwrap_or_else(|_| r#"{"event":"get_annotations"}"#.to_string())
    }

    /// Run the channel until the page goes away, reconnecting on failure.
    pub async fn run<F>(mut self, mut handler: F)
    where
        F: FnMut(SyncEvent) + 'static,
    {
        let mut delay = 1u64;
        loop {
            let ws = match self.connect() {
                Ok(ws) => {
                    delay = 1;
                    ws
                }
                Err(e) => {
                    get_logger().error(
                        LogComponent::Infrastructure("AnnotationSync"),
                        &format!("Connection error: {e}"),
                    );
                    handler(SyncEvent::Disconnected { reason: e.to_string() });
                    sleep(Duration::from_secs(delay)).await;
                    delay = next_backoff_secs(delay);
                    continue;
                }
            };

            let (mut sink, mut stream) = ws.split();
            handler(SyncEvent::Connected);

            // Initial snapshot request on every (re)connect.
            if let Err(e) = sink.send(Message::Text(Self::request_frame())).await {
                get_logger().error(
                    LogComponent::Infrastructure("AnnotationSync"),
                    &format!("Failed to request annotations: {e:?}"),
                );
            }

            loop {
                futures::select! {
                    msg = stream.next().fuse() => match msg {
                        Some(Ok(Message::Text(text))) => match Self::parse_message(&text) {
                            Ok(event) => handler(event),
                            Err(e) => get_logger().error(
                                LogComponent::Infrastructure("AnnotationSync"),
                                &format!("Bad channel frame: {e}"),
                            ),
                        },
                        Some(Ok(Message::Bytes(_))) => {
                            // Binary frames are not part of the protocol.
                        }
                        Some(Err(e)) => {
                            get_logger().error(
                                LogComponent::Infrastructure("AnnotationSync"),
                                &format!("WebSocket error: {e:?}"),
                            );
                            break;
                        }
                        None => break,
                    },
                    cmd = self.rx.next() => match cmd {
                        Some(Command::RequestAnnotations) => {
                            if let Err(e) = sink.send(Message::Text(Self::request_frame())).await {
                                get_logger().error(
                                    LogComponent::Infrastructure("AnnotationSync"),
                                    &format!("Failed to request annotations: {e:?}"),
                                );
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }

            get_logger().warn(
                LogComponent::Infrastructure("AnnotationSync"),
                &format!("Channel lost, reconnecting in {delay}s"),
            );
            handler(SyncEvent::Disconnected { reason: "channel closed".to_string() });
            sleep(Duration::from_secs(delay)).await;
            delay = next_backoff_secs(delay);
        }
    }
}

/// Reconnect backoff schedule: doubles per failure, capped at 32s.
pub fn next_backoff_secs(current: u64) -> u64 {
    (current * 2).min(32)
}
