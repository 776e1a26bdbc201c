//! Background WebSocket client task.

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

use super::ConnectionError;

/// Events reported by the connection task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Handshake completed
    Opened,
    /// Raw inbound text frame
    Payload(String),
    /// Remote closed the socket or the stream ended
    Closed,
    /// Handshake or transport error
    Failed(String),
}

/// Handle for sending commands to the service.
///
/// Commands go through an unbounded queue, so sending never waits on the
/// socket. Text queued before the handshake completes is flushed once the
/// socket opens.
#[derive(Debug, Clone)]
pub struct Connection {
    tx: mpsc::UnboundedSender<String>,
}

impl Connection {
    /// Create a handle whose outbound queue is drained by the caller
    /// instead of a socket.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a command for sending, as-is.
    pub fn send(&self, command: impl Into<String>) -> Result<(), ConnectionError> {
        self.tx
            .send(command.into())
            .map_err(|_| ConnectionError::Closed)
    }

    /// Whether the connection task has stopped accepting commands.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Open a connection to `endpoint` on a background task.
///
/// Lifecycle changes and inbound frames are reported on `events`. Must be
/// called from within a Tokio runtime.
pub fn spawn(
    endpoint: impl Into<String>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
) -> Connection {
    let (connection, outbound) = Connection::channel();
    tokio::spawn(run(endpoint.into(), outbound, events));
    connection
}

async fn run(
    endpoint: String,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ConnectionEvent>,
) {
    tracing::debug!(%endpoint, "Connecting");

    let stream = match connect_async(endpoint.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(%endpoint, "Failed to connect: {}", e);
            let _ = events.send(ConnectionEvent::Failed(e.to_string()));
            return;
        }
    };

    tracing::info!(%endpoint, "Connected");
    let _ = events.send(ConnectionEvent::Opened);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            command = outbound.recv() => {
                let Some(text) = command else {
                    // Every handle was dropped
                    tracing::debug!("Outbound queue closed, shutting down connection");
                    let _ = sink.close().await;
                    break;
                };
                tracing::debug!(len = text.len(), "Sending command");
                if let Err(e) = sink.send(WsMessage::Text(text.into())).await {
                    tracing::warn!("Send failed: {}", e);
                    let _ = events.send(ConnectionEvent::Failed(e.to_string()));
                    break;
                }
            }
            frame = source.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    tracing::debug!(len = text.len(), "Received payload");
                    if events.send(ConnectionEvent::Payload(text.as_str().to_owned())).is_err() {
                        break;
                    }
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    tracing::info!(?frame, "Server closed connection");
                    let _ = events.send(ConnectionEvent::Closed);
                    break;
                }
                // Pings are answered by tungstenite itself
                Some(Ok(other)) => {
                    tracing::trace!("Ignoring non-text frame: {:?}", other);
                }
                Some(Err(e)) => {
                    tracing::warn!("Connection error: {}", e);
                    let _ = events.send(ConnectionEvent::Failed(e.to_string()));
                    break;
                }
                None => {
                    tracing::info!("Connection stream ended");
                    let _ = events.send(ConnectionEvent::Closed);
                    break;
                }
            }
        }
    }
}
