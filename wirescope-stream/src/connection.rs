use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, warn};
use url::Url;

use wirescope_core::decode_frame;

use crate::error::TransportError;
use crate::gate::GatedStream;

/// Owns the one WebSocket of a session. No reconnect on close or error:
/// transport failure ends the stream until the owner rebuilds the pipeline.
#[derive(Debug)]
pub struct Connection {
    reader: Option<JoinHandle<()>>,
}

impl Connection {
    /// Opens the socket and spawns the read loop feeding `gate`.
    pub async fn open(endpoint: Url, gate: GatedStream) -> Result<Connection, TransportError> {
        let (socket, response) = connect_async(endpoint.as_str())
            .await
            .map_err(|err| TransportError::Connect(err.to_string()))?;
        debug!(endpoint = %endpoint, status = %response.status(), "snapshot stream opened");
        let reader = tokio::spawn(read_loop(socket, gate));
        Ok(Connection {
            reader: Some(reader),
        })
    }

    /// Closes the socket and stops the read loop. Idempotent; a frame still
    /// in flight at dispose time is discarded.
    pub fn dispose(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
            debug!("snapshot stream disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.reader.is_none()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn read_loop(mut socket: WebSocketStream<MaybeTlsStream<TcpStream>>, gate: GatedStream) {
    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(frame)) => match decode_frame(frame.as_str()) {
                Ok(snapshot) => gate.publish_snapshot(snapshot),
                Err(err) => {
                    debug!(reason = %err.reason, "undecodable frame");
                    gate.publish_decode_failure(err);
                }
            },
            Ok(Message::Close(frame)) => {
                debug!(?frame, "snapshot stream closed by remote");
                gate.publish_closed(TransportError::Closed);
                return;
            }
            // Pings are answered by tungstenite; the backend sends snapshots
            // as text frames only.
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "snapshot stream transport error");
                gate.publish_closed(TransportError::Protocol(err.to_string()));
                return;
            }
        }
    }
    gate.publish_closed(TransportError::Closed);
}
