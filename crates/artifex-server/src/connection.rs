//! Per-connection request loop
//!
//! One reader loop per connection, one writer task owning the write half
//! (so out-of-order completions never interleave bytes), and one spawned
//! task per request. Handler bodies run on the blocking pool behind the
//! configured response timeout.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time::timeout;

use artifex_core::errors::ArtifexError;
use artifex_core_types::{ConnectionId, CorrelationId, RequestContext};

use crate::dispatch::dispatch;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::server::ServerInner;

/// Serve one accepted connection until the peer hangs up
pub async fn handle_connection(stream: TcpStream, inner: Arc<ServerInner>) {
    let connection_id = ConnectionId::new();
    tracing::info!(
        connection_id = %connection_id,
        peer = ?stream.peer_addr().ok(),
        "connection_accepted"
    );

    let (read_half, mut write_half) = stream.into_split();
    let (tx, mut rx) = mpsc::channel::<ResponseEnvelope>(64);

    let writer_connection = connection_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(response) = rx.recv().await {
            match serde_json::to_string(&response) {
                Ok(mut line) => {
                    line.push('\n');
                    if write_half.write_all(line.as_bytes()).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        connection_id = %writer_connection,
                        error = %e,
                        "response_serialize_failed"
                    );
                }
            }
        }
    });

    let mut lines = BufReader::new(read_half).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<RequestEnvelope>(line) {
                    Ok(envelope) => {
                        tokio::spawn(process_request(
                            Arc::clone(&inner),
                            envelope,
                            connection_id.clone(),
                            tx.clone(),
                        ));
                    }
                    Err(e) => {
                        // Not a valid envelope; no id to echo
                        let response = ResponseEnvelope::failure(
                            "",
                            format!("malformed request: {}", e),
                            0,
                        );
                        if tx.send(response).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "read_failed");
                break;
            }
        }
    }

    // Reader done; writer drains in-flight responses and exits
    drop(tx);
    let _ = writer.await;
    tracing::info!(connection_id = %connection_id, "connection_closed");
}

/// Run one request as an independent unit of work
async fn process_request(
    inner: Arc<ServerInner>,
    envelope: RequestEnvelope,
    connection_id: ConnectionId,
    tx: mpsc::Sender<ResponseEnvelope>,
) {
    let id = envelope.id.clone();
    let action = envelope.action.clone();
    let context = RequestContext::with_correlation_id(CorrelationId::from_string(id.clone()))
        .with_connection_id(connection_id);

    let deadline = inner.config.response_timeout();
    let worker = Arc::clone(&inner);
    let work = task::spawn_blocking(move || {
        dispatch(&worker.registry, &worker.app, envelope, context)
    });

    let response = match timeout(deadline, work).await {
        Ok(Ok(response)) => response,
        Ok(Err(join_err)) => {
            // A panicking handler must not take the router down
            tracing::error!(action = %action, error = %join_err, "handler_panicked");
            let err = ArtifexError::Internal {
                message: format!("handler for {} failed", action),
            };
            ResponseEnvelope::failure(id, err.to_string(), deadline.as_millis() as u64)
        }
        Err(_) => {
            // Abandon the correlation entry; the worker may still finish
            // in the background. Documented limitation, not cancellation.
            let elapsed_ms = deadline.as_millis() as u64;
            let err = ArtifexError::Timeout { action, elapsed_ms };
            ResponseEnvelope::failure(id, err.to_string(), elapsed_ms)
        }
    };

    // Peer may already be gone; dropping the response is fine then
    let _ = tx.send(response).await;
}
