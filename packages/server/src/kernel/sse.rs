//! Server-sent event emitter.
//!
//! A request handler creates a [`channel`], hands the [`SseEmitter`] to the
//! task producing events, and turns the receiver into the response body with
//! [`into_stream`]. Each `emit` becomes exactly one SSE frame, delivered to
//! the body in call order with no batching.
//!
//! The channel is unbounded: producers never wait on a slow client. When the
//! client goes away the receiver is dropped, emits become no-ops, and
//! [`SseEmitter::closed`] resolves so producers can stop early.

use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::Event;
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// One framed event: the SSE `event:` name and its JSON `data:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

impl SseFrame {
    /// Parse the data line back into JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.data)
    }

    fn into_event(self) -> Event {
        Event::default().event(self.event).data(self.data)
    }
}

/// Write half of an SSE response.
pub struct SseEmitter {
    tx: mpsc::UnboundedSender<SseFrame>,
    frames_sent: usize,
    disconnect_logged: bool,
}

/// Create an emitter and the receiver feeding the response body.
pub fn channel() -> (SseEmitter, mpsc::UnboundedReceiver<SseFrame>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SseEmitter {
            tx,
            frames_sent: 0,
            disconnect_logged: false,
        },
        rx,
    )
}

/// Adapt the receiver into a stream axum's `Sse` can serve.
pub fn into_stream(
    rx: mpsc::UnboundedReceiver<SseFrame>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    UnboundedReceiverStream::new(rx).map(|frame| Ok(frame.into_event()))
}

impl SseEmitter {
    /// Write one event. Transport failures are absorbed, never returned.
    pub fn emit<T: Serialize + ?Sized>(&mut self, kind: &str, payload: &T) {
        let data = match serde_json::to_string(payload) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(event = kind, error = %e, "Failed to serialize SSE payload");
                return;
            }
        };

        let frame = SseFrame {
            event: kind.to_string(),
            data,
        };
        if self.tx.send(frame).is_err() {
            if !self.disconnect_logged {
                tracing::debug!(event = kind, "Client disconnected, dropping SSE events");
                self.disconnect_logged = true;
            }
            return;
        }
        self.frames_sent += 1;
    }

    /// Write a final event and close the stream.
    pub fn finish<T: Serialize + ?Sized>(mut self, kind: &str, payload: &T) {
        self.emit(kind, payload);
    }

    /// Number of frames handed to the connection so far.
    pub fn frames_sent(&self) -> usize {
        self.frames_sent
    }

    /// Whether the client has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the client has gone away.
    ///
    /// The returned future does not borrow the emitter, so it can be polled
    /// alongside code that keeps emitting.
    pub fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        let tx = self.tx.clone();
        async move { tx.closed().await }
    }
}
