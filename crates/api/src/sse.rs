//! Adapter from the typed progress channel to an SSE response.
//!
//! Wire framing (`data: <JSON>\n\n`) happens here and only here; the
//! pipeline publishes typed [`GenerationEvent`]s and never sees the
//! transport.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use dreambox_events::GenerationEvent;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Turn a progress-event receiver into an SSE response.
///
/// The stream ends when the last [`ProgressEmitter`] clone is dropped;
/// keep-alive comments stop a quiet stream from being torn down by
/// intermediaries.
///
/// [`ProgressEmitter`]: dreambox_events::ProgressEmitter
pub fn sse_response(
    receiver: UnboundedReceiver<GenerationEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = UnboundedReceiverStream::new(receiver).map(|event| {
        let json = serde_json::to_string(&event).unwrap_or_default();
        Ok(Event::default().data(json))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
