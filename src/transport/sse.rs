//! Server-push endpoints.
//!
//! Each request spawns its own push loop; the loop writes into a channel
//! whose receiver is the response body.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::sse::{Event, Sse};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use crate::push::{PushLoop, SseOptions, SseStream, TickerStream};
use crate::transport::state::AppState;

/// `GET /home/live`: timestamp events until the client goes away.
pub async fn live(
    State(state): State<AppState>,
) -> Sse<UnboundedReceiverStream<Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = SseStream::new(tx, SseOptions::from(&state.settings.push));
    let pusher = PushLoop::live(&state.settings.push);

    tokio::spawn(async move {
        let outcome = pusher.run(stream).await;
        debug!("SSE push loop ended: {outcome:?}");
    });

    Sse::new(UnboundedReceiverStream::new(rx))
}

/// `GET /home/ticker`: a fixed number of greeting lines, then end of body.
pub async fn ticker(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = mpsc::unbounded_channel();
    let pusher = PushLoop::ticker(&state.settings.push);

    tokio::spawn(async move {
        let outcome = pusher.run(TickerStream::new(tx)).await;
        debug!("Ticker push loop ended: {outcome:?}");
    });

    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        Body::from_stream(UnboundedReceiverStream::new(rx)),
    )
}
