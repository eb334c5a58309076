use crate::{notify::toasts_for, state::EditorState};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use tokio_stream::StreamExt;
use uuid::Uuid;

pub async fn sse_feed(
    State(state): State<EditorState>,
    Path(view): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let toasts = toasts_for(state.subscribe_to_sse_feed(), view)
        .map(|toast| Ok::<_, Infallible>(toast.to_event()));

    Sse::new(toasts).keep_alive(KeepAlive::default())
}
