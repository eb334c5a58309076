use axum::response::sse::Event;
use maud::{Markup, Render, html};
use std::borrow::Cow;
use tokio::sync::broadcast::Receiver;
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};
use uuid::Uuid;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub view: Uuid,
    pub level: ToastLevel,
    pub message: Cow<'static, str>,
}

impl Toast {
    pub fn success(view: Uuid, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            view,
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    ///htmx swaps the data in through `sse-swap="toast"`
    pub fn to_event(&self) -> Event {
        Event::default()
            .event("toast")
            .data(self.render().into_string())
    }
}

impl Render for Toast {
    fn render(&self) -> Markup {
        let colours = match self.level {
            ToastLevel::Success => "bg-green-100 border-green-400 text-green-800",
        };

        html! {
            div class={"border px-4 py-3 rounded shadow-md mb-2 " (colours)} role="status" {
                (&*self.message)
            }
        }
    }
}

pub fn toasts_for(receiver: Receiver<Toast>, view: Uuid) -> impl Stream<Item = Toast> {
    BroadcastStream::new(receiver).filter_map(move |toast| match toast {
        Ok(toast) if toast.view == view => Some(toast),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            warn!(%view, missed, "sse feed lagged, dropping toasts");
            None
        }
    })
}
