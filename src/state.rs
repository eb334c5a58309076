use crate::{
    api::{HttpStudentApi, StudentApi},
    config::RuntimeConfiguration,
    data::StudentRecord,
    editor::registry::EditorRegistry,
    error::{BuildHttpClientSnafu, EditorResult},
    maud_conveniences::render_nav,
    notify::Toast,
    query_cache::QueryCache,
};
use maud::{DOCTYPE, Markup, html};
use snafu::ResultExt;
use std::{borrow::Cow, sync::Arc, time::Duration};
use tokio::sync::broadcast::{Receiver, Sender, channel};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct EditorState {
    api: Arc<dyn StudentApi>,
    cache: Arc<QueryCache<StudentRecord>>,
    editors: Arc<EditorRegistry>,
    sse_events_sender: Sender<Toast>,
}

impl EditorState {
    pub fn new(config: &RuntimeConfiguration) -> EditorResult<Self> {
        let api_config = config.api_config();
        let api = HttpStudentApi::new(api_config.base_url()).context(BuildHttpClientSnafu)?;

        Ok(Self::with_api(Arc::new(api), api_config.stale_time()))
    }

    pub fn with_api(api: Arc<dyn StudentApi>, stale_time: Duration) -> Self {
        let (tx, _rx) = channel(16);

        Self {
            api,
            cache: Arc::new(QueryCache::new(stale_time)),
            editors: Arc::new(EditorRegistry::default()),
            sse_events_sender: tx,
        }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Students" }
                }
                body class="bg-gray-900 h-screen flex flex-col items-center justify-center text-white" {
                    (render_nav())
                    (markup)
                }
            }
        }
    }

    pub fn api(&self) -> Arc<dyn StudentApi> {
        self.api.clone()
    }

    pub fn cache(&self) -> &QueryCache<StudentRecord> {
        &self.cache
    }

    pub fn editors(&self) -> &EditorRegistry {
        &self.editors
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<Toast> {
        self.sse_events_sender.subscribe()
    }

    ///fire and forget - nobody listening is fine
    pub fn notify_success(&self, view: Uuid, message: impl Into<Cow<'static, str>>) {
        let _ = self.sse_events_sender.send(Toast::success(view, message));
    }
}
