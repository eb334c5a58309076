use crate::{
    editor::mode::EditorMode,
    error::{EditorResult, NotAnEditorRouteSnafu},
    maud_conveniences::title,
    state::EditorState,
};
use axum::{extract::State, http::Uri};
use maud::{Markup, html};
use snafu::OptionExt;

/// `/students/add` and `/students/{id}`. The form itself is pulled in by htmx so loading the
/// student doesn't hold up the page.
pub async fn get_student_editor(
    State(state): State<EditorState>,
    uri: Uri,
) -> EditorResult<Markup> {
    let mode = EditorMode::resolve(uri.path()).context(NotAnEditorRouteSnafu {
        path: uri.path().to_string(),
    })?;
    let heading = mode.heading();
    let view = state.editors().open(mode);
    info!(%view, ?heading, "opened student editor");

    Ok(state.render(html! {
        div hx-ext="sse" sse-connect={"/sse_feed/" (view)} class="bg-gray-800 p-8 rounded shadow-md max-w-2xl w-full" {
            div id="toasts" sse-swap="toast" hx-swap="afterbegin" class="fixed top-4 right-4 w-72 z-50" {}
            (title(heading))
            div id="editor" hx-get={"/internal/editor/" (view) "/form"} hx-trigger="load" {
                p class="text-gray-400" {"Loading..."}
            }
        }
    }))
}
