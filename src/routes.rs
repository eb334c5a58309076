use crate::{
    editor::mode::ADD_STUDENT_PATH,
    routes::{
        editor::{internal_get_editor_form, internal_post_editor_field, internal_post_editor_submit},
        index::get_index_route,
        sse::sse_feed,
        students::get_student_editor,
    },
    state::EditorState,
};
use axum::{
    Router,
    routing::{get, post},
};

pub mod editor;
pub mod index;
pub mod sse;
pub mod students;

pub fn app(state: EditorState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(ADD_STUDENT_PATH, get(get_student_editor))
        .route("/students/{id}", get(get_student_editor))
        .route("/internal/editor/{view}/form", get(internal_get_editor_form))
        .route(
            "/internal/editor/{view}/field/{field}",
            post(internal_post_editor_field),
        )
        .route(
            "/internal/editor/{view}/submit",
            post(internal_post_editor_submit),
        )
        .route("/sse_feed/{view}", get(sse_feed))
        .with_state(state)
}
