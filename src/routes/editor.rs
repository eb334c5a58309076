use crate::{
    data::{Gender, StudentDraft, StudentField},
    editor::{
        StudentEditor,
        controller::{load_record, submit},
        errors::ValidationErrorSet,
    },
    error::{EditorResult, InvalidGenderSnafu},
    maud_conveniences::{avatar_preview, field_error, form_element, form_submit_button},
    state::EditorState,
};
use axum::{
    Form,
    extract::{Path, State},
};
use maud::{Markup, html};
use snafu::ResultExt;
use std::collections::HashMap;
use uuid::Uuid;

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

fn error_slot_id(field: StudentField) -> String {
    format!("error-{}", field.name())
}

fn render_input(view: Uuid, field: StudentField, draft: &StudentDraft) -> Markup {
    let name = field.name();
    let change_url = format!("/internal/editor/{view}/field/{name}");

    match field {
        StudentField::Gender => html! {
            div id=(name) class="flex flex-row space-x-6" {
                @for gender in Gender::ALL {
                    label class="flex items-center text-sm text-gray-300 cursor-pointer" {
                        input type="radio" name=(name) value=(gender.as_str()) checked[draft.gender == gender]
                            hx-post=(change_url) hx-trigger="change" hx-swap="none" class="mr-2";
                        (gender.label())
                    }
                }
            }
        },
        _ => html! {
            input type="text" id=(name) name=(name) required value=(draft.value(field))
                hx-post=(change_url) hx-trigger="input changed delay:250ms" hx-swap="none" class=(INPUT_CLASSES);
        },
    }
}

pub fn render_editor_form(view: Uuid, editor: &StudentEditor) -> Markup {
    let draft = &editor.form().fields;
    let errors = editor.field_errors().unwrap_or_default();

    html! {
        form id="student-form" hx-post={"/internal/editor/" (view) "/submit"} hx-swap="outerHTML" hx-disabled-elt="find button" class="p-4" {
            @for field in StudentField::ALL {
                (form_element(field.name(), field.label(), html! {
                    (render_input(view, field, draft))
                    (field_error(&error_slot_id(field), errors.get(field), false))
                }))
                @if field == StudentField::Avatar {
                    (avatar_preview(&draft.avatar, false))
                }
            }

            (form_submit_button(editor.mode().submit_label(), editor.is_submitting()))
        }
    }
}

fn render_field_feedback(
    errors: &ValidationErrorSet,
    changed: StudentField,
    draft: &StudentDraft,
) -> Markup {
    html! {
        @for field in StudentField::ALL {
            (field_error(&error_slot_id(field), errors.get(field), true))
        }
        @if changed == StudentField::Avatar {
            (avatar_preview(&draft.avatar, true))
        }
    }
}

pub async fn internal_get_editor_form(
    State(state): State<EditorState>,
    Path(view): Path<Uuid>,
) -> EditorResult<Markup> {
    load_record(&state, view).await?;
    state
        .editors()
        .with(view, |editor| render_editor_form(view, editor))
}

pub async fn internal_post_editor_field(
    State(state): State<EditorState>,
    Path((view, field)): Path<(Uuid, StudentField)>,
    Form(values): Form<HashMap<String, String>>,
) -> EditorResult<Markup> {
    let value = values.get(field.name()).cloned().unwrap_or_default();

    state.editors().with(view, |editor| -> EditorResult<Markup> {
        editor.change_field(field, value).context(InvalidGenderSnafu)?;
        let errors = editor.field_errors().unwrap_or_default();
        Ok(render_field_feedback(&errors, field, &editor.form().fields))
    })?
}

pub async fn internal_post_editor_submit(
    State(state): State<EditorState>,
    Path(view): Path<Uuid>,
    Form(values): Form<HashMap<String, String>>,
) -> EditorResult<Markup> {
    let synced = state
        .editors()
        .with(view, |editor| editor.sync_fields(&values))?
        .context(InvalidGenderSnafu)?;
    if synced > 0 {
        debug!(%view, synced, "picked up edits from submitted form");
    }

    submit(&state, view).await?;

    state
        .editors()
        .with(view, |editor| render_editor_form(view, editor))
}
