use crate::{
    editor::{Settlement, StudentEditor, SubmitRequest, form::SeedOutcome},
    error::{EditorResult, LoadStudentSnafu},
    query_cache::QueryKey,
    state::EditorState,
};
use snafu::ResultExt;
use uuid::Uuid;

pub async fn load_record(state: &EditorState, view: Uuid) -> EditorResult<Option<SeedOutcome>> {
    let Some((id, ticket)) = state.editors().with(view, |editor| editor.begin_fetch())? else {
        return Ok(None);
    };

    let api = state.api();
    let fetch_id = id.clone();
    let snapshot = state
        .cache()
        .fetch(&QueryKey::student(id.clone()), move || async move {
            api.fetch_by_id(&fetch_id).await
        })
        .await
        .context(LoadStudentSnafu { id })?;

    let outcome = state
        .editors()
        .with(view, |editor| editor.apply_snapshot(ticket, &snapshot))?;
    debug!(%view, version = snapshot.version, ?outcome, "seeding editor");

    Ok(Some(outcome))
}

///`None` when a submission was already in flight
pub async fn submit(state: &EditorState, view: Uuid) -> EditorResult<Option<Settlement>> {
    let Some(request) = state.editors().with(view, StudentEditor::begin_submit)? else {
        debug!(%view, "submission already pending");
        return Ok(None);
    };

    let api = state.api();
    let outcome = match &request {
        SubmitRequest::Create(draft) => api.create(draft).await,
        SubmitRequest::Update(id, record) => api.update(id, record).await,
    };

    if let (SubmitRequest::Update(id, _), Ok(record)) = (&request, &outcome) {
        state
            .cache()
            .set_query_data(QueryKey::student(id.clone()), record.clone());
    }

    let settlement = state
        .editors()
        .with(view, |editor| editor.settle_submit(outcome))?;

    match &settlement {
        Some(Settlement::Created(record)) => {
            info!(id = %record.id, "created student");
            state.notify_success(view, "Student added!");
        }
        Some(Settlement::Updated(record)) => {
            info!(id = %record.id, "updated student");
            state.notify_success(view, "Student updated!");
        }
        Some(Settlement::Failed { status }) => {
            warn!(%view, ?status, "student submission failed");
        }
        None => {}
    }

    Ok(settlement)
}
