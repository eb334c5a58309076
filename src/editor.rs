use crate::{
    api::ApiError,
    data::{StudentDraft, StudentField, StudentId, StudentRecord, student::UnknownGenderError},
    query_cache::Snapshot,
};
use errors::{ValidationErrorSet, derive_field_errors};
use form::{FetchTicket, FormState, SeedOutcome, SeedToken};
use mode::EditorMode;
use mutation::Mutation;
use reqwest::StatusCode;
use std::collections::HashMap;

pub mod controller;
pub mod errors;
pub mod form;
pub mod mode;
pub mod mutation;
pub mod registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(StudentDraft),
    Update(StudentId, StudentRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Created(StudentRecord),
    Updated(StudentRecord),
    Failed { status: Option<StatusCode> },
}

#[derive(Debug)]
pub struct StudentEditor {
    mode: EditorMode,
    form: FormState,
    seed: SeedToken,
    create: Mutation<StudentRecord>,
    update: Mutation<StudentRecord>,
}

impl StudentEditor {
    pub fn new(mode: EditorMode) -> Self {
        Self {
            mode,
            form: FormState::blank(),
            seed: SeedToken::default(),
            create: Mutation::default(),
            update: Mutation::default(),
        }
    }

    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub const fn form(&self) -> &FormState {
        &self.form
    }

    const fn active(&self) -> &Mutation<StudentRecord> {
        match self.mode {
            EditorMode::Create => &self.create,
            EditorMode::Update(_) => &self.update,
        }
    }

    const fn active_mut(&mut self) -> &mut Mutation<StudentRecord> {
        match self.mode {
            EditorMode::Create => &mut self.create,
            EditorMode::Update(_) => &mut self.update,
        }
    }

    pub const fn is_submitting(&self) -> bool {
        self.active().is_pending()
    }

    pub const fn last_failure(&self) -> Option<&ApiError> {
        self.active().error()
    }

    pub fn field_errors(&self) -> Option<ValidationErrorSet> {
        derive_field_errors(self.last_failure())
    }

    ///in create mode this also forgets the last outcome, update mode keeps it
    pub fn change_field(
        &mut self,
        field: StudentField,
        value: String,
    ) -> Result<(), UnknownGenderError> {
        self.form.fields.set(field, value)?;
        self.seed.note_edit();

        if self.mode.is_create() && self.create.reset() {
            debug!(?field, "edit cleared previous create result");
        }
        Ok(())
    }

    ///applies every value that differs from the working copy, or none of them on a bad value
    pub fn sync_fields(
        &mut self,
        values: &HashMap<String, String>,
    ) -> Result<usize, UnknownGenderError> {
        let changes: Vec<(StudentField, &String)> = StudentField::ALL
            .into_iter()
            .filter_map(|field| values.get(field.name()).map(|value| (field, value)))
            .filter(|(field, value)| self.form.fields.value(*field) != value.as_str())
            .collect();

        let mut checked = self.form.fields.clone();
        for (field, value) in &changes {
            checked.set(*field, (*value).clone())?;
        }

        for (field, value) in &changes {
            self.change_field(*field, (*value).clone())?;
        }
        Ok(changes.len())
    }

    ///`None` in create mode, there's nothing to load
    pub fn begin_fetch(&self) -> Option<(StudentId, FetchTicket)> {
        self.mode.id().map(|id| (id.clone(), self.seed.ticket()))
    }

    pub fn apply_snapshot(
        &mut self,
        ticket: FetchTicket,
        snapshot: &Snapshot<StudentRecord>,
    ) -> SeedOutcome {
        self.seed.seed(&mut self.form, ticket, snapshot)
    }

    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.active_mut().begin() {
            return None;
        }

        Some(match &self.mode {
            EditorMode::Create => SubmitRequest::Create(self.form.fields.clone()),
            EditorMode::Update(id) => SubmitRequest::Update(
                id.clone(),
                StudentRecord {
                    id: id.clone(),
                    fields: self.form.fields.clone(),
                },
            ),
        })
    }

    pub fn settle_submit(
        &mut self,
        outcome: Result<StudentRecord, ApiError>,
    ) -> Option<Settlement> {
        if !self.active_mut().settle(outcome) {
            return None;
        }

        let settlement = match (self.active().data(), &self.mode) {
            (Some(record), EditorMode::Create) => Settlement::Created(record.clone()),
            (Some(record), EditorMode::Update(_)) => Settlement::Updated(record.clone()),
            (None, _) => Settlement::Failed {
                status: self.last_failure().and_then(ApiError::status),
            },
        };

        if matches!(settlement, Settlement::Created(_)) {
            self.form = FormState::blank();
        }
        Some(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Gender;
    use serde_json::json;
    use std::sync::Arc;

    fn record(id: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId::new(id),
            fields: StudentDraft {
                email: "a@b.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                country: "UK".into(),
                gender: Gender::Female,
                avatar: "aGk=".into(),
                btc_address: "bc1q".into(),
            },
        }
    }

    fn unprocessable() -> ApiError {
        ApiError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: json!({"error": {"email": "Email invalid"}}),
        }
    }

    fn seeded_update_editor() -> StudentEditor {
        let mut editor = StudentEditor::new(EditorMode::Update(StudentId::new("42")));
        let (_, ticket) = editor.begin_fetch().unwrap();
        editor.apply_snapshot(
            ticket,
            &Snapshot {
                version: 1,
                data: Arc::new(record("42")),
            },
        );
        editor
    }

    #[test]
    fn editing_a_field_touches_only_that_field() {
        for field in StudentField::ALL {
            let mut editor = seeded_update_editor();
            let before = editor.form().clone();
            let value = if field == StudentField::Gender {
                "male"
            } else {
                "changed"
            };

            editor.change_field(field, value.into()).unwrap();

            assert_eq!(editor.form().fields.value(field), value);
            assert_eq!(editor.form().id, before.id);
            for other in StudentField::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(
                    editor.form().fields.value(other),
                    before.fields.value(other),
                    "{other:?} changed while editing {field:?}"
                );
            }
        }
    }

    #[test]
    fn create_edit_clears_previous_failure() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.begin_submit().unwrap();
        editor.settle_submit(Err(unprocessable()));
        assert!(editor.field_errors().is_some());

        editor
            .change_field(StudentField::Email, "fixed@b.com".into())
            .unwrap();

        assert!(editor.last_failure().is_none());
        assert!(editor.field_errors().is_none());
    }

    #[test]
    fn update_edit_keeps_previous_failure() {
        let mut editor = seeded_update_editor();
        editor.begin_submit().unwrap();
        editor.settle_submit(Err(unprocessable()));

        editor
            .change_field(StudentField::Email, "fixed@b.com".into())
            .unwrap();

        assert_eq!(
            editor.field_errors().unwrap().get(StudentField::Email),
            Some("Email invalid")
        );
    }

    #[test]
    fn create_success_resets_to_blank() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.change_field(StudentField::Email, "a@b.com".into()).unwrap();
        editor.change_field(StudentField::Gender, "Male".into()).unwrap();

        let Some(SubmitRequest::Create(draft)) = editor.begin_submit() else {
            panic!("create mode should submit a draft");
        };
        assert_eq!(draft.email, "a@b.com");
        assert_eq!(draft.gender, Gender::Male);

        let settled = editor.settle_submit(Ok(record("1")));
        assert_eq!(settled, Some(Settlement::Created(record("1"))));
        assert_eq!(editor.form(), &FormState::blank());
    }

    #[test]
    fn update_success_leaves_form_alone() {
        let mut editor = seeded_update_editor();
        editor.change_field(StudentField::Country, "France".into()).unwrap();
        let before = editor.form().clone();

        let Some(SubmitRequest::Update(id, body)) = editor.begin_submit() else {
            panic!("update mode should submit a record");
        };
        assert_eq!(id, StudentId::new("42"));
        assert_eq!(body.fields.country, "France");

        let mut returned = record("42");
        returned.fields.country = "France".into();
        let settled = editor.settle_submit(Ok(returned.clone()));

        assert_eq!(settled, Some(Settlement::Updated(returned)));
        assert_eq!(editor.form(), &before);
    }

    #[test]
    fn second_submit_while_pending_is_refused() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        assert!(editor.begin_submit().is_some());
        assert!(editor.is_submitting());
        assert!(editor.begin_submit().is_none());
    }

    #[test]
    fn edits_while_pending_do_not_drop_the_settlement() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.begin_submit().unwrap();
        editor.change_field(StudentField::Country, "UK".into()).unwrap();

        assert!(editor.settle_submit(Err(unprocessable())).is_some());
        assert!(editor.field_errors().is_some());
    }

    #[test]
    fn create_and_update_state_are_independent() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.begin_submit().unwrap();
        editor.settle_submit(Err(unprocessable()));

        assert!(editor.create.error().is_some());
        assert!(editor.update.error().is_none());
    }

    #[test]
    fn sync_with_a_bad_value_changes_nothing() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.begin_submit().unwrap();
        editor.settle_submit(Err(unprocessable()));

        let values = HashMap::from([
            ("email".to_string(), "x@y.z".to_string()),
            ("first_name".to_string(), "Ada".to_string()),
            ("gender".to_string(), "robot".to_string()),
        ]);
        assert!(editor.sync_fields(&values).is_err());
        assert_eq!(editor.form(), &FormState::blank());
        assert!(editor.last_failure().is_some());
    }

    #[test]
    fn sync_only_applies_differences() {
        let mut editor = StudentEditor::new(EditorMode::Create);
        editor.begin_submit().unwrap();
        editor.settle_submit(Err(unprocessable()));

        let unchanged = HashMap::from([("email".to_string(), String::new())]);
        assert_eq!(editor.sync_fields(&unchanged).unwrap(), 0);
        assert!(editor.last_failure().is_some());

        let values = HashMap::from([
            ("email".to_string(), "x@y.z".to_string()),
            ("gender".to_string(), "Female".to_string()),
            ("id".to_string(), "999".to_string()),
        ]);
        assert_eq!(editor.sync_fields(&values).unwrap(), 2);
        assert_eq!(editor.form().fields.gender, Gender::Female);
        assert_eq!(editor.form().id, None);
        assert!(editor.last_failure().is_none());
    }
}
