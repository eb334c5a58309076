use crate::{
    editor::{StudentEditor, mode::EditorMode},
    error::{EditorResult, MissingEditorSnafu},
};
use snafu::OptionExt;
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};
use uuid::Uuid;

const IDLE_LIMIT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
struct Slot {
    editor: StudentEditor,
    last_touched: Instant,
}

#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: Mutex<HashMap<Uuid, Slot>>,
}

impl EditorRegistry {
    ///also drops editors nobody has touched in a while
    pub fn open(&self, mode: EditorMode) -> Uuid {
        let view = Uuid::new_v4();
        let mut editors = self.editors.lock().unwrap_or_else(PoisonError::into_inner);

        let before = editors.len();
        editors.retain(|_, slot| slot.last_touched.elapsed() < IDLE_LIMIT);
        if editors.len() < before {
            debug!(dropped = before - editors.len(), "dropped idle editors");
        }

        editors.insert(
            view,
            Slot {
                editor: StudentEditor::new(mode),
                last_touched: Instant::now(),
            },
        );
        view
    }

    pub fn with<R>(&self, view: Uuid, f: impl FnOnce(&mut StudentEditor) -> R) -> EditorResult<R> {
        let mut editors = self.editors.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = editors.get_mut(&view).context(MissingEditorSnafu { view })?;
        slot.last_touched = Instant::now();
        Ok(f(&mut slot.editor))
    }

    #[cfg(test)]
    pub fn close(&self, view: Uuid) {
        self.editors.lock().unwrap().remove(&view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::StudentId, error::EditorError};

    #[test]
    fn views_are_separate() {
        let registry = EditorRegistry::default();
        let add = registry.open(EditorMode::Create);
        let edit = registry.open(EditorMode::Update(StudentId::new("42")));

        assert_ne!(add, edit);
        assert_eq!(registry.editors.lock().unwrap().len(), 2);
        assert!(registry.with(add, |e| e.mode().is_create()).unwrap());
        assert!(!registry.with(edit, |e| e.mode().is_create()).unwrap());
    }

    #[test]
    fn unknown_views_are_errors() {
        let registry = EditorRegistry::default();
        let err = registry.with(Uuid::new_v4(), |_| ()).unwrap_err();
        assert!(matches!(err, EditorError::MissingEditor { .. }));
    }

    #[test]
    fn closed_views_are_gone() {
        let registry = EditorRegistry::default();
        let view = registry.open(EditorMode::Create);
        registry.close(view);
        assert!(registry.with(view, |_| ()).is_err());
    }
}
