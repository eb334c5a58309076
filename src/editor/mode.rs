use crate::data::StudentId;

pub const ADD_STUDENT_PATH: &str = "/students/add";
const STUDENT_PATH_PREFIX: &str = "/students/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update(StudentId),
}

impl EditorMode {
    ///`None` for anything that isn't the add page or a single student
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.strip_suffix('/').unwrap_or(path);
        if path == ADD_STUDENT_PATH {
            return Some(Self::Create);
        }

        let id = path.strip_prefix(STUDENT_PATH_PREFIX)?;
        if id.is_empty() || id.contains('/') {
            return None;
        }

        Some(Self::Update(StudentId::new(id)))
    }

    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }

    pub const fn id(&self) -> Option<&StudentId> {
        match self {
            Self::Create => None,
            Self::Update(id) => Some(id),
        }
    }

    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Create => "Add Student",
            Self::Update(_) => "Edit Student",
        }
    }

    pub const fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Add",
            Self::Update(_) => "Update",
        }
    }
}
