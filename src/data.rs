pub mod student;

pub use student::{Gender, StudentDraft, StudentField, StudentId, StudentRecord};
