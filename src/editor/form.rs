use crate::{
    data::{StudentDraft, StudentId, StudentRecord},
    query_cache::Snapshot,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: Option<StudentId>,
    pub fields: StudentDraft,
}

impl FormState {
    pub fn blank() -> Self {
        Self::default()
    }
}

impl From<StudentRecord> for FormState {
    fn from(StudentRecord { id, fields }: StudentRecord) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }
}

///how many edits had been made when a load started
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    edits_at_issue: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    ///this snapshot (or a newer one) was already seen
    AlreadySeen,
    ///the user edited the form after the fetch started, their edits win
    Superseded,
}

/// Tracks which fetched snapshot the form was last seeded from, so a snapshot seeds at most
/// once and never clobbers edits made while it was in flight.
#[derive(Debug, Default)]
pub struct SeedToken {
    seen_version: Option<u64>,
    edits: u64,
}

impl SeedToken {
    pub const fn note_edit(&mut self) {
        self.edits += 1;
    }

    pub const fn ticket(&self) -> FetchTicket {
        FetchTicket {
            edits_at_issue: self.edits,
        }
    }

    pub fn seed(
        &mut self,
        form: &mut FormState,
        ticket: FetchTicket,
        snapshot: &Snapshot<StudentRecord>,
    ) -> SeedOutcome {
        if self
            .seen_version
            .is_some_and(|seen| snapshot.version <= seen)
        {
            return SeedOutcome::AlreadySeen;
        }
        self.seen_version = Some(snapshot.version);

        if ticket.edits_at_issue != self.edits {
            return SeedOutcome::Superseded;
        }

        *form = FormState::from(StudentRecord::clone(&snapshot.data));
        SeedOutcome::Applied
    }
}
