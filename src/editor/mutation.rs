use crate::api::ApiError;

#[derive(Debug)]
enum MutationState<T> {
    Idle,
    Pending,
    Success(T),
    Error(ApiError),
}

///`idle -> pending -> success | error`, settled states go back to `pending` or `idle`
#[derive(Debug)]
pub struct Mutation<T> {
    state: MutationState<T>,
}

impl<T> Default for Mutation<T> {
    fn default() -> Self {
        Self {
            state: MutationState::Idle,
        }
    }
}

impl<T> Mutation<T> {
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, MutationState::Pending)
    }

    pub const fn error(&self) -> Option<&ApiError> {
        match &self.state {
            MutationState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub const fn data(&self) -> Option<&T> {
        match &self.state {
            MutationState::Success(data) => Some(data),
            _ => None,
        }
    }

    ///returns false if one is already in flight, in which case nothing changes
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.state = MutationState::Pending;
        true
    }

    pub fn settle(&mut self, outcome: Result<T, ApiError>) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = match outcome {
            Ok(data) => MutationState::Success(data),
            Err(e) => MutationState::Error(e),
        };
        true
    }

    ///forgets a settled result, pending requests are left alone
    pub fn reset(&mut self) -> bool {
        match self.state {
            MutationState::Success(_) | MutationState::Error(_) => {
                self.state = MutationState::Idle;
                true
            }
            MutationState::Idle | MutationState::Pending => false,
        }
    }
}
