#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

/// Lifecycle of a tracked async write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Bookkeeping for one submission: where it is in its lifecycle and the
/// last error message, kept until the next attempt starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mutation {
    pub status: MutationStatus,
    pub error: Option<String>,
}

impl Mutation {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == MutationStatus::Idle
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == MutationStatus::Error
    }

    /// Enter pending; a new attempt discards the previous error.
    pub fn begin(&mut self) {
        self.status = MutationStatus::Pending;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.status = MutationStatus::Success;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = MutationStatus::Error;
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
