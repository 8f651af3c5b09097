//! distributions fetch-lifecycle slice
//!
//! pure reducer over the fetch lifecycle of a record set: pending, fulfilled,
//! rejected, reset. records are fetched fresh per view and replaced whole; an
//! `approved` flag only moves false to true through a fulfilled round trip,
//! never by local mutation.

use crate::record::DistributionRecord;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistributionsState {
    pub records: Vec<DistributionRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DistributionsAction {
    /// a fetch was dispatched
    FetchPending,
    /// the fetch resolved with a fresh record set
    FetchFulfilled { records: Vec<DistributionRecord> },
    /// the fetch failed; prior records stay on screen behind the error
    FetchRejected { message: String },
    /// view closed; drop everything
    Reset,
}

impl DistributionsState {
    pub fn reduce(self, action: DistributionsAction) -> DistributionsState {
        match action {
            DistributionsAction::FetchPending => DistributionsState {
                loading: true,
                error: None,
                ..self
            },
            DistributionsAction::FetchFulfilled { records } => DistributionsState {
                records,
                loading: false,
                error: None,
            },
            DistributionsAction::FetchRejected { message } => DistributionsState {
                loading: false,
                error: Some(message),
                ..self
            },
            DistributionsAction::Reset => DistributionsState::default(),
        }
    }
}
