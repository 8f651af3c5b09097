//! approval batches and the confirm state machine
//!
//! a batch is the ephemeral working set of unapproved records selected for a
//! bulk approval; the state machine tracks exactly one in-flight confirm call

use crate::aggregate::{batch_totals, group_by, BatchTotals, Group, GroupKey};
use crate::record::DistributionRecord;

/// working set of currently-unapproved records selected for bulk approval
///
/// derived from a single game's review surface and discarded after the
/// dialog closes; never stored
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApprovalBatch {
    pub items: Vec<DistributionRecord>,
    pub note: Option<String>,
}

impl ApprovalBatch {
    pub fn new(items: Vec<DistributionRecord>, note: Option<String>) -> Self {
        Self { items, note }
    }

    /// the game this batch approves, from its first record
    ///
    /// the approval call is scoped to one game; the review surface guarantees
    /// a batch never spans games. empty batch means nothing to dispatch.
    pub fn game_id(&self) -> Option<&str> {
        self.items.first().map(|r| r.game_id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// true when every item carries the same game id
    pub fn spans_single_game(&self) -> bool {
        match self.items.first() {
            None => true,
            Some(first) => self.items.iter().all(|r| r.game_id == first.game_id),
        }
    }

    pub fn totals(&self) -> BatchTotals {
        batch_totals(&self.items)
    }

    pub fn by_phone(&self) -> Vec<Group> {
        group_by(&self.items, GroupKey::Phone)
    }

    pub fn by_role(&self) -> Vec<Group> {
        group_by(&self.items, GroupKey::Role)
    }
}

/// lifecycle of one approval confirm call
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ApprovalState {
    #[default]
    Idle,
    Loading,
    Succeeded { approved: Vec<DistributionRecord> },
    Failed { error: String },
}

/// events driving [`ApprovalState`]
///
/// every entry into `Loading` comes from an explicit `Confirm`; there are no
/// timer-driven transitions and no automatic retries
#[derive(Clone, Debug, PartialEq)]
pub enum ApprovalAction {
    /// user confirmed the batch
    Confirm,
    /// server accepted; carries the approved rows it returned
    ServerOk { approved: Vec<DistributionRecord> },
    /// server failed or rejected the approval
    ServerError { message: String },
    /// user chose to retry after a failure; re-arms the confirm button
    Retry,
    /// dialog closed; clears any banner
    Close,
}

impl ApprovalState {
    /// pure transition; actions that are illegal in the current state leave
    /// it unchanged, which is the guard against double submission
    pub fn reduce(self, action: ApprovalAction) -> ApprovalState {
        match (self, action) {
            (ApprovalState::Idle, ApprovalAction::Confirm) => ApprovalState::Loading,
            (ApprovalState::Loading, ApprovalAction::ServerOk { approved }) => {
                ApprovalState::Succeeded { approved }
            }
            (ApprovalState::Loading, ApprovalAction::ServerError { message }) => {
                ApprovalState::Failed { error: message }
            }
            (ApprovalState::Failed { .. }, ApprovalAction::Retry) => ApprovalState::Idle,
            (_, ApprovalAction::Close) => ApprovalState::Idle,
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ApprovalState::Loading)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, ApprovalState::Succeeded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApprovalState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// confirm is enabled only from idle with a non-empty batch
    pub fn can_confirm(&self, batch: &ApprovalBatch) -> bool {
        matches!(self, ApprovalState::Idle) && !batch.is_empty()
    }
}
