//! Custom actions for the Order actor.

use crate::model::{CancelOutcome, UserId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Owner-initiated cancellation. Restores inventory for every line.
    Cancel { requested_by: UserId },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Cancel(CancelOutcome),
}
