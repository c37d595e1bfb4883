use serde::{Deserialize, Serialize};

use crate::dispatch::DispatchError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionResult {
    Success,
    /// The action's preconditions failed; the session is unchanged.
    Rejected(DispatchError),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success)
    }

    /// Extract the rejection reason if present.
    pub fn error(&self) -> Option<DispatchError> {
        match self {
            ActionResult::Rejected(e) => Some(*e),
            ActionResult::Success => None,
        }
    }
}

impl From<Result<u64, DispatchError>> for ActionResult {
    fn from(result: Result<u64, DispatchError>) -> Self {
        match result {
            Ok(_) => ActionResult::Success,
            Err(e) => ActionResult::Rejected(e),
        }
    }
}
