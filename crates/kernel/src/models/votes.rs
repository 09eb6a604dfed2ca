//! Vote adjustment payload shared by articles and comments.

use serde::Deserialize;
use serde_json::Value;

/// Raw request body for a vote adjustment.
///
/// `inc_votes` is kept untyped so the pipeline can tell a missing field
/// apart from a malformed one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteUpdate {
    pub inc_votes: Option<Value>,
}

/// Reason a vote payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDeltaError {
    Missing,
    Malformed,
}

impl VoteUpdate {
    /// Signed delta to apply to the stored tally.
    ///
    /// Accepts JSON integers and strings holding an integer; everything
    /// else, including values outside the `i32` range, is malformed.
    pub fn delta(&self) -> Result<i32, VoteDeltaError> {
        let value = match &self.inc_votes {
            None | Some(Value::Null) => return Err(VoteDeltaError::Missing),
            Some(value) => value,
        };

        let delta = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        delta
            .and_then(|d| i32::try_from(d).ok())
            .ok_or(VoteDeltaError::Malformed)
    }
}
