//! Event stream addressing and append expectations.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::EditingSessionId;

/// Name of an append-only event stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamName(String);

impl StreamName {
    /// Prefix of every editing session stream. Readers of the same stream depend on it.
    pub const EDITING_SESSION_PREFIX: &'static str = "editingsession:";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Stream holding all changes made within one editing session.
    pub fn for_editing_session(editing_session_id: &EditingSessionId) -> Self {
        Self(format!("{}{}", Self::EDITING_SESSION_PREFIX, editing_session_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for StreamName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optimistic concurrency expectation for a stream append.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking.
    Any,
    /// Require the stream to be at an exact version (0 = empty stream).
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
