//! Session state domain model.

use serde::{Deserialize, Serialize};

/// Authentication state of the current session.
///
/// `Unknown` is a first-class state: it holds until the durable marker has
/// been checked, so dependent surfaces can avoid flashing protected content
/// before the check resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The durable marker has not been checked yet.
    Unknown,
    /// The marker is present; the session is authenticated.
    Authenticated,
    /// The marker is absent; the session is not authenticated.
    Unauthenticated,
}

impl SessionState {
    /// Returns true only for `Authenticated`.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Unknown
    }
}
