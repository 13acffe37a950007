//! Passcode gate guarding access to the rest of the application.

use super::model::SessionState;
use super::repository::AuthMarkerRepository;
use crate::error::ForgeError;

/// Single-secret comparison mechanism backed by a durable marker.
///
/// A wrong passcode is a normal negative result, never an error. `logout`
/// performs no navigation; callers must separately redirect.
pub struct PasscodeGate<R: AuthMarkerRepository> {
    secret: String,
    state: SessionState,
    repository: R,
}

impl<R: AuthMarkerRepository> PasscodeGate<R> {
    /// Creates a gate in the `Unknown` state; call [`resolve`](Self::resolve)
    /// to settle it against the durable marker.
    pub fn new(secret: impl Into<String>, repository: R) -> Self {
        Self {
            secret: secret.into(),
            state: SessionState::Unknown,
            repository,
        }
    }

    /// Settles the session state from the presence of the durable marker.
    pub fn resolve(&mut self) -> Result<SessionState, ForgeError> {
        self.state = if self.repository.exists()? {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        Ok(self.state)
    }

    /// Compares the candidate against the configured secret.
    ///
    /// On match: persists the marker, transitions to `Authenticated` and
    /// returns `Ok(true)`. On mismatch: returns `Ok(false)` with no state
    /// change and the marker untouched.
    pub fn authenticate(&mut self, candidate: &str) -> Result<bool, ForgeError> {
        if candidate == self.secret {
            self.repository.set()?;
            self.state = SessionState::Authenticated;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Clears the durable marker and transitions to `Unauthenticated`.
    pub fn logout(&mut self) -> Result<(), ForgeError> {
        self.repository.clear()?;
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryMarker {
        present: Rc<Cell<bool>>,
    }

    impl AuthMarkerRepository for MemoryMarker {
        fn exists(&self) -> Result<bool, ForgeError> {
            Ok(self.present.get())
        }

        fn set(&self) -> Result<(), ForgeError> {
            self.present.set(true);
            Ok(())
        }

        fn clear(&self) -> Result<(), ForgeError> {
            self.present.set(false);
            Ok(())
        }
    }

    #[test]
    fn test_state_is_unknown_before_resolve() {
        let gate = PasscodeGate::new("secret", MemoryMarker::default());
        assert_eq!(gate.state(), SessionState::Unknown);
    }

    #[test]
    fn test_resolve_reads_marker() {
        let marker = MemoryMarker::default();
        let mut gate = PasscodeGate::new("secret", marker.clone());
        assert_eq!(gate.resolve().unwrap(), SessionState::Unauthenticated);

        marker.present.set(true);
        assert_eq!(gate.resolve().unwrap(), SessionState::Authenticated);
    }

    #[test]
    fn test_correct_passcode_authenticates_and_persists() {
        let marker = MemoryMarker::default();
        let mut gate = PasscodeGate::new("secret", marker.clone());

        assert!(gate.authenticate("secret").unwrap());
        assert_eq!(gate.state(), SessionState::Authenticated);
        assert!(marker.present.get());
    }

    #[test]
    fn test_wrong_passcode_changes_nothing() {
        let marker = MemoryMarker::default();
        let mut gate = PasscodeGate::new("secret", marker.clone());
        gate.resolve().unwrap();

        assert!(!gate.authenticate("Secret").unwrap());
        assert!(!gate.authenticate("").unwrap());
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(!marker.present.get());
    }

    #[test]
    fn test_logout_clears_marker_regardless_of_prior_state() {
        let marker = MemoryMarker::default();
        let mut gate = PasscodeGate::new("secret", marker.clone());
        gate.authenticate("secret").unwrap();

        gate.logout().unwrap();
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(!marker.present.get());

        // Logging out while already unauthenticated is fine.
        gate.logout().unwrap();
        assert_eq!(gate.state(), SessionState::Unauthenticated);
    }
}
