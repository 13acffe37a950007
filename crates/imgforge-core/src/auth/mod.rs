//! Passcode gate: session state, durable marker seam and the gate itself.

pub mod gate;
pub mod model;
pub mod repository;

pub use gate::PasscodeGate;
pub use model::SessionState;
pub use repository::AuthMarkerRepository;
