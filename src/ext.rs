//! Host-facing extension points.
//!
//! The session client never navigates or renders anything itself. Hosts (a TUI, a desktop
//! shell, a test harness) plug in here to react to session events.

pub mod session_lost;

pub use session_lost::*;
