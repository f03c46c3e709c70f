//! Optional observability helpers for session calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit spans named `storefront_session.call` with the
//!   `kind` and `stage` fields, plus `warn` events when a session is lost.
//! - Enable `metrics` to increment the `storefront_session_call_total` counter for every
//!   attempt/success/failure/queued/replayed call, labeled by `kind` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Call kinds observed by the session client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Ordinary backend call issued through the session client.
	Api,
	/// Refresh exchange.
	Refresh,
	/// Login, register, or logout call.
	Auth,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Api => "api",
			CallKind::Refresh => "refresh",
			CallKind::Auth => "auth",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a session helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Call parked behind an in-flight refresh.
	Queued,
	/// Call re-dispatched after an authorization failure.
	Replayed,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
			CallOutcome::Queued => "queued",
			CallOutcome::Replayed => "replayed",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
