//! Port invoked when the session can no longer be recovered and the user must sign in again.

// self
use crate::_prelude::*;

/// Why the session was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionLostReason {
	/// A call was rejected and no refresh credential was stored.
	MissingRefreshToken,
	/// The refresh call itself failed.
	RefreshFailed,
}
impl SessionLostReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionLostReason::MissingRefreshToken => "missing_refresh_token",
			SessionLostReason::RefreshFailed => "refresh_failed",
		}
	}
}
impl Display for SessionLostReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Notification delivered to a [`SessionLostHook`]; the credential store is already empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionLost {
	/// Login entry point the host should send the user to.
	pub login_path: String,
	/// Cause of the loss.
	pub reason: SessionLostReason,
}

/// Receives session-lost notifications, typically by navigating to [`SessionLost::login_path`].
pub trait SessionLostHook
where
	Self: Send + Sync,
{
	/// Called once per unrecoverable failure, after the credentials were cleared.
	fn on_session_lost(&self, event: SessionLost);
}
impl<F> SessionLostHook for F
where
	F: Fn(SessionLost) + Send + Sync,
{
	fn on_session_lost(&self, event: SessionLost) {
		self(event)
	}
}

/// Hook that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreSessionLost;
impl SessionLostHook for IgnoreSessionLost {
	fn on_session_lost(&self, _: SessionLost) {}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn closures_act_as_hooks() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		let hook = move |event: SessionLost| sink.lock().push(event.login_path);

		hook.on_session_lost(SessionLost {
			login_path: "/login".into(),
			reason: SessionLostReason::RefreshFailed,
		});
		IgnoreSessionLost.on_session_lost(SessionLost {
			login_path: "/ignored".into(),
			reason: SessionLostReason::MissingRefreshToken,
		});

		assert_eq!(*seen.lock(), vec!["/login".to_string()]);
	}
}
