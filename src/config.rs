//! Session configuration: backend location, timeouts, and session entry points.

/// Builder API for session configuration.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Validated settings shared by the transport and the session client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
	/// Base URL every request path is appended to (for example `https://shop.example.com/api`).
	pub base_url: Url,
	/// Per-call timeout applied by the transport.
	pub timeout: Duration,
	/// Path of the refresh endpoint, relative to the base URL.
	pub refresh_path: String,
	/// Login entry path handed to the session-lost hook.
	pub login_path: String,
	/// Headers added to every request (besides `Content-Type` and `Authorization`).
	pub default_headers: BTreeMap<String, String>,
}
impl SessionConfig {
	/// Default per-call timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(30);
	/// Default refresh endpoint.
	pub const DEFAULT_REFRESH_PATH: &'static str = "/auth/refresh";
	/// Default login entry path.
	pub const DEFAULT_LOGIN_PATH: &'static str = "/login";

	/// Returns a builder rooted at `base_url`.
	pub fn builder(base_url: Url) -> SessionConfigBuilder {
		SessionConfigBuilder::new(base_url)
	}

	/// Joins `path` and `query` onto the base URL.
	///
	/// The base path is kept (`/api` + `/auth/me` gives `/api/auth/me`), unlike
	/// [`Url::join`], which would replace it.
	pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
		if path.contains(['?', '#']) {
			return Err(crate::error::ConfigError::InvalidPath { path: path.into() }.into());
		}

		let mut url = self.base_url.clone();
		let joined =
			format!("{}/{}", self.base_url.path().trim_end_matches('/'), path.trim_start_matches('/'));

		url.set_path(&joined);

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
		}

		Ok(url)
	}

	/// Timeout converted for transports that speak [`std::time::Duration`].
	pub fn std_timeout(&self) -> std::time::Duration {
		std::time::Duration::try_from(self.timeout).unwrap_or(std::time::Duration::ZERO)
	}
}
