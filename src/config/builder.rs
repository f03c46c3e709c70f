// self
use crate::{_prelude::*, config::SessionConfig};

/// Errors raised while constructing or validating a [`SessionConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SessionConfigError {
	/// Base URL must use HTTP or HTTPS.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Offending base URL.
		url: String,
	},
	/// Base URL must not carry its own query or fragment.
	#[error("Base URL must not carry a query or fragment: {url}.")]
	BaseUrlHasQuery {
		/// Offending base URL.
		url: String,
	},
	/// Timeout must be strictly positive.
	#[error("Timeout must be positive.")]
	NonPositiveTimeout,
	/// Configured paths must be absolute.
	#[error("The {field} must start with `/`: {path}.")]
	RelativePath {
		/// Which path failed validation.
		field: &'static str,
		/// Path that failed validation.
		path: String,
	},
	/// Header names must be non-empty and free of whitespace.
	#[error("Default header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Offending header name.
		name: String,
	},
}

/// Builder for [`SessionConfig`] values.
#[derive(Debug)]
pub struct SessionConfigBuilder {
	/// Base URL of the storefront API.
	pub base_url: Url,
	/// Per-call timeout.
	pub timeout: Duration,
	/// Refresh endpoint path.
	pub refresh_path: String,
	/// Login entry path.
	pub login_path: String,
	/// Extra headers sent with every request.
	pub default_headers: BTreeMap<String, String>,
}
impl SessionConfigBuilder {
	/// Creates a new builder seeded with defaults.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			timeout: SessionConfig::DEFAULT_TIMEOUT,
			refresh_path: SessionConfig::DEFAULT_REFRESH_PATH.into(),
			login_path: SessionConfig::DEFAULT_LOGIN_PATH.into(),
			default_headers: BTreeMap::new(),
		}
	}

	/// Overrides the per-call timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the login entry path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Adds a header sent with every request.
	pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_headers.insert(name.into(), value.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<SessionConfig, SessionConfigError> {
		let config = SessionConfig {
			base_url: self.base_url,
			timeout: self.timeout,
			refresh_path: self.refresh_path,
			login_path: self.login_path,
			default_headers: self.default_headers,
		};

		config.validate()?;

		Ok(config)
	}
}

impl SessionConfig {
	fn validate(&self) -> Result<(), SessionConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(SessionConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
			return Err(SessionConfigError::BaseUrlHasQuery { url: self.base_url.to_string() });
		}
		if !self.timeout.is_positive() {
			return Err(SessionConfigError::NonPositiveTimeout);
		}

		validate_path("refresh path", &self.refresh_path)?;
		validate_path("login path", &self.login_path)?;

		if let Some(name) = self
			.default_headers
			.keys()
			.find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
		{
			return Err(SessionConfigError::InvalidHeaderName { name: name.clone() });
		}

		Ok(())
	}
}

fn validate_path(field: &'static str, path: &str) -> Result<(), SessionConfigError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(SessionConfigError::RelativePath { field, path: path.into() })
	}
}
