//! Session-level error types shared across the client, transports, and stores.

// self
use crate::_prelude::*;

/// Session-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical session error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); never retried by the session.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Backend answered with a non-success status.
	#[error("Backend responded with HTTP {status}{}.", format_message(.message))]
	Api {
		/// HTTP status code.
		status: u16,
		/// Server-supplied message taken from the `message` or `error` body field.
		message: Option<String>,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Backend returned a malformed body for HTTP {status}.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the undecodable response.
		status: u16,
	},
	/// The session refresh failed; every caller queued behind it shares the same cause.
	#[error("Session refresh failed: {0}")]
	RefreshFailed(#[source] Arc<Error>),
	/// The task driving the refresh was dropped before the refresh settled.
	#[error("Session refresh was abandoned before it settled.")]
	RefreshAbandoned,
	/// The credential store was cleared while a refresh was in flight.
	#[error("Session ended while a refresh was in flight.")]
	SessionEnded,
}
impl Error {
	/// Builds the error for a non-success response, lifting `message`/`error` out of the body.
	pub fn from_status(status: u16, body: &[u8]) -> Self {
		#[derive(Deserialize)]
		struct ErrorBody {
			message: Option<String>,
			error: Option<String>,
		}

		let message = serde_json::from_slice::<ErrorBody>(body)
			.ok()
			.and_then(|body| body.message.or(body.error))
			.filter(|message| !message.trim().is_empty());

		Self::Api { status, message }
	}

	/// HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
			Self::RefreshFailed(inner) => inner.status(),
			_ => None,
		}
	}

	/// Returns `true` when the backend rejected the caller's credentials.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Api { status: 401, .. })
	}

	/// Renders a message suitable for showing to a storefront user.
	///
	/// Server-provided messages win, then well-known statuses get a canned explanation, and
	/// everything else falls back to the error's own display text.
	pub fn describe(&self) -> String {
		if let Self::RefreshFailed(inner) = self {
			return inner.describe();
		}
		if let Self::Api { message: Some(message), .. } = self {
			return message.clone();
		}

		match self.status() {
			Some(401) => "Unauthorized. Please login again.".into(),
			Some(403) => "Forbidden. You don't have permission.".into(),
			Some(404) => "Resource not found.".into(),
			Some(500) => "Internal server error. Please try again later.".into(),
			_ => self.to_string(),
		}
	}
}

/// Configuration and request-encoding failures raised by the session.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Session configuration failed validation.
	#[error(transparent)]
	InvalidConfig(#[from] crate::config::SessionConfigError),
	/// Request path or query could not be joined onto the base URL.
	#[error("Request path `{path}` cannot be joined onto the base URL.")]
	InvalidPath {
		/// Offending request path.
		path: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	EncodeBody(#[source] serde_json::Error),
	/// Query parameters must flatten to scalar values.
	#[error("Query parameter `{name}` is not a scalar value.")]
	UnsupportedQueryValue {
		/// Offending parameter name, empty when the whole value is not an object.
		name: String,
	},
	/// The stored session has no refresh credential.
	#[error("Stored session is missing a refresh token.")]
	MissingRefreshToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call did not complete within the configured timeout.
	#[error("Backend call timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

fn format_message(message: &Option<String>) -> String {
	match message {
		Some(message) => format!(": {message}"),
		None => String::new(),
	}
}
