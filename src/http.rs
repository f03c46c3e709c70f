//! Transport primitives for storefront backend calls.
//!
//! The module exposes [`ApiTransport`] alongside the transport-neutral [`ApiRequest`] and
//! [`ApiResponse`] values so hosts can plug in any HTTP stack. A request value is plain data:
//! the session client attaches credentials to it before dispatch and hands the very same value
//! back to the transport when a call has to be replayed after a refresh.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};
#[cfg(feature = "reqwest")] use crate::{config::SessionConfig, error::TransportError};

/// Boxed future returned by [`ApiTransport::dispatch`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute storefront calls.
///
/// Implementations must return `Ok` for every HTTP response, whatever its status; the session
/// client owns status classification (401 handling in particular). `Err` is reserved for calls
/// that never produced a response.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` and returns the raw response.
	fn dispatch<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a>;
}

/// HTTP verbs used by the storefront API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the verb as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reusable description of a backend call.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the configured base URL.
	pub path: String,
	/// Query parameters, in order.
	pub query: Vec<(String, String)>,
	/// Extra request headers.
	pub headers: BTreeMap<String, String>,
	/// JSON body, if any.
	pub body: Option<serde_json::Value>,
	bearer: Option<TokenSecret>,
	retried: bool,
	generation: Option<u64>,
}
impl ApiRequest {
	/// Creates a request for `method` + `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: BTreeMap::new(),
			body: None,
			bearer: None,
			retried: false,
			generation: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends a query parameter.
	pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((name.into(), value.to_string()));

		self
	}

	/// Appends every field of `params` as a query parameter, skipping `null` fields.
	///
	/// `params` must serialize to a flat JSON object; strings are sent as-is and other scalars in
	/// their JSON form.
	pub fn query_params<Q>(mut self, params: &Q) -> Result<Self>
	where
		Q: ?Sized + Serialize,
	{
		let serde_json::Value::Object(fields) =
			serde_json::to_value(params).map_err(ConfigError::EncodeBody)?
		else {
			return Err(ConfigError::UnsupportedQueryValue { name: String::new() }.into());
		};

		for (name, value) in fields {
			let value = match value {
				serde_json::Value::Null => continue,
				serde_json::Value::String(s) => s,
				serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
				serde_json::Value::Array(_) | serde_json::Value::Object(_) =>
					return Err(ConfigError::UnsupportedQueryValue { name }.into()),
			};

			self.query.push((name, value));
		}

		Ok(self)
	}

	/// Sets a request header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body).map_err(ConfigError::EncodeBody)?);

		Ok(self)
	}

	/// Bearer credential attached to the request, if any.
	pub fn bearer(&self) -> Option<&TokenSecret> {
		self.bearer.as_ref()
	}

	/// Returns `true` once the request has been replayed after an authorization failure.
	pub fn is_retried(&self) -> bool {
		self.retried
	}

	pub(crate) fn set_bearer(&mut self, bearer: Option<TokenSecret>) {
		self.bearer = bearer;
	}

	pub(crate) fn mark_retried(&mut self) {
		self.retried = true;
	}

	pub(crate) fn generation(&self) -> Option<u64> {
		self.generation
	}

	pub(crate) fn set_generation(&mut self, generation: u64) {
		self.generation = Some(generation);
	}
}

/// Raw backend response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers with lowercase names; non-UTF-8 values are dropped.
	pub headers: BTreeMap<String, String>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response with an empty body.
	pub fn new(status: u16) -> Self {
		Self { status, ..Default::default() }
	}

	/// Builds a response carrying `body` serialized as JSON.
	pub fn with_json(status: u16, body: &serde_json::Value) -> Self {
		let mut response = Self::new(status);

		response.headers.insert("content-type".into(), "application/json".into());
		response.body = body.to_string().into_bytes();

		response
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` for the "unauthenticated" status.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Converts non-2xx responses into [`Error::Api`].
	pub fn error_for_status(self) -> Result<Self> {
		if self.is_success() { Ok(self) } else { Err(Error::from_status(self.status, &self.body)) }
	}

	/// Decodes the body as JSON, reporting the failing field path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: self.status })
	}
}

/// Reqwest-backed transport rooted at the configured base URL.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	config: SessionConfig,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a client honouring the configured timeout and default headers.
	pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
		use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		for (name, value) in &config.default_headers {
			let name = HeaderName::from_bytes(name.as_bytes()).map_err(ConfigError::http_client_build)?;
			let value = HeaderValue::from_str(value).map_err(ConfigError::http_client_build)?;

			headers.insert(name, value);
		}

		let client =
			ReqwestClient::builder().timeout(config.std_timeout()).default_headers(headers).build()?;

		Ok(Self::with_client(config.clone(), client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; timeouts and headers are the caller's job.
	pub fn with_client(config: SessionConfig, client: ReqwestClient) -> Self {
		Self { client, config }
	}

	async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
		let url = self.config.endpoint(&request.path, &request.query)?;
		let method = match request.method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		};
		let mut builder = self.client.request(method, url);

		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(bearer) = request.bearer() {
			builder = builder.bearer_auth(bearer.expose());
		}
		if let Some(body) = request.body.as_ref() {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let status = response.status().as_u16();
		let headers = response
			.headers()
			.iter()
			.filter_map(|(name, value)| {
				value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
			})
			.collect();
		let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

		Ok(ApiResponse { status, headers, body })
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn dispatch<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a> {
		Box::pin(self.execute(request))
	}
}
