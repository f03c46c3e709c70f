//! Session client: bearer attachment and transparent recovery from access-credential expiry.
//!
//! Every call goes through [`SessionClient::send`], which attaches the stored access
//! credential, dispatches through the configured [`ApiTransport`], and hands 401 responses to
//! [`SessionClient::handle_unauthorized`]. The first caller to see a 401 while the client is
//! idle becomes the refresh leader; everyone else who fails while that refresh is outstanding
//! is parked in a FIFO queue and replayed with the new access credential once it settles. A
//! refresh is attempted at most once per failure, and every replay is marked as retried so a
//! second 401 is terminal.

mod metrics;
mod refresh;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{AuthResponse, CredentialPair, RefreshTokenRequest, TokenSecret},
	config::SessionConfig,
	error::ConfigError,
	ext::{IgnoreSessionLost, SessionLost, SessionLostHook, SessionLostReason},
	http::{ApiRequest, ApiResponse, ApiTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::{CompareAndSwapOutcome, CredentialStore},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use refresh::{Admission, InFlight, RefreshCoordinator, Settlement};

#[cfg(feature = "reqwest")]
/// Session client specialized for the crate's default reqwest transport.
pub type ReqwestSessionClient = SessionClient<ReqwestTransport>;

/// Attaches credentials to backend calls and recovers from expired access credentials.
///
/// Clones share the credential store, the refresh coordinator, and the metrics, so a clone
/// observes refreshes started by any other clone. Independently constructed clients never
/// share refresh state.
pub struct SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every backend call, including the refresh exchange.
	pub transport: Arc<T>,
	/// Store holding the access/refresh pair.
	pub store: Arc<dyn CredentialStore>,
	/// Backend location and session entry points.
	pub config: Arc<SessionConfig>,
	/// Port notified when the session cannot be recovered.
	pub session_lost: Arc<dyn SessionLostHook>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	coordinator: Arc<RefreshCoordinator>,
}
impl<T> SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client over a caller-provided transport.
	pub fn with_transport(
		config: SessionConfig,
		store: Arc<dyn CredentialStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			config: Arc::new(config),
			session_lost: Arc::new(IgnoreSessionLost),
			refresh_metrics: Default::default(),
			coordinator: Default::default(),
		}
	}

	/// Sets or replaces the session-lost port.
	pub fn with_session_lost_hook(mut self, hook: impl 'static + SessionLostHook) -> Self {
		self.session_lost = Arc::new(hook);

		self
	}

	/// Returns `true` while a refresh call is outstanding.
	pub fn is_refreshing(&self) -> bool {
		self.coordinator.is_refreshing()
	}

	/// Number of calls currently parked behind the outstanding refresh.
	pub fn pending_refresh_waiters(&self) -> usize {
		self.coordinator.waiters()
	}

	/// Returns the stored credential pair, if any.
	pub async fn credentials(&self) -> Result<Option<CredentialPair>> {
		Ok(self.store.fetch().await?)
	}

	/// Stores a freshly issued pair (after login or registration).
	pub async fn establish(&self, pair: CredentialPair) -> Result<()> {
		self.store.save(pair).await?;
		self.coordinator.bump_generation();

		Ok(())
	}

	/// Clears the stored pair without notifying the session-lost port.
	pub async fn end_session(&self) -> Result<()> {
		Ok(self.store.clear().await?)
	}

	/// Sets the stored access credential as the request's bearer credential.
	///
	/// Leaves the request unauthenticated when the store is empty.
	pub async fn attach(&self, request: &mut ApiRequest) -> Result<()> {
		// Read the generation first: a rotation landing in between is then seen as stale and
		// replayed rather than refreshed a second time.
		request.set_generation(self.coordinator.generation());

		let pair = self.store.fetch().await?;

		request.set_bearer(pair.map(|pair| pair.access));

		Ok(())
	}

	/// Attaches credentials, dispatches `request`, and recovers from a 401 once.
	///
	/// Returns the response for 2xx statuses and [`Error::Api`] for every other status.
	/// Transport failures are returned untouched.
	pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Api;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut request = request;

				self.attach(&mut request).await?;

				let response = self.transport.dispatch(&request).await?;

				if response.is_unauthorized() && !request.is_retried() {
					return self.handle_unauthorized(request, response).await;
				}

				response.error_for_status()
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Dispatches `request` as is: no bearer credential, no refresh on 401.
	///
	/// Used for calls that establish a session (login, registration).
	pub async fn send_anonymous(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Auth;

		let span = CallSpan::new(KIND, "send_anonymous");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move { self.transport.dispatch(&request).await?.error_for_status() })
			.await;

		record_result(KIND, &result);

		result
	}

	/// Recovers from an authorization failure of `request`.
	///
	/// Responses other than an unretried 401 are converted to errors without touching the
	/// session. Otherwise the caller either waits for the outstanding refresh, replays with an
	/// already rotated credential, or leads a new refresh.
	pub async fn handle_unauthorized(
		&self,
		request: ApiRequest,
		response: ApiResponse,
	) -> Result<ApiResponse> {
		if !response.is_unauthorized() || request.is_retried() {
			return response.error_for_status();
		}

		match self.coordinator.admit(request.generation()) {
			Admission::Leader(in_flight) => self.lead_refresh(in_flight, request, response).await,
			Admission::Waiter(settlement) => {
				self.refresh_metrics.record_queued();
				obs::record_call_outcome(CallKind::Api, CallOutcome::Queued);
				obs::log_queued(self.coordinator.waiters());

				match settlement.await {
					Ok(Ok(access)) => self.replay(request, access).await,
					Ok(Err(cause)) => Err(Error::RefreshFailed(cause)),
					Err(_) => Err(Error::RefreshAbandoned),
				}
			},
			Admission::Rotated => match self.store.fetch().await? {
				Some(pair) => self.replay(request, pair.access).await,
				None => response.error_for_status(),
			},
		}
	}

	async fn lead_refresh(
		&self,
		in_flight: InFlight<'_>,
		request: ApiRequest,
		response: ApiResponse,
	) -> Result<ApiResponse> {
		let refresh = match self.store.fetch().await {
			Ok(Some(pair)) => pair.refresh,
			Ok(None) => {
				let cause = Arc::new(Error::from(ConfigError::MissingRefreshToken));

				self.drop_session(in_flight, &Err(cause), SessionLostReason::MissingRefreshToken)
					.await;

				return response.error_for_status();
			},
			Err(e) => {
				let cause = Arc::new(Error::from(e));

				in_flight.settle(&Err(cause.clone()), false);
				self.refresh_metrics.record_failure();

				return Err(Error::RefreshFailed(cause));
			},
		};

		self.refresh_metrics.record_attempt();

		let cause = match self.exchange_refresh(&refresh).await {
			Ok(pair) => match self.store.rotate(&refresh, pair.clone()).await {
				Ok(CompareAndSwapOutcome::Updated) => {
					let resumed = in_flight.settle(&Ok(pair.access.clone()), true);

					self.refresh_metrics.record_success();

					return self.replay_after(resumed, request, pair.access).await;
				},
				// A new login replaced the pair while the refresh was in flight; use it.
				Ok(CompareAndSwapOutcome::RefreshMismatch) => match self.store.fetch().await {
					Ok(Some(current)) => {
						let resumed = in_flight.settle(&Ok(current.access.clone()), false);

						self.refresh_metrics.record_success();

						return self.replay_after(resumed, request, current.access).await;
					},
					Ok(None) => Arc::new(Error::SessionEnded),
					Err(e) => Arc::new(Error::from(e)),
				},
				// The host logged out while the refresh was in flight; do not resurrect it.
				Ok(CompareAndSwapOutcome::Missing) => {
					let cause = Arc::new(Error::SessionEnded);

					in_flight.settle(&Err(cause.clone()), false);
					self.refresh_metrics.record_failure();

					return Err(Error::RefreshFailed(cause));
				},
				Err(e) => Arc::new(Error::from(e)),
			},
			Err(e) => Arc::new(e),
		};

		self.drop_session(in_flight, &Err(cause.clone()), SessionLostReason::RefreshFailed).await;

		Err(Error::RefreshFailed(cause))
	}

	/// Clears the store, fails every waiter, and notifies the session-lost port.
	///
	/// The store is cleared before the in-flight flag drops, so no later caller can pick up the
	/// refresh credential that just failed.
	async fn drop_session(
		&self,
		in_flight: InFlight<'_>,
		settlement: &Settlement,
		reason: SessionLostReason,
	) {
		if let Err(e) = self.store.clear().await {
			#[cfg(feature = "tracing")]
			tracing::error!(error = %e, "failed to clear credentials after losing the session");
			#[cfg(not(feature = "tracing"))]
			let _ = e;
		}

		in_flight.settle(settlement, false);
		self.refresh_metrics.record_failure();
		obs::log_session_lost(reason, &self.config.login_path);
		self.session_lost
			.on_session_lost(SessionLost { login_path: self.config.login_path.clone(), reason });
	}

	/// Exchanges `refresh` for a new pair without attaching a bearer credential.
	async fn exchange_refresh(&self, refresh: &TokenSecret) -> Result<CredentialPair> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "exchange_refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = ApiRequest::post(self.config.refresh_path.as_str())
					.json(&RefreshTokenRequest { refresh_token: refresh.clone() })?;
				let response = self.transport.dispatch(&request).await?.error_for_status()?;

				Ok(response.json::<AuthResponse>()?.credentials())
			})
			.await;

		record_result(KIND, &result);

		result
	}

	/// Replays the leader's call once the `resumed` queued callers had a chance to go first.
	async fn replay_after(
		&self,
		resumed: usize,
		request: ApiRequest,
		access: TokenSecret,
	) -> Result<ApiResponse> {
		if resumed > 0 {
			tokio::task::yield_now().await;
		}

		self.replay(request, access).await
	}

	async fn replay(&self, mut request: ApiRequest, access: TokenSecret) -> Result<ApiResponse> {
		request.mark_retried();
		request.set_bearer(Some(access));
		obs::record_call_outcome(CallKind::Api, CallOutcome::Replayed);

		self.transport.dispatch(&request).await?.error_for_status()
	}
}
#[cfg(feature = "reqwest")]
impl SessionClient<ReqwestTransport> {
	/// Creates a client that provisions its own reqwest transport from `config`.
	pub fn new(config: SessionConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, store, transport))
	}
}
impl<T> Clone for SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			session_lost: self.session_lost.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			coordinator: self.coordinator.clone(),
		}
	}
}
impl<T> Debug for SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("refreshing", &self.is_refreshing())
			.field("pending_refresh_waiters", &self.pending_refresh_waiters())
			.finish()
	}
}

fn record_result<V>(kind: CallKind, result: &Result<V>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}
