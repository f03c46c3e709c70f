//! Auth endpoints: login, registration, logout, and profile management.

// self
use crate::{
	_prelude::*,
	auth::{
		AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
		User,
	},
	http::{ApiRequest, ApiTransport},
	obs::{CallKind, CallSpan},
	session::SessionClient,
};

/// Login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/auth/register";
/// Logout endpoint.
pub const LOGOUT_PATH: &str = "/auth/logout";
/// Current-user endpoint.
pub const ME_PATH: &str = "/auth/me";
/// Profile update endpoint.
pub const PROFILE_PATH: &str = "/auth/profile";
/// Password change endpoint.
pub const CHANGE_PASSWORD_PATH: &str = "/auth/change-password";

impl<T> SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Signs in and stores the issued credential pair.
	///
	/// The call is sent without a bearer credential and a 401 here means bad credentials, so it
	/// never triggers a refresh.
	pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
		self.open_session(ApiRequest::post(LOGIN_PATH).json(request)?, "login").await
	}

	/// Registers a customer account and stores the issued credential pair.
	pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
		self.open_session(ApiRequest::post(REGISTER_PATH).json(request)?, "register").await
	}

	/// Tells the backend to end the session, then clears the stored pair whatever the outcome.
	///
	/// Without a stored pair there is no session to end and the backend is not called.
	pub async fn logout(&self) -> Result<()> {
		if self.credentials().await?.is_none() {
			return Ok(());
		}

		let span = CallSpan::new(CallKind::Auth, "logout");
		let result = span.instrument(self.send(ApiRequest::post(LOGOUT_PATH))).await;

		self.end_session().await?;

		result.map(|_| ())
	}

	/// Fetches the signed-in user's profile.
	pub async fn current_user(&self) -> Result<User> {
		self.get_json(ME_PATH).await
	}

	/// Updates profile fields and returns the updated profile.
	pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
		self.put_json(PROFILE_PATH, request).await
	}

	/// Changes the signed-in user's password.
	pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
		self.send(ApiRequest::post(CHANGE_PASSWORD_PATH).json(request)?).await?;

		Ok(())
	}

	async fn open_session(&self, request: ApiRequest, stage: &'static str) -> Result<AuthResponse> {
		let span = CallSpan::new(CallKind::Auth, stage);

		span.instrument(async move {
			let response: AuthResponse = self.send_anonymous(request).await?.json()?;

			self.establish(response.credentials()).await?;

			Ok(response)
		})
		.await
	}
}
