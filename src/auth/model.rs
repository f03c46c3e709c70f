//! JSON wire models for the storefront auth endpoints.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret, UserId, UserRole},
};

/// Profile of the signed-in user as returned by `/auth/me` and the login endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	/// Backend identifier.
	pub id: UserId,
	/// Sign-in email.
	pub email: String,
	/// Display name.
	pub full_name: String,
	/// Optional avatar location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	/// Raw role names; unknown names are preserved.
	#[serde(default)]
	pub roles: Vec<String>,
	/// Whether the email address has been verified.
	#[serde(default)]
	pub email_verified: bool,
	/// Creation timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	/// Last update timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}
impl User {
	/// Storefront roles held by the user, skipping names this crate does not know.
	pub fn known_roles(&self) -> impl Iterator<Item = UserRole> + '_ {
		self.roles.iter().filter_map(|name| name.parse().ok())
	}

	/// Returns `true` if the user holds `role`.
	pub fn has_role(&self, role: UserRole) -> bool {
		self.known_roles().any(|held| held == role)
	}

	/// First held role in [`UserRole::ALL`] order.
	pub fn primary_role(&self) -> Option<UserRole> {
		UserRole::ALL.into_iter().find(|role| self.has_role(*role))
	}
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
	/// Sign-in email.
	pub email: String,
	/// Plain-text password; redacted from debug output.
	pub password: String,
	/// Role the caller expects to sign in as (admin/seller/staff login pages).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expected_role: Option<UserRole>,
}
impl LoginRequest {
	/// Builds a login body without a role expectation.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into(), expected_role: None }
	}

	/// Restricts the login to accounts holding `role`.
	pub fn expecting(mut self, role: UserRole) -> Self {
		self.expected_role = Some(role);

		self
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("expected_role", &self.expected_role)
			.finish()
	}
}

/// Body of `POST /auth/register`; the backend assigns `ROLE_CUSTOMER`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	/// Sign-in email.
	pub email: String,
	/// Plain-text password; redacted from debug output.
	pub password: String,
	/// Display name.
	pub full_name: String,
	/// Optional phone number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("full_name", &self.full_name)
			.field("phone", &self.phone)
			.finish()
	}
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
	/// Refresh credential being exchanged.
	pub refresh_token: TokenSecret,
}

/// Response of the login, register, and refresh endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
	/// Newly issued access credential.
	pub access_token: TokenSecret,
	/// Newly issued refresh credential.
	pub refresh_token: TokenSecret,
	/// Token type label, normally `Bearer`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Signed-in user; the refresh endpoint may omit it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<User>,
}
impl AuthResponse {
	/// Extracts the credential pair to persist.
	pub fn credentials(&self) -> CredentialPair {
		CredentialPair { access: self.access_token.clone(), refresh: self.refresh_token.clone() }
	}
}

/// Body of `PUT /auth/profile`; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub full_name: Option<String>,
	/// New avatar location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
	/// New phone number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}

/// Body of `POST /auth/change-password`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
	/// Current password.
	pub old_password: String,
	/// Replacement password.
	pub new_password: String,
}
impl Debug for ChangePasswordRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ChangePasswordRequest(<redacted>)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn auth_response_decodes_camel_case_and_optional_user() {
		let body = r#"{"accessToken":"A2","refreshToken":"R2","tokenType":"Bearer"}"#;
		let response: AuthResponse =
			serde_json::from_str(body).expect("Refresh response should decode.");

		assert_eq!(response.credentials(), CredentialPair::new("A2", "R2"));
		assert!(response.user.is_none());
	}

	#[test]
	fn user_roles_tolerate_unknown_names() {
		let body = r#"{"id":"u-1","email":"a@shop.test","fullName":"Ada","roles":["ROLE_GUEST","ROLE_SELLER"],"emailVerified":true}"#;
		let user: User = serde_json::from_str(body).expect("User should decode.");

		assert_eq!(user.known_roles().collect::<Vec<_>>(), vec![UserRole::Seller]);
		assert_eq!(user.primary_role(), Some(UserRole::Seller));
		assert!(!user.has_role(UserRole::Admin));
	}

	#[test]
	fn login_request_serializes_expected_role_only_when_set() {
		let plain = serde_json::to_value(LoginRequest::new("a@shop.test", "pw"))
			.expect("Login body should serialize.");

		assert!(plain.get("expectedRole").is_none());

		let scoped = serde_json::to_value(
			LoginRequest::new("a@shop.test", "pw").expecting(UserRole::Admin),
		)
		.expect("Login body should serialize.");

		assert_eq!(scoped["expectedRole"], "ROLE_ADMIN");
		assert!(!format!("{:?}", LoginRequest::new("a@shop.test", "pw")).contains("pw\""));
	}
}
