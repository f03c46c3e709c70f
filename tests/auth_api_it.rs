#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use storefront_session::{
	_preludet::*,
	auth::{ChangePasswordRequest, LoginRequest, UpdateProfileRequest, UserRole},
};

fn seller_json() -> serde_json::Value {
	json!({
		"id": "u-42",
		"email": "seller@shop.test",
		"fullName": "Grace Seller",
		"roles": ["ROLE_SELLER"],
		"emailVerified": true
	})
}

#[tokio::test]
async fn login_stores_issued_pair_and_returns_user() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_session(&server.url("/api"), None);
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login").json_body(json!({
				"email": "seller@shop.test",
				"password": "hunter2",
				"expectedRole": "ROLE_SELLER"
			}));
			then.status(200).json_body(json!({
				"accessToken": "A1",
				"refreshToken": "R1",
				"tokenType": "Bearer",
				"user": seller_json()
			}));
		})
		.await;
	let response = client
		.login(&LoginRequest::new("seller@shop.test", "hunter2").expecting(UserRole::Seller))
		.await
		.expect("Login should succeed.");

	login.assert_async().await;

	let user = response.user.expect("Login response should carry the user.");

	assert_eq!(user.primary_role(), Some(UserRole::Seller));
	assert_eq!(store.snapshot(), Some(pair("A1", "R1")));
}

#[tokio::test]
async fn rejected_login_never_refreshes_or_reports_session_loss() {
	let server = MockServer::start_async().await;
	let (client, store, hook) = build_reqwest_test_session(&server.url("/api"), None);
	let _login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(401).json_body(json!({ "message": "Invalid email or password" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200);
		})
		.await;
	let err = client
		.login(&LoginRequest::new("seller@shop.test", "wrong"))
		.await
		.expect_err("Bad credentials should fail.");

	assert!(err.is_unauthorized());
	assert_eq!(err.describe(), "Invalid email or password");
	assert_eq!(refresh.hits_async().await, 0);
	assert_eq!(store.snapshot(), None);
	assert!(hook.events().is_empty());
}

#[tokio::test]
async fn logout_clears_credentials_even_when_backend_fails() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/logout").header("authorization", "Bearer A1");
			then.status(500);
		})
		.await;
	let err = client.logout().await.expect_err("Backend failure should still be reported.");

	logout.assert_async().await;

	assert_eq!(err.status(), Some(500));
	assert_eq!(err.describe(), "Internal server error. Please try again later.");
	assert_eq!(store.snapshot(), None);
}

#[tokio::test]
async fn logout_without_stored_pair_skips_the_backend() {
	let server = MockServer::start_async().await;
	let (client, store, hook) = build_reqwest_test_session(&server.url("/api"), None);
	let logout = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/logout");
			then.status(401).json_body(json!({ "error": "Unauthorized" }));
		})
		.await;

	client.logout().await.expect("Logout with no session should succeed.");

	assert_eq!(logout.hits_async().await, 0);
	assert_eq!(store.snapshot(), None);
	assert!(hook.events().is_empty());
}

#[tokio::test]
async fn profile_calls_carry_the_bearer_credential() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/auth/me").header("authorization", "Bearer A1");
			then.status(200).json_body(seller_json());
		})
		.await;
	let profile = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/auth/profile")
				.header("authorization", "Bearer A1")
				.json_body(json!({ "fullName": "Grace Hopper" }));
			then.status(200).json_body(json!({
				"id": "u-42",
				"email": "seller@shop.test",
				"fullName": "Grace Hopper",
				"roles": ["ROLE_SELLER"],
				"emailVerified": true
			}));
		})
		.await;
	let password = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/change-password")
				.json_body(json!({ "oldPassword": "hunter2", "newPassword": "correct horse" }));
			then.status(204);
		})
		.await;
	let user = client.current_user().await.expect("Current user should load.");

	assert_eq!(user.email, "seller@shop.test");

	let updated = client
		.update_profile(&UpdateProfileRequest {
			full_name: Some("Grace Hopper".into()),
			..Default::default()
		})
		.await
		.expect("Profile update should succeed.");

	assert_eq!(updated.full_name, "Grace Hopper");

	client
		.change_password(&ChangePasswordRequest {
			old_password: "hunter2".into(),
			new_password: "correct horse".into(),
		})
		.await
		.expect("Password change should succeed.");

	me.assert_async().await;
	profile.assert_async().await;
	password.assert_async().await;
}
