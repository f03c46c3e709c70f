#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use storefront_session::{
	_preludet::*,
	config::SessionConfig,
	ext::SessionLostReason,
	http::{ApiRequest, ReqwestTransport},
};

#[tokio::test]
async fn expired_access_refreshes_over_http_and_replays() {
	let server = MockServer::start_async().await;
	let (client, store, hook) =
		build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/orders").header("authorization", "Bearer A1");
			then.status(401).json_body(json!({ "error": "Token expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh").json_body(json!({ "refreshToken": "R1" }));
			then.status(200).json_body(json!({
				"accessToken": "A2",
				"refreshToken": "R2",
				"tokenType": "Bearer"
			}));
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/orders").header("authorization", "Bearer A2");
			then.status(200).json_body(json!({ "content": [{ "id": 7 }], "totalElements": 1 }));
		})
		.await;
	let page = client.get_json::<Value>("/orders").await.expect("Orders call should recover.");

	expired.assert_async().await;
	refresh.assert_async().await;
	fresh.assert_async().await;

	assert_eq!(page["totalElements"], 1);
	assert_eq!(store.snapshot(), Some(pair("A2", "R2")));
	assert!(hook.events().is_empty());
}

#[tokio::test]
async fn rejected_refresh_clears_store_and_reports_login_path() {
	let server = MockServer::start_async().await;
	let (client, store, hook) =
		build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let _expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/cart");
			then.status(401);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).json_body(json!({ "message": "Refresh token revoked" }));
		})
		.await;
	let err = client.get_json::<Value>("/cart").await.expect_err("Revoked refresh should fail.");

	refresh.assert_async().await;

	assert!(matches!(err, Error::RefreshFailed(_)));
	assert_eq!(err.describe(), "Refresh token revoked");
	assert_eq!(store.snapshot(), None);

	let events = hook.events();

	assert_eq!(events.len(), 1);
	assert_eq!(events[0].login_path, "/login");
	assert_eq!(events[0].reason, SessionLostReason::RefreshFailed);
}

#[tokio::test]
async fn query_and_default_headers_reach_the_backend() {
	let server = MockServer::start_async().await;
	let config = SessionConfig::builder(
		Url::parse(&server.url("/api")).expect("Mock server URL should parse."),
	)
	.default_header("x-storefront", "web")
	.build()
	.expect("Configuration should validate.");
	let transport = ReqwestTransport::from_config(&config).expect("Transport should build.");
	let (client, _, _) =
		build_test_session::<ReqwestTransport>(config, transport, Some(pair("A1", "R1")));
	let reviews = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/reviews")
				.query_param("productId", "12")
				.header("authorization", "Bearer A1")
				.header("x-storefront", "web");
			then.status(200).json_body(json!([]));
		})
		.await;

	client
		.send(ApiRequest::get("/reviews").query("productId", 12))
		.await
		.expect("Reviews call should succeed.");
	reviews.assert_async().await;
}
