//! Runs a session client against an in-process storefront backend.
//!
//! 1. Implement [`ApiTransport`] for any HTTP stack (here, a fake backend living in memory).
//! 2. Build a [`SessionClient`] over it with a [`MemoryStore`] and a session-lost hook.
//! 3. Log in, let the backend expire the access credential, and watch the call recover.
//! 4. Revoke the refresh credential and watch the hook fire.

// std
use std::sync::{
	Arc,
	atomic::{AtomicBool, AtomicU32, Ordering},
};
// crates.io
use color_eyre::Result;
use serde_json::{Value, json};
use url::Url;
// self
use storefront_session::{
	auth::{LoginRequest, RefreshTokenRequest},
	config::SessionConfig,
	ext::SessionLost,
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFuture},
	session::SessionClient,
	store::{CredentialStore, MemoryStore},
};

/// Issues `A{n}`/`R{n}` pairs and only accepts the newest access credential.
#[derive(Default)]
struct ShopBackend {
	issued: AtomicU32,
	revoked: AtomicBool,
}
impl ShopBackend {
	fn issue(&self) -> Value {
		let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

		json!({ "accessToken": format!("A{n}"), "refreshToken": format!("R{n}"), "tokenType": "Bearer" })
	}

	fn expire_access(&self) {
		self.issued.fetch_add(1, Ordering::SeqCst);
	}

	fn answer(&self, request: &ApiRequest) -> ApiResponse {
		match request.path.as_str() {
			"/auth/login" => ApiResponse::with_json(200, &self.issue()),
			"/auth/refresh" => {
				let presented = request
					.body
					.clone()
					.and_then(|body| serde_json::from_value::<RefreshTokenRequest>(body).ok());

				match presented {
					Some(_) if !self.revoked.load(Ordering::SeqCst) =>
						ApiResponse::with_json(200, &self.issue()),
					_ => ApiResponse::with_json(401, &json!({ "message": "Refresh token revoked" })),
				}
			},
			path => {
				let current = format!("A{}", self.issued.load(Ordering::SeqCst));

				if request.bearer().map(|secret| secret.expose()) == Some(current.as_str()) {
					ApiResponse::with_json(200, &json!({ "path": path, "items": [] }))
				} else {
					ApiResponse::with_json(401, &json!({ "error": "Token expired" }))
				}
			},
		}
	}
}
impl ApiTransport for ShopBackend {
	fn dispatch<'a>(&'a self, request: &'a ApiRequest) -> TransportFuture<'a> {
		Box::pin(async move { Ok(self.answer(request)) })
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let backend = Arc::new(ShopBackend::default());
	let store: Arc<dyn CredentialStore> = Arc::new(MemoryStore::default());
	let config = SessionConfig::builder(Url::parse("https://shop.example.com/api")?).build()?;
	let client = SessionClient::<ShopBackend>::with_transport(config, store, backend.clone())
		.with_session_lost_hook(|event: SessionLost| {
			println!("Session lost ({}); redirecting to {}.", event.reason, event.login_path);
		});

	client.login(&LoginRequest::new("ada@shop.example.com", "correct horse")).await?;
	backend.expire_access();

	let cart: Value = client.get_json("/cart").await?;

	println!("Cart loaded after a transparent refresh: {cart}.");
	println!(
		"Refresh attempts: {}, successes: {}.",
		client.refresh_metrics.attempts(),
		client.refresh_metrics.successes()
	);

	backend.revoked.store(true, Ordering::SeqCst);
	backend.expire_access();

	match client.get_json::<Value>("/orders").await {
		Ok(_) => println!("Unexpected success with a revoked refresh credential."),
		Err(e) => println!("Orders call failed: {}.", e.describe()),
	}

	println!("Stored credentials after the failure: {:?}.", client.credentials().await?);

	Ok(())
}
