//! Storefront session client: bearer attachment, single-flight token refresh with queued
//! replays, the auth API calls, and role-based route guards for the storefront dashboards.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ext;
pub mod guard;
pub mod http;
pub mod obs;
pub mod session;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::CredentialPair,
		config::SessionConfig,
		ext::{SessionLost, SessionLostHook},
		http::ApiTransport,
		session::SessionClient,
		store::{CredentialStore, MemoryStore},
	};

	/// Session-lost hook that records every notification for later assertions.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingHook(Arc<Mutex<Vec<SessionLost>>>);
	impl RecordingHook {
		/// Returns every notification received so far.
		pub fn events(&self) -> Vec<SessionLost> {
			self.0.lock().clone()
		}
	}
	impl SessionLostHook for RecordingHook {
		fn on_session_lost(&self, event: SessionLost) {
			self.0.lock().push(event);
		}
	}

	/// Builds a configuration rooted at `base_url` with every other knob left at its default.
	pub fn test_config(base_url: &str) -> SessionConfig {
		SessionConfig::builder(Url::parse(base_url).expect("Test base URL should parse."))
			.build()
			.expect("Default test configuration should validate.")
	}

	/// Builds a credential pair fixture.
	pub fn pair(access: &str, refresh: &str) -> CredentialPair {
		CredentialPair::new(access, refresh)
	}

	/// Constructs a [`SessionClient`] over `transport` backed by an in-memory store (optionally
	/// seeded) and a recording session-lost hook.
	pub fn build_test_session<T>(
		config: SessionConfig,
		transport: impl Into<Arc<T>>,
		seed: Option<CredentialPair>,
	) -> (SessionClient<T>, Arc<MemoryStore>, RecordingHook)
	where
		T: ?Sized + ApiTransport,
	{
		let store_backend = Arc::new(match seed {
			Some(pair) => MemoryStore::with_credentials(pair),
			None => MemoryStore::default(),
		});
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let hook = RecordingHook::default();
		let client = SessionClient::with_transport(config, store, transport)
			.with_session_lost_hook(hook.clone());

		(client, store_backend, hook)
	}

	#[cfg(feature = "reqwest")]
	/// Constructs a reqwest-backed [`SessionClient`] for HTTP-level integration tests.
	pub fn build_reqwest_test_session(
		base_url: &str,
		seed: Option<CredentialPair>,
	) -> (crate::session::ReqwestSessionClient, Arc<MemoryStore>, RecordingHook) {
		let config = test_config(base_url);
		let transport = crate::http::ReqwestTransport::from_config(&config)
			.expect("Reqwest transport should build for tests.");

		build_test_session(config, transport, seed)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap, VecDeque},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
