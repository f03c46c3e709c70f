//! Thread-safe in-memory [`CredentialStore`] for tests, demos, and short-lived processes.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	store::{CompareAndSwapOutcome, CredentialStore, StoreFuture, swap_if_refresh_matches},
};

/// Keeps the credential pair in process memory; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<RwLock<Option<CredentialPair>>>);
impl MemoryStore {
	/// Creates a store already holding `pair`.
	pub fn with_credentials(pair: CredentialPair) -> Self {
		Self(Arc::new(RwLock::new(Some(pair))))
	}

	/// Returns a copy of the stored pair without going through the async contract.
	pub fn snapshot(&self) -> Option<CredentialPair> {
		self.0.read().clone()
	}
}
impl CredentialStore for MemoryStore {
	fn fetch(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(pair);

			Ok(())
		})
	}

	fn rotate<'a>(
		&'a self,
		expected_refresh: &'a TokenSecret,
		replacement: CredentialPair,
	) -> StoreFuture<'a, CompareAndSwapOutcome> {
		let slot = self.0.clone();

		Box::pin(async move {
			Ok(swap_if_refresh_matches(&mut slot.write(), expected_refresh, replacement))
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			slot.write().take();

			Ok(())
		})
	}
}
