//! Credential store contract and built-in backends.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
};

/// Name of the access credential slot.
pub const ACCESS_TOKEN_SLOT: &str = "access_token";
/// Name of the refresh credential slot.
pub const REFRESH_TOKEN_SLOT: &str = "refresh_token";

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistent home of the session's credential pair.
///
/// A store holds either a full [`CredentialPair`] or nothing; there is no operation that
/// writes one slot without the other.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the stored pair, if any.
	fn fetch(&self) -> StoreFuture<'_, Option<CredentialPair>>;

	/// Persists or replaces the pair.
	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()>;

	/// Replaces the pair only if the stored refresh credential still equals `expected_refresh`.
	fn rotate<'a>(
		&'a self,
		expected_refresh: &'a TokenSecret,
		replacement: CredentialPair,
	) -> StoreFuture<'a, CompareAndSwapOutcome>;

	/// Removes both credentials.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Result of a refresh-credential compare-and-swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareAndSwapOutcome {
	/// The refresh credential matched and the pair was replaced.
	Updated,
	/// A pair exists but carries a different refresh credential.
	RefreshMismatch,
	/// The store is empty.
	Missing,
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

pub(crate) fn swap_if_refresh_matches(
	slot: &mut Option<CredentialPair>,
	expected_refresh: &TokenSecret,
	replacement: CredentialPair,
) -> CompareAndSwapOutcome {
	match slot {
		Some(current) if &current.refresh == expected_refresh => {
			*current = replacement;

			CompareAndSwapOutcome::Updated
		},
		Some(_) => CompareAndSwapOutcome::RefreshMismatch,
		None => CompareAndSwapOutcome::Missing,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_session_error_with_source() {
		let store_error = StoreError::Backend { message: "disk full".into() };
		let err: Error = store_error.clone().into();

		assert!(matches!(err, Error::Storage(_)));
		assert!(err.to_string().contains("disk full"));

		let source =
			StdError::source(&err).expect("Session error should expose the store error as source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn swap_only_replaces_matching_refresh() {
		let mut slot = Some(CredentialPair::new("A1", "R1"));

		assert_eq!(
			swap_if_refresh_matches(&mut slot, &TokenSecret::new("R0"), CredentialPair::new("A2", "R2")),
			CompareAndSwapOutcome::RefreshMismatch
		);
		assert_eq!(slot, Some(CredentialPair::new("A1", "R1")));
		assert_eq!(
			swap_if_refresh_matches(&mut slot, &TokenSecret::new("R1"), CredentialPair::new("A2", "R2")),
			CompareAndSwapOutcome::Updated
		);
		assert_eq!(slot, Some(CredentialPair::new("A2", "R2")));

		let mut empty = None;

		assert_eq!(
			swap_if_refresh_matches(&mut empty, &TokenSecret::new("R1"), CredentialPair::new("A2", "R2")),
			CompareAndSwapOutcome::Missing
		);
		assert!(empty.is_none());
	}
}
