//! Access/refresh credential pair persisted by credential stores.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// The two credentials that make up a storefront session.
///
/// Stores hold a full pair or nothing at all, so there is no way to represent an access
/// credential without its refresh companion.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
	/// Short-lived credential attached to every backend call.
	#[serde(rename = "access_token")]
	pub access: TokenSecret,
	/// Longer-lived credential exchanged for a new pair.
	#[serde(rename = "refresh_token")]
	pub refresh: TokenSecret,
}
impl CredentialPair {
	/// Builds a pair from raw credential strings.
	pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
		Self { access: TokenSecret::new(access), refresh: TokenSecret::new(refresh) }
	}
}
impl Debug for CredentialPair {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialPair")
			.field("access", &"<redacted>")
			.field("refresh", &"<redacted>")
			.finish()
	}
}
