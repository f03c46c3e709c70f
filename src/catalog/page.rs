//! Paged listings returned by the storefront backend.

// self
use crate::_prelude::*;

/// One page of a listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
	/// Items on this page.
	pub content: Vec<T>,
	/// Zero-based page index.
	pub page_number: u32,
	/// Requested page size.
	pub page_size: u32,
	/// Item count across every page.
	pub total_elements: u64,
	/// Page count.
	pub total_pages: u32,
	/// Whether this is the final page.
	pub last: bool,
}
impl<T> PageResponse<T> {
	/// Index of the following page, if there is one.
	pub fn next_page(&self) -> Option<u32> {
		if self.last { None } else { Some(self.page_number + 1) }
	}
}
