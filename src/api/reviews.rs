//! Review endpoints: authoring, helpful votes, moderation, and rating statistics.

// self
use crate::{
	_prelude::*,
	catalog::{
		CreateReviewRequest, PageResponse, RatingStats, RejectReviewRequest,
		ReplyToReviewRequest, Review, ReviewFilter, UpdateReviewRequest,
	},
	http::{ApiRequest, ApiTransport},
	session::SessionClient,
};

/// Review collection endpoint.
pub const REVIEWS_PATH: &str = "/reviews";

impl<T> SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists reviews matching `filter`, one page at a time.
	pub async fn reviews(&self, filter: &ReviewFilter) -> Result<PageResponse<Review>> {
		self.send(ApiRequest::get(REVIEWS_PATH).query_params(filter)?).await?.json()
	}

	/// Fetches one review by id.
	pub async fn review(&self, id: u64) -> Result<Review> {
		self.get_json(&review_path(id, "")).await
	}

	/// Posts a review (customers). New reviews start out pending moderation.
	pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<Review> {
		self.post_json(REVIEWS_PATH, request).await
	}

	/// Rewrites one of the caller's reviews.
	pub async fn update_review(&self, id: u64, request: &UpdateReviewRequest) -> Result<Review> {
		self.put_json(&review_path(id, ""), request).await
	}

	/// Deletes a review.
	pub async fn delete_review(&self, id: u64) -> Result<()> {
		self.delete(&review_path(id, "")).await
	}

	/// Votes a review helpful and returns the updated review.
	pub async fn mark_helpful(&self, id: u64) -> Result<Review> {
		self.send(ApiRequest::post(review_path(id, "/helpful"))).await?.json()
	}

	/// Withdraws a helpful vote and returns the updated review.
	pub async fn unmark_helpful(&self, id: u64) -> Result<Review> {
		self.send(ApiRequest::delete(review_path(id, "/helpful"))).await?.json()
	}

	/// Publishes a pending review (moderators).
	pub async fn approve_review(&self, id: u64) -> Result<Review> {
		self.send(ApiRequest::post(review_path(id, "/approve"))).await?.json()
	}

	/// Refuses a pending review with a reason shown to its author (moderators).
	pub async fn reject_review(&self, id: u64, reason: &str) -> Result<Review> {
		self.post_json(&review_path(id, "/reject"), &RejectReviewRequest { reason: reason.into() })
			.await
	}

	/// Attaches the merchant reply to a review (sellers).
	pub async fn reply_to_review(&self, id: u64, reply: &str) -> Result<Review> {
		self.post_json(&review_path(id, "/reply"), &ReplyToReviewRequest { reply: reply.into() })
			.await
	}

	/// Rating summary of one product.
	pub async fn rating_stats(&self, product_id: u64) -> Result<RatingStats> {
		self.get_json(&format!("{REVIEWS_PATH}/products/{product_id}/stats")).await
	}
}

fn review_path(id: u64, action: &str) -> String {
	format!("{REVIEWS_PATH}/{id}{action}")
}
