//! Product reviews, moderation bodies, and rating statistics.

// self
use crate::_prelude::*;

/// Moderation state of a review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
	/// Awaiting moderation.
	Pending,
	/// Published.
	Approved,
	/// Refused by a moderator.
	Rejected,
}

/// Image attached to a review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewImage {
	/// Backend identifier.
	pub id: u64,
	/// Image location.
	pub image_url: String,
	/// Sort key.
	pub display_order: i32,
}

/// Review as returned by the review endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
	/// Backend identifier.
	pub id: u64,
	/// Reviewed product.
	pub product_id: u64,
	/// Reviewed product name.
	#[serde(default)]
	pub product_name: String,
	/// Author.
	pub user_id: u64,
	/// Author display name.
	#[serde(default)]
	pub user_name: String,
	/// Author avatar.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_avatar_url: Option<String>,
	/// Rating from 1 to 5.
	pub rating: u8,
	/// Headline.
	#[serde(default)]
	pub title: String,
	/// Body text.
	#[serde(default)]
	pub comment: String,
	/// Attached images.
	#[serde(default)]
	pub images: Vec<ReviewImage>,
	/// Whether the author bought the product.
	#[serde(default)]
	pub is_verified_purchase: bool,
	/// Moderation state.
	pub status: ReviewStatus,
	/// Helpful votes.
	#[serde(default)]
	pub helpful_count: u64,
	/// Whether the signed-in viewer voted helpful.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_helpful_by_current_user: Option<bool>,
	/// Merchant reply.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seller_reply: Option<String>,
	/// Merchant reply timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seller_replied_at: Option<String>,
	/// Creation timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	/// Last update timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}

/// Image entry of a review body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewImage {
	/// Image location.
	pub image_url: String,
	/// Sort key.
	pub display_order: i32,
}

/// Body of `POST /reviews` (customers).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
	/// Reviewed product.
	pub product_id: u64,
	/// Rating from 1 to 5.
	pub rating: u8,
	/// Headline.
	pub title: String,
	/// Body text.
	pub comment: String,
	/// Attached images.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub images: Option<Vec<NewReviewImage>>,
}

/// Body of `PUT /reviews/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
	/// Rating from 1 to 5.
	pub rating: u8,
	/// Headline.
	pub title: String,
	/// Body text.
	pub comment: String,
	/// Attached images.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub images: Option<Vec<NewReviewImage>>,
}

/// Query parameters of the review listing endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
	/// Restrict to one product.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub product_id: Option<u64>,
	/// Restrict to one author.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<u64>,
	/// Restrict to one rating.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rating: Option<u8>,
	/// Restrict to one moderation state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ReviewStatus>,
	/// Restrict to verified purchases.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_verified_purchase: Option<bool>,
	/// Zero-based page index.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	/// Page size.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub size: Option<u32>,
	/// Sort expression such as `createdAt,desc`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sort: Option<String>,
}

/// Body of `POST /reviews/{id}/reject`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectReviewRequest {
	/// Reason shown to the author.
	pub reason: String,
}

/// Body of `POST /reviews/{id}/reply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyToReviewRequest {
	/// Merchant reply text.
	pub reply: String,
}

/// Rating summary of one product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
	/// Mean rating.
	pub average_rating: f64,
	/// Review count.
	pub total_reviews: u64,
	/// Review count per star rating.
	#[serde(default)]
	pub rating_distribution: BTreeMap<u8, u64>,
}
impl RatingStats {
	/// Share of reviews with `stars`, in `0.0..=1.0`.
	pub fn share(&self, stars: u8) -> f64 {
		if self.total_reviews == 0 {
			return 0.0;
		}

		self.rating_distribution.get(&stars).copied().unwrap_or_default() as f64
			/ self.total_reviews as f64
	}
}
