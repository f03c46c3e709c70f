#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use storefront_session::{
	_preludet::*,
	catalog::{
		CreateProductRequest, CreateReviewRequest, NewProductVariant, ProductFilter, ProductStatus,
		ReviewFilter, ReviewStatus, UpdateProductRequest,
	},
};

fn product_json(id: u64, slug: &str) -> Value {
	json!({
		"id": id,
		"name": "Red Shoes",
		"slug": slug,
		"description": "Comfortable.",
		"categoryId": 3,
		"categoryName": "Shoes",
		"sellerId": 9,
		"sellerName": "Shoe Shop",
		"status": "ACTIVE",
		"averageRating": 4.5,
		"totalReviews": 2,
		"totalSold": 40,
		"images": [],
		"variants": [
			{ "id": 5, "sku": "RS-42", "name": "42", "price": 59.9, "stockQuantity": 3,
			  "reservedQuantity": 0, "soldQuantity": 40, "attributes": { "size": "42" },
			  "isActive": true }
		],
		"createdAt": "2026-01-02T10:00:00",
		"updatedAt": "2026-01-03T10:00:00"
	})
}

fn review_json(id: u64, status: &str, helpful: u64) -> Value {
	json!({
		"id": id,
		"productId": 12,
		"productName": "Red Shoes",
		"userId": 30,
		"userName": "Ada",
		"rating": 5,
		"title": "Great",
		"comment": "Fits well.",
		"images": [],
		"isVerifiedPurchase": true,
		"status": status,
		"helpfulCount": helpful
	})
}

fn page_json(content: Vec<Value>, page_number: u32, last: bool) -> Value {
	json!({
		"content": content,
		"pageNumber": page_number,
		"pageSize": 20,
		"totalElements": 21,
		"totalPages": 2,
		"last": last
	})
}

#[tokio::test]
async fn product_listing_sends_filter_as_query_and_decodes_page() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_session(&server.url("/api"), None);
	let listing = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/products")
				.query_param("categoryId", "3")
				.query_param("minPrice", "10.5")
				.query_param("status", "ACTIVE")
				.query_param("page", "1")
				.query_param("sort", "createdAt,desc");
			then.status(200).json_body(page_json(vec![product_json(12, "red-shoes")], 1, true));
		})
		.await;
	let page = client
		.list_products(&ProductFilter {
			category_id: Some(3),
			min_price: Some(10.5),
			status: Some(ProductStatus::Active),
			page: Some(1),
			sort: Some("createdAt,desc".into()),
			..Default::default()
		})
		.await
		.expect("Product listing should load.");

	listing.assert_async().await;

	assert_eq!(page.total_elements, 21);
	assert_eq!(page.next_page(), None);
	assert_eq!(page.content[0].slug, "red-shoes");
	assert_eq!(page.content[0].min_price(), Some(59.9));
}

#[tokio::test]
async fn search_lookup_and_categories_hit_their_endpoints() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_session(&server.url("/api"), None);
	let search = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/products/search")
				.query_param("search", "red shoes")
				.query_param("size", "5");
			then.status(200).json_body(page_json(vec![product_json(12, "red-shoes")], 0, false));
		})
		.await;
	let by_id = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products/12");
			then.status(200).json_body(product_json(12, "red-shoes"));
		})
		.await;
	let by_slug = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products/slug/red-shoes");
			then.status(200).json_body(product_json(12, "red-shoes"));
		})
		.await;
	let categories = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories");
			then.status(200).json_body(json!([
				{ "id": 3, "name": "Shoes", "slug": "shoes", "displayOrder": 1, "isActive": true },
				{ "id": 4, "name": "Boots", "slug": "boots", "parentId": 3, "displayOrder": 2,
				  "isActive": true }
			]));
		})
		.await;
	let missing = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/categories/99");
			then.status(404).json_body(json!({ "message": "Category not found" }));
		})
		.await;
	let page = client
		.search_products(
			"red shoes",
			&ProductFilter { search: Some("ignored".into()), size: Some(5), ..Default::default() },
		)
		.await
		.expect("Search should succeed.");

	assert_eq!(page.next_page(), Some(1));
	assert_eq!(client.product(12).await.expect("Product should load.").id, 12);
	assert_eq!(
		client.product_by_slug("red-shoes").await.expect("Product should load by slug.").id,
		12
	);

	let tree = client.categories().await.expect("Categories should load.");

	assert_eq!(tree.len(), 2);
	assert_eq!(tree[1].parent_id, Some(3));

	let err = client.category(99).await.expect_err("Unknown category should fail.");

	assert_eq!(err.status(), Some(404));
	assert_eq!(err.describe(), "Category not found");

	search.assert_async().await;
	by_id.assert_async().await;
	by_slug.assert_async().await;
	categories.assert_async().await;
	missing.assert_async().await;
}

#[tokio::test]
async fn seller_product_writes_carry_the_bearer_credential() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/products")
				.header("authorization", "Bearer A1")
				.json_body(json!({
					"name": "Red Shoes",
					"description": "Comfortable.",
					"categoryId": 3,
					"status": "ACTIVE",
					"images": [],
					"variants": [
						{ "sku": "RS-42", "name": "42", "price": 59.9, "stockQuantity": 3,
						  "attributes": {} }
					]
				}));
			then.status(201).json_body(product_json(12, "red-shoes"));
		})
		.await;
	let update = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/products/12")
				.header("authorization", "Bearer A1")
				.json_body(json!({ "status": "OUT_OF_STOCK" }));
			then.status(200).json_body(product_json(12, "red-shoes"));
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/products/12").header("authorization", "Bearer A1");
			then.status(204);
		})
		.await;
	let created = client
		.create_product(&CreateProductRequest {
			name: "Red Shoes".into(),
			description: "Comfortable.".into(),
			short_description: None,
			category_id: 3,
			status: ProductStatus::Active,
			images: Vec::new(),
			variants: vec![NewProductVariant {
				sku: "RS-42".into(),
				name: "42".into(),
				price: 59.9,
				stock_quantity: 3,
				..Default::default()
			}],
		})
		.await
		.expect("Product creation should succeed.");

	assert_eq!(created.id, 12);

	client
		.update_product(
			12,
			&UpdateProductRequest { status: Some(ProductStatus::OutOfStock), ..Default::default() },
		)
		.await
		.expect("Product update should succeed.");
	client.delete_product(12).await.expect("Product deletion should succeed.");

	create.assert_async().await;
	update.assert_async().await;
	delete.assert_async().await;
}

#[tokio::test]
async fn review_listing_votes_and_moderation_use_review_routes() {
	let server = MockServer::start_async().await;
	let (client, _, _) = build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let listing = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/reviews")
				.query_param("productId", "12")
				.query_param("status", "PENDING")
				.query_param("isVerifiedPurchase", "true");
			then.status(200).json_body(page_json(vec![review_json(7, "PENDING", 0)], 0, true));
		})
		.await;
	let helpful = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/reviews/7/helpful");
			then.status(200).json_body(review_json(7, "APPROVED", 1));
		})
		.await;
	let unhelpful = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/reviews/7/helpful");
			then.status(200).json_body(review_json(7, "APPROVED", 0));
		})
		.await;
	let approve = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/reviews/7/approve");
			then.status(200).json_body(review_json(7, "APPROVED", 0));
		})
		.await;
	let reject = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/reviews/8/reject")
				.json_body(json!({ "reason": "Off topic" }));
			then.status(200).json_body(review_json(8, "REJECTED", 0));
		})
		.await;
	let reply = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/reviews/7/reply")
				.json_body(json!({ "reply": "Thanks!" }));
			then.status(200).json_body(review_json(7, "APPROVED", 0));
		})
		.await;
	let stats = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reviews/products/12/stats");
			then.status(200).json_body(json!({
				"averageRating": 4.5,
				"totalReviews": 2,
				"ratingDistribution": { "5": 1, "4": 1 }
			}));
		})
		.await;
	let page = client
		.reviews(&ReviewFilter {
			product_id: Some(12),
			status: Some(ReviewStatus::Pending),
			is_verified_purchase: Some(true),
			..Default::default()
		})
		.await
		.expect("Review listing should load.");

	assert_eq!(page.content[0].status, ReviewStatus::Pending);
	assert_eq!(client.mark_helpful(7).await.expect("Vote should succeed.").helpful_count, 1);
	assert_eq!(client.unmark_helpful(7).await.expect("Unvote should succeed.").helpful_count, 0);
	assert_eq!(
		client.approve_review(7).await.expect("Approval should succeed.").status,
		ReviewStatus::Approved
	);
	assert_eq!(
		client.reject_review(8, "Off topic").await.expect("Rejection should succeed.").status,
		ReviewStatus::Rejected
	);

	client.reply_to_review(7, "Thanks!").await.expect("Reply should succeed.");

	let stats_body = client.rating_stats(12).await.expect("Rating stats should load.");

	assert_eq!(stats_body.rating_distribution.get(&5), Some(&1));
	assert_eq!(stats_body.share(4), 0.5);

	listing.assert_async().await;
	helpful.assert_async().await;
	unhelpful.assert_async().await;
	approve.assert_async().await;
	reject.assert_async().await;
	reply.assert_async().await;
	stats.assert_async().await;
}

#[tokio::test]
async fn review_write_recovers_from_expired_access() {
	let server = MockServer::start_async().await;
	let (client, store, hook) =
		build_reqwest_test_session(&server.url("/api"), Some(pair("A1", "R1")));
	let expired = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/reviews").header("authorization", "Bearer A1");
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
	let created = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/reviews")
				.header("authorization", "Bearer A2")
				.json_body(json!({
					"productId": 12,
					"rating": 5,
					"title": "Great",
					"comment": "Fits well."
				}));
			then.status(201).json_body(review_json(9, "PENDING", 0));
		})
		.await;
	let review = client
		.create_review(&CreateReviewRequest {
			product_id: 12,
			rating: 5,
			title: "Great".into(),
			comment: "Fits well.".into(),
			images: None,
		})
		.await
		.expect("Review creation should recover after refresh.");

	assert_eq!(review.id, 9);
	assert_eq!(review.status, ReviewStatus::Pending);
	assert_eq!(store.snapshot(), Some(pair("A2", "R2")));
	assert!(hook.events().is_empty());

	expired.assert_async().await;
	refresh.assert_async().await;
	created.assert_async().await;
}
