//! Catalogue endpoints: products and categories.

// self
use crate::{
	_prelude::*,
	catalog::{
		Category, CreateProductRequest, PageResponse, Product, ProductFilter, UpdateProductRequest,
	},
	http::{ApiRequest, ApiTransport},
	session::SessionClient,
};

/// Product collection endpoint.
pub const PRODUCTS_PATH: &str = "/products";
/// Product search endpoint.
pub const PRODUCT_SEARCH_PATH: &str = "/products/search";
/// Category collection endpoint.
pub const CATEGORIES_PATH: &str = "/categories";

impl<T> SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Lists products matching `filter`, one page at a time.
	pub async fn list_products(&self, filter: &ProductFilter) -> Result<PageResponse<Product>> {
		self.send(ApiRequest::get(PRODUCTS_PATH).query_params(filter)?).await?.json()
	}

	/// Fetches one product by id.
	pub async fn product(&self, id: u64) -> Result<Product> {
		self.get_json(&format!("{PRODUCTS_PATH}/{id}")).await
	}

	/// Fetches one product by its URL slug.
	pub async fn product_by_slug(&self, slug: &str) -> Result<Product> {
		self.get_json(&format!("{PRODUCTS_PATH}/slug/{slug}")).await
	}

	/// Creates a product (sellers).
	pub async fn create_product(&self, request: &CreateProductRequest) -> Result<Product> {
		self.post_json(PRODUCTS_PATH, request).await
	}

	/// Updates the fields set in `request` and returns the stored product.
	pub async fn update_product(&self, id: u64, request: &UpdateProductRequest) -> Result<Product> {
		self.put_json(&format!("{PRODUCTS_PATH}/{id}"), request).await
	}

	/// Deletes a product.
	pub async fn delete_product(&self, id: u64) -> Result<()> {
		self.delete(&format!("{PRODUCTS_PATH}/{id}")).await
	}

	/// Lists every category.
	pub async fn categories(&self) -> Result<Vec<Category>> {
		self.get_json(CATEGORIES_PATH).await
	}

	/// Fetches one category by id.
	pub async fn category(&self, id: u64) -> Result<Category> {
		self.get_json(&format!("{CATEGORIES_PATH}/{id}")).await
	}

	/// Full-text product search.
	///
	/// `query` replaces any `search` already set on `filter`.
	pub async fn search_products(
		&self,
		query: &str,
		filter: &ProductFilter,
	) -> Result<PageResponse<Product>> {
		let filter = ProductFilter { search: Some(query.to_owned()), ..filter.clone() };

		self.send(ApiRequest::get(PRODUCT_SEARCH_PATH).query_params(&filter)?).await?.json()
	}
}
