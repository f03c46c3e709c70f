//! Products, variants, and categories.

// self
use crate::_prelude::*;

/// Listing state of a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
	/// Visible and purchasable.
	Active,
	/// Hidden from the storefront.
	Inactive,
	/// Visible but not purchasable.
	OutOfStock,
}

/// Product category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
	/// Backend identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Optional description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// URL slug.
	pub slug: String,
	/// Parent category, for nested trees.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<u64>,
	/// Optional image location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Sort key within the parent.
	#[serde(default)]
	pub display_order: i32,
	/// Whether the category is shown.
	#[serde(default)]
	pub is_active: bool,
}

/// Image attached to a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
	/// Backend identifier.
	pub id: u64,
	/// Image location.
	pub image_url: String,
	/// Sort key.
	pub display_order: i32,
	/// Whether this is the cover image.
	pub is_primary: bool,
}

/// Purchasable variant of a product (size, colour, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
	/// Backend identifier.
	pub id: u64,
	/// Stock keeping unit.
	pub sku: String,
	/// Display name.
	pub name: String,
	/// Unit price.
	pub price: f64,
	/// Struck-through reference price.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub compare_at_price: Option<f64>,
	/// Units on hand.
	pub stock_quantity: u32,
	/// Units held by open carts and orders.
	#[serde(default)]
	pub reserved_quantity: u32,
	/// Units sold so far.
	#[serde(default)]
	pub sold_quantity: u32,
	/// Shipping weight.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<f64>,
	/// Variant-specific image.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Free-form attributes such as `color` or `size`.
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
	/// Whether the variant can be bought.
	#[serde(default)]
	pub is_active: bool,
}
impl ProductVariant {
	/// Units that can still be sold.
	pub fn available(&self) -> u32 {
		self.stock_quantity.saturating_sub(self.reserved_quantity)
	}
}

/// Product as returned by the catalogue endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Backend identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// URL slug.
	pub slug: String,
	/// Long description.
	#[serde(default)]
	pub description: String,
	/// Teaser text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_description: Option<String>,
	/// Owning category.
	pub category_id: u64,
	/// Owning category name.
	#[serde(default)]
	pub category_name: String,
	/// Selling merchant.
	pub seller_id: u64,
	/// Selling merchant name.
	#[serde(default)]
	pub seller_name: String,
	/// Listing state.
	pub status: ProductStatus,
	/// Mean review rating.
	#[serde(default)]
	pub average_rating: f64,
	/// Approved review count.
	#[serde(default)]
	pub total_reviews: u64,
	/// Units sold across variants.
	#[serde(default)]
	pub total_sold: u64,
	/// Gallery images.
	#[serde(default)]
	pub images: Vec<ProductImage>,
	/// Purchasable variants.
	#[serde(default)]
	pub variants: Vec<ProductVariant>,
	/// Creation timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	/// Last update timestamp as sent by the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}
impl Product {
	/// Cover image, falling back to the first image.
	pub fn primary_image(&self) -> Option<&ProductImage> {
		self.images.iter().find(|image| image.is_primary).or_else(|| self.images.first())
	}

	/// Lowest active variant price.
	pub fn min_price(&self) -> Option<f64> {
		self.variants
			.iter()
			.filter(|variant| variant.is_active)
			.map(|variant| variant.price)
			.reduce(f64::min)
	}
}

/// Image entry of a product creation body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductImage {
	/// Image location.
	pub image_url: String,
	/// Sort key.
	pub display_order: i32,
	/// Whether this is the cover image.
	pub is_primary: bool,
}

/// Variant entry of a product creation body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductVariant {
	/// Stock keeping unit.
	pub sku: String,
	/// Display name.
	pub name: String,
	/// Unit price.
	pub price: f64,
	/// Struck-through reference price.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub compare_at_price: Option<f64>,
	/// Initial stock.
	pub stock_quantity: u32,
	/// Shipping weight.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<f64>,
	/// Variant-specific image.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image_url: Option<String>,
	/// Free-form attributes.
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
}

/// Body of `POST /products` (sellers).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
	/// Display name.
	pub name: String,
	/// Long description.
	pub description: String,
	/// Teaser text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_description: Option<String>,
	/// Owning category.
	pub category_id: u64,
	/// Initial listing state.
	pub status: ProductStatus,
	/// Gallery images.
	#[serde(default)]
	pub images: Vec<NewProductImage>,
	/// Purchasable variants.
	#[serde(default)]
	pub variants: Vec<NewProductVariant>,
}

/// Body of `PUT /products/{id}`; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
	/// New display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// New long description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// New teaser text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_description: Option<String>,
	/// New category.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category_id: Option<u64>,
	/// New listing state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ProductStatus>,
	/// Replacement gallery.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub images: Option<Vec<NewProductImage>>,
	/// Replacement variants.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub variants: Option<Vec<NewProductVariant>>,
}

/// Query parameters of the product listing and search endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
	/// Restrict to one category.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category_id: Option<u64>,
	/// Restrict to one merchant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub seller_id: Option<u64>,
	/// Lower price bound.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_price: Option<f64>,
	/// Upper price bound.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_price: Option<f64>,
	/// Restrict to one listing state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<ProductStatus>,
	/// Free-text search.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
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
