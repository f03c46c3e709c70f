//! Catalogue wire models: pages, products, categories, and reviews.

pub mod page;
pub mod product;
pub mod review;

pub use page::*;
pub use product::*;
pub use review::*;
