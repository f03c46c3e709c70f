//! Typed storefront API calls layered on top of [`SessionClient`].
//!
//! Feature modules describe a call as a path plus an optional JSON body; the helpers below run
//! it through [`SessionClient::send`] so bearer attachment and refresh recovery stay invisible.

pub mod auth;
pub mod products;
pub mod reviews;

// self
use crate::{
	_prelude::*,
	http::{ApiRequest, ApiTransport},
	session::SessionClient,
};

impl<T> SessionClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// `GET path` and decode the JSON response.
	pub async fn get_json<R>(&self, path: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(ApiRequest::get(path)).await?.json()
	}

	/// `POST path` with a JSON body and decode the JSON response.
	pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.send(ApiRequest::post(path).json(body)?).await?.json()
	}

	/// `PUT path` with a JSON body and decode the JSON response.
	pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.send(ApiRequest::put(path).json(body)?).await?.json()
	}

	/// `DELETE path`, discarding any response body.
	pub async fn delete(&self, path: &str) -> Result<()> {
		self.send(ApiRequest::delete(path)).await?;

		Ok(())
	}
}
