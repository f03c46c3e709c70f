//! Credential secrets and the access/refresh pair kept by credential stores.

pub mod pair;
pub mod secret;
