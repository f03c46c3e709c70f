//! Auth-domain identifiers, roles, credential pairs, and auth API wire models.

pub mod id;
pub mod model;
pub mod role;
pub mod token;

pub use id::*;
pub use model::*;
pub use role::*;
pub use token::{pair::*, secret::*};
