//! Storefront roles and the dashboard/login entry points that belong to each.

// self
use crate::_prelude::*;

/// Role names assigned by the storefront backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
	/// Platform administrator.
	#[serde(rename = "ROLE_ADMIN")]
	Admin,
	/// Shopper.
	#[serde(rename = "ROLE_CUSTOMER")]
	Customer,
	/// Merchant managing their own catalogue.
	#[serde(rename = "ROLE_SELLER")]
	Seller,
	/// Back-office staff handling orders.
	#[serde(rename = "ROLE_STAFF")]
	Staff,
}
impl UserRole {
	/// Every role, in the order used to pick a viewer's primary role.
	pub const ALL: [UserRole; 4] = [Self::Admin, Self::Customer, Self::Seller, Self::Staff];

	/// Returns the backend role name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Admin => "ROLE_ADMIN",
			Self::Customer => "ROLE_CUSTOMER",
			Self::Seller => "ROLE_SELLER",
			Self::Staff => "ROLE_STAFF",
		}
	}

	/// Root path of the role's dashboard tree.
	pub const fn dashboard_path(self) -> &'static str {
		match self {
			Self::Admin => "/admin",
			Self::Customer => "/customer",
			Self::Seller => "/seller",
			Self::Staff => "/staff",
		}
	}

	/// Login entry point dedicated to the role.
	pub const fn login_path(self) -> &'static str {
		match self {
			Self::Admin => "/admin/login",
			Self::Customer => "/login",
			Self::Seller => "/seller/login",
			Self::Staff => "/staff/login",
		}
	}
}
impl Display for UserRole {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for UserRole {
	type Err = UnknownRole;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter().find(|role| role.as_str() == s).ok_or_else(|| UnknownRole(s.into()))
	}
}

/// Raised when a role name is not one of the storefront roles.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown storefront role `{0}`.")]
pub struct UnknownRole(pub String);
