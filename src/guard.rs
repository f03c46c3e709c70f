//! Role-based route guards for the storefront dashboards.
//!
//! A guard answers one question for a viewer and a location: render it, send the viewer to
//! login, or send them to the dashboard of a role they actually hold.

// self
use crate::auth::{User, UserRole};

/// Path used when a viewer holds no storefront role.
pub const HOME_PATH: &str = "/";

/// What the host should do with a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
	/// Render the requested route.
	Allow,
	/// Send the viewer to the login entry point, remembering where they were going.
	RedirectToLogin {
		/// Login entry path.
		login_path: String,
		/// Location the viewer asked for.
		from: String,
	},
	/// Send the viewer to a route they are allowed to see.
	RedirectToDashboard(&'static str),
}

/// Access rule attached to a route tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
	/// Whether an anonymous viewer is turned away.
	pub require_auth: bool,
	/// Roles allowed to view the route; `None` admits every signed-in viewer.
	pub allowed_roles: Option<Vec<UserRole>>,
	/// Login entry path used for anonymous viewers.
	pub login_path: String,
}
impl RouteGuard {
	/// Guard admitting any signed-in viewer.
	pub fn authenticated() -> Self {
		Self { require_auth: true, allowed_roles: None, login_path: "/login".into() }
	}

	/// Guard admitting signed-in viewers holding one of `roles`.
	pub fn roles(roles: impl IntoIterator<Item = UserRole>) -> Self {
		Self { allowed_roles: Some(roles.into_iter().collect()), ..Self::authenticated() }
	}

	/// Overrides the login entry path.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Decides what to do with `viewer` navigating to `location`.
	pub fn evaluate(&self, viewer: Option<&User>, location: &str) -> RouteDecision {
		let Some(user) = viewer else {
			return if self.require_auth {
				RouteDecision::RedirectToLogin {
					login_path: self.login_path.clone(),
					from: location.into(),
				}
			} else {
				RouteDecision::Allow
			};
		};

		match &self.allowed_roles {
			Some(allowed) if !allowed.iter().any(|role| user.has_role(*role)) =>
				RouteDecision::RedirectToDashboard(
					user.primary_role().map_or(HOME_PATH, UserRole::dashboard_path),
				),
			_ => RouteDecision::Allow,
		}
	}
}

/// Prefix-matched guards for a whole application.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
	routes: Vec<(String, RouteGuard)>,
}
impl RouteTable {
	/// The storefront layout: one dashboard tree per role, everything else public.
	pub fn storefront() -> Self {
		UserRole::ALL.into_iter().fold(Self::default(), |table, role| {
			table.route(role.dashboard_path(), RouteGuard::roles([role]))
		})
	}

	/// Guards every path under `prefix`.
	pub fn route(mut self, prefix: impl Into<String>, guard: RouteGuard) -> Self {
		self.routes.push((prefix.into(), guard));

		self
	}

	/// Returns the guard with the longest prefix covering `path`.
	///
	/// Role login pages such as `/admin/login` live under a dashboard prefix but stay public.
	pub fn guard_for(&self, path: &str) -> Option<&RouteGuard> {
		if UserRole::ALL.iter().any(|role| role.login_path() == path) {
			return None;
		}

		self.routes
			.iter()
			.filter(|(prefix, _)| covers(prefix, path))
			.max_by_key(|(prefix, _)| prefix.len())
			.map(|(_, guard)| guard)
	}

	/// Evaluates the guard covering `path`; unguarded paths are always allowed.
	pub fn evaluate(&self, viewer: Option<&User>, path: &str) -> RouteDecision {
		self.guard_for(path).map_or(RouteDecision::Allow, |guard| guard.evaluate(viewer, path))
	}
}

fn covers(prefix: &str, path: &str) -> bool {
	match path.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
		None => false,
	}
}
