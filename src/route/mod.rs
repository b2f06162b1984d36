/* src/route/mod.rs */

//!
//! Route definitions as consumed by the router.
//!
//! Every component-bearing field comes in two forms: a plain value
//! (`component`, `components`, `index_route`, `child_routes`) and an
//! asynchronous accessor (`get_component`, ...). Routers resolve the
//! accessor first and fall back to the value.

mod component;
mod lazy;

pub use component::{Component, Components, Render};
pub use lazy::{LazyRoute, Routes};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RouteError;

/// Completion of an accessor or hook: exactly one value or error.
pub type RouteFuture<T> = BoxFuture<'static, Result<T, RouteError>>;

/// Asynchronous accessor for a route property.
pub type Accessor<T> = Arc<dyn Fn(&NavigationState) -> RouteFuture<T> + Send + Sync>;

/// Called when a route becomes active. May redirect.
pub type EnterHook = Arc<dyn Fn(&NavigationState) -> RouteFuture<Option<Redirect>> + Send + Sync>;

/// Called with `(previous, next)` when an active route's location changes.
pub type ChangeHook =
	Arc<dyn Fn(&NavigationState, &NavigationState) -> RouteFuture<Option<Redirect>> + Send + Sync>;

/// Called with the previous state when a route stops being active.
pub type LeaveHook = Arc<dyn Fn(&NavigationState) + Send + Sync>;

/// The location a router is resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationState {
	pub pathname: String,
	pub params: BTreeMap<String, String>,
}

impl NavigationState {
	pub fn new(pathname: impl Into<String>) -> Self {
		Self {
			pathname: pathname.into(),
			params: BTreeMap::new(),
		}
	}
}

/// Request to replace the current location, returned by enter/change hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Redirect(pub String);

impl Redirect {
	pub fn to(pathname: impl Into<String>) -> Self {
		Self(pathname.into())
	}
}

/// A router-consumable route definition.
#[derive(Clone, Default)]
pub struct Route {
	pub path: Option<String>,
	pub component: Option<Component>,
	pub get_component: Option<Accessor<Option<Component>>>,
	pub components: Option<Components>,
	pub get_components: Option<Accessor<Option<Components>>>,
	pub index_route: Option<Box<Route>>,
	pub get_index_route: Option<Accessor<Option<Route>>>,
	pub child_routes: Option<Vec<Route>>,
	pub get_child_routes: Option<Accessor<Option<Vec<Route>>>>,
	pub on_enter: Option<EnterHook>,
	pub on_change: Option<ChangeHook>,
	pub on_leave: Option<LeaveHook>,
}

impl Route {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_path(path: impl Into<String>) -> Self {
		Self {
			path: Some(path.into()),
			..Self::default()
		}
	}

	/// The catch-all placeholder served while a feature's children are unknown.
	pub fn catch_all() -> Self {
		Self::with_path("*")
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn component(mut self, component: Component) -> Self {
		self.component = Some(component);
		self
	}

	pub fn components(mut self, components: Components) -> Self {
		self.components = Some(components);
		self
	}

	pub fn index_route(mut self, route: Route) -> Self {
		self.index_route = Some(Box::new(route));
		self
	}

	pub fn child_routes(mut self, routes: Vec<Route>) -> Self {
		self.child_routes = Some(routes);
		self
	}

	pub fn get_component<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&NavigationState) -> RouteFuture<Option<Component>> + Send + Sync + 'static,
	{
		self.get_component = Some(Arc::new(accessor));
		self
	}

	pub fn get_child_routes<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&NavigationState) -> RouteFuture<Option<Vec<Route>>> + Send + Sync + 'static,
	{
		self.get_child_routes = Some(Arc::new(accessor));
		self
	}

	pub fn on_enter<F>(mut self, hook: F) -> Self
	where
		F: Fn(&NavigationState) -> RouteFuture<Option<Redirect>> + Send + Sync + 'static,
	{
		self.on_enter = Some(Arc::new(hook));
		self
	}

	pub fn on_change<F>(mut self, hook: F) -> Self
	where
		F: Fn(&NavigationState, &NavigationState) -> RouteFuture<Option<Redirect>>
			+ Send
			+ Sync
			+ 'static,
	{
		self.on_change = Some(Arc::new(hook));
		self
	}

	pub fn on_leave<F>(mut self, hook: F) -> Self
	where
		F: Fn(&NavigationState) + Send + Sync + 'static,
	{
		self.on_leave = Some(Arc::new(hook));
		self
	}

	/// Overlays every field set in `overrides` onto `self`.
	pub fn merge(self, overrides: Route) -> Route {
		Route {
			path: overrides.path.or(self.path),
			component: overrides.component.or(self.component),
			get_component: overrides.get_component.or(self.get_component),
			components: overrides.components.or(self.components),
			get_components: overrides.get_components.or(self.get_components),
			index_route: overrides.index_route.or(self.index_route),
			get_index_route: overrides.get_index_route.or(self.get_index_route),
			child_routes: overrides.child_routes.or(self.child_routes),
			get_child_routes: overrides.get_child_routes.or(self.get_child_routes),
			on_enter: overrides.on_enter.or(self.on_enter),
			on_change: overrides.on_change.or(self.on_change),
			on_leave: overrides.on_leave.or(self.on_leave),
		}
	}
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Route");
		s.field("path", &self.path);
		s.field("component", &self.component);
		s.field("get_component", &self.get_component.is_some());
		s.field("components", &self.components.as_ref().map(|c| c.len()));
		s.field("get_components", &self.get_components.is_some());
		s.field("index_route", &self.index_route);
		s.field("get_index_route", &self.get_index_route.is_some());
		s.field("child_routes", &self.child_routes);
		s.field("get_child_routes", &self.get_child_routes.is_some());
		s.field("on_enter", &self.on_enter.is_some());
		s.field("on_change", &self.on_change.is_some());
		s.field("on_leave", &self.on_leave.is_some());
		s.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_prefers_overrides() {
		let base = Route::with_path("foo").component(Component::text("Foo"));
		let overrides = Route::with_path("bar");

		let merged = base.merge(overrides);

		assert_eq!(merged.path.as_deref(), Some("bar"));
		assert_eq!(merged.component.map(|c| c.render()).as_deref(), Some("Foo"));
	}

	#[test]
	fn catch_all_has_wildcard_path() {
		let route = Route::catch_all();
		assert_eq!(route.path.as_deref(), Some("*"));
		assert!(route.component.is_none());
		assert!(route.child_routes.is_none());
	}
}
