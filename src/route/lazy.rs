/* src/route/lazy.rs */

use std::fmt;
use std::sync::Arc;

use super::Route;

/// A route that is either available as-is or derived from the store.
pub enum LazyRoute<S> {
	Static(Route),
	Deferred(Arc<dyn Fn(&Arc<S>) -> Route + Send + Sync>),
}

impl<S> LazyRoute<S> {
	pub fn deferred<F>(f: F) -> Self
	where
		F: Fn(&Arc<S>) -> Route + Send + Sync + 'static,
	{
		Self::Deferred(Arc::new(f))
	}

	/// Produces the concrete route, invoking a deferred route with `store`.
	pub fn resolve(&self, store: &Arc<S>) -> Route {
		match self {
			Self::Static(route) => route.clone(),
			Self::Deferred(f) => f(store),
		}
	}
}

impl<S> Clone for LazyRoute<S> {
	fn clone(&self) -> Self {
		match self {
			Self::Static(route) => Self::Static(route.clone()),
			Self::Deferred(f) => Self::Deferred(Arc::clone(f)),
		}
	}
}

impl<S> From<Route> for LazyRoute<S> {
	fn from(route: Route) -> Self {
		Self::Static(route)
	}
}

impl<S> fmt::Debug for LazyRoute<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(route) => f.debug_tuple("Static").field(route).finish(),
			Self::Deferred(_) => f.write_str("Deferred"),
		}
	}
}

/// The route contribution of a feature: one route or an ordered list.
pub enum Routes<S> {
	One(LazyRoute<S>),
	Many(Vec<LazyRoute<S>>),
}

impl<S> Routes<S> {
	/// Iterates the contained routes in list order.
	pub fn iter(&self) -> std::slice::Iter<'_, LazyRoute<S>> {
		match self {
			Self::One(route) => std::slice::from_ref(route).iter(),
			Self::Many(routes) => routes.iter(),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::One(_) => 1,
			Self::Many(routes) => routes.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<S> Clone for Routes<S> {
	fn clone(&self) -> Self {
		match self {
			Self::One(route) => Self::One(route.clone()),
			Self::Many(routes) => Self::Many(routes.clone()),
		}
	}
}

impl<S> From<Route> for Routes<S> {
	fn from(route: Route) -> Self {
		Self::One(LazyRoute::Static(route))
	}
}

impl<S> From<LazyRoute<S>> for Routes<S> {
	fn from(route: LazyRoute<S>) -> Self {
		Self::One(route)
	}
}

impl<S> From<Vec<Route>> for Routes<S> {
	fn from(routes: Vec<Route>) -> Self {
		Self::Many(routes.into_iter().map(LazyRoute::Static).collect())
	}
}

impl<S> fmt::Debug for Routes<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}
