/* src/child_routes/adapter.rs */

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future;

use super::{ChildRoutesSelector, ChildRoutesSelectorFactory};
use crate::feature::Feature;
use crate::route::{Accessor, NavigationState, Route, Routes};
use crate::store::Store;

/// Turns selectors into `get_child_routes` accessors for a parent route.
pub struct GetChildRoutes<S: Store> {
	factory: ChildRoutesSelectorFactory<S>,
}

impl<S: Store> GetChildRoutes<S> {
	pub fn new(factory: ChildRoutesSelectorFactory<S>) -> Self {
		Self { factory }
	}

	/// Returns an accessor that completes immediately with the current
	/// flattened routes of every feature in `store`. It never fails.
	pub fn bind<F>(&self, store: Arc<S>, get_routes: F) -> Accessor<Option<Vec<Route>>>
	where
		F: Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync + 'static,
	{
		accessor(store, self.factory.selector(get_routes))
	}
}

/// Exposes an existing selector as a child-route accessor.
pub fn accessor<S: Store>(store: Arc<S>, selector: ChildRoutesSelector<S>) -> Accessor<Option<Vec<Route>>> {
	Arc::new(move |_: &NavigationState| {
		let routes = selector.select(&store);
		future::ready(Ok(Some(routes.to_vec()))).boxed()
	})
}
