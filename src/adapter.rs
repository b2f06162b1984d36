/* src/adapter.rs */

use std::sync::Arc;

use crate::child_routes::{ChildRoutesSelector, ChildRoutesSelectorFactory, GetChildRoutes};
use crate::config::Config;
use crate::feature::Feature;
use crate::feature_route::{FeatureRouteFactory, FeatureRouteOptions};
use crate::route::{Accessor, Route, Routes};
use crate::store::Store;

/// The selector factory, child-route accessor and feature-route factory,
/// all built from one [`Config`].
pub struct RouteAdapter<S: Store> {
	child_routes: ChildRoutesSelectorFactory<S>,
	get_child_routes: GetChildRoutes<S>,
	feature_routes: FeatureRouteFactory<S>,
}

/// Builds a [`RouteAdapter`] sharing `config`.
pub fn create<S: Store>(config: Config<S>) -> RouteAdapter<S> {
	let child_routes = ChildRoutesSelectorFactory::new(config.clone());
	RouteAdapter {
		get_child_routes: GetChildRoutes::new(child_routes.clone()),
		feature_routes: FeatureRouteFactory::new(config),
		child_routes,
	}
}

impl<S: Store> RouteAdapter<S> {
	pub fn child_routes_selector<F>(&self, get_routes: F) -> ChildRoutesSelector<S>
	where
		F: Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync + 'static,
	{
		self.child_routes.selector(get_routes)
	}

	pub fn get_child_routes<F>(&self, store: Arc<S>, get_routes: F) -> Accessor<Option<Vec<Route>>>
	where
		F: Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync + 'static,
	{
		self.get_child_routes.bind(store, get_routes)
	}

	pub fn feature_route(&self, options: FeatureRouteOptions<S>) -> Route {
		self.feature_routes.create(options)
	}
}
