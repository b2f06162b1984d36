/* src/feature_route.rs */

//!
//! "One feature, one route" declarations for static route trees.

use std::sync::Arc;

use crate::config::Config;
use crate::feature::Feature;
use crate::route::{LazyRoute, Route};
use crate::store::Store;
use crate::wrap::{GetRoute, RouteSelection, WrapOptions, wrap_route};

/// Per-route options for [`FeatureRouteFactory::create`].
pub struct FeatureRouteOptions<S: Store> {
	pub store: Arc<S>,
	pub feature_id: String,
	/// Defaults to `feature_id`.
	pub feature_name: Option<String>,
	pub get_route: GetRoute<S>,
	/// Fields set here replace those of the feature's route.
	pub overrides: Route,
}

impl<S: Store> FeatureRouteOptions<S> {
	pub fn new<F>(store: Arc<S>, feature_id: impl Into<String>, get_route: F) -> Self
	where
		F: Fn(&Feature<S>) -> Option<LazyRoute<S>> + Send + Sync + 'static,
	{
		Self {
			store,
			feature_id: feature_id.into(),
			feature_name: None,
			get_route: Arc::new(get_route),
			overrides: Route::default(),
		}
	}

	pub fn feature_name(mut self, feature_name: impl Into<String>) -> Self {
		self.feature_name = Some(feature_name.into());
		self
	}

	pub fn overrides(mut self, overrides: Route) -> Self {
		self.overrides = overrides;
		self
	}
}

/// Wraps the single route of a feature, looked up once at construction.
///
/// Unlike [`ChildRoutesSelector`](crate::ChildRoutesSelector), the lookup is
/// not reactive: the placeholder is taken from the container snapshot at the
/// time [`create`](Self::create) is called.
pub struct FeatureRouteFactory<S: Store> {
	config: Config<S>,
}

impl<S: Store> FeatureRouteFactory<S> {
	pub fn new(config: Config<S>) -> Self {
		Self { config }
	}

	pub fn create(&self, options: FeatureRouteOptions<S>) -> Route {
		let FeatureRouteOptions {
			store,
			feature_id,
			feature_name,
			get_route,
			overrides,
		} = options;

		let state = store.get_state();
		let features = (self.config.get_features)(&state);
		let route = features
			.get(&feature_id)
			.and_then(|feature| get_route(feature))
			.map(|route| route.resolve(&store))
			.unwrap_or_default();

		wrap_route(WrapOptions {
			config: self.config.clone(),
			store,
			feature_id,
			feature_name,
			route: LazyRoute::Static(route.merge(overrides)),
			selection: RouteSelection::Single(get_route),
		})
	}
}

impl<S: Store> Clone for FeatureRouteFactory<S> {
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
		}
	}
}
