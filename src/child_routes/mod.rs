/* src/child_routes/mod.rs */

//!
//! Aggregation of every registered feature's routes into one child-route list.
//!
//! - [`ChildRoutesSelectorFactory`] - binds shared [`Config`]
//! - [`ChildRoutesSelector`] - memoized flattening for one `get_routes` projection
//! - [`GetChildRoutes`] - router accessor over a selector

mod adapter;

pub use adapter::{GetChildRoutes, accessor};

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::Config;
use crate::feature::{Feature, Features};
use crate::memo::{KeyedMemo, Memo};
use crate::route::{LazyRoute, Route, Routes};
use crate::store::Store;
use crate::wrap::{GetRoutes, RouteSelection, WrapOptions, wrap_route};

/// Creates [`ChildRoutesSelector`]s sharing one [`Config`].
pub struct ChildRoutesSelectorFactory<S: Store> {
	config: Config<S>,
}

impl<S: Store> ChildRoutesSelectorFactory<S> {
	pub fn new(config: Config<S>) -> Self {
		Self { config }
	}

	/// Creates a selector projecting each feature through `get_routes`.
	pub fn selector<F>(&self, get_routes: F) -> ChildRoutesSelector<S>
	where
		F: Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync + 'static,
	{
		self.selector_with(Arc::new(get_routes))
	}

	pub fn selector_with(&self, get_routes: GetRoutes<S>) -> ChildRoutesSelector<S> {
		ChildRoutesSelector {
			config: self.config.clone(),
			get_routes,
			store: ArcSwapOption::empty(),
			per_feature: KeyedMemo::new(),
			aggregate: Memo::new(),
		}
	}
}

impl<S: Store> Clone for ChildRoutesSelectorFactory<S> {
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
		}
	}
}

impl<S: Store> fmt::Debug for ChildRoutesSelectorFactory<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChildRoutesSelectorFactory")
			.field("config", &self.config)
			.finish()
	}
}

/// Flattens the wrapped routes of every feature, in registration order.
///
/// Two caches are kept: one per feature identifier, keyed on the identity of
/// that feature, and one for the whole list, keyed on the identity of the
/// feature collection. Calling [`select`](Self::select) while the collection
/// is unchanged returns the same `Arc`.
pub struct ChildRoutesSelector<S: Store> {
	config: Config<S>,
	get_routes: GetRoutes<S>,
	/// Store the caches were built against.
	store: ArcSwapOption<S>,
	per_feature: KeyedMemo<Feature<S>, Arc<[Route]>>,
	aggregate: Memo<Features<S>, Arc<Vec<Route>>>,
}

impl<S: Store> ChildRoutesSelector<S> {
	pub fn select(&self, store: &Arc<S>) -> Arc<Vec<Route>> {
		self.bind_store(store);

		let state = store.get_state();
		let features = (self.config.get_features)(&state);
		self.aggregate
			.get_or_compute(&features, |features| Arc::new(self.flatten(store, features)))
	}

	/// Wrapped routes close over the store, so a different store invalidates
	/// both cache levels.
	fn bind_store(&self, store: &Arc<S>) {
		let current = self.store.load();
		if let Some(current) = &*current
			&& Arc::ptr_eq(current, store)
		{
			return;
		}
		self.per_feature.clear();
		self.aggregate.clear();
		self.store.store(Some(Arc::clone(store)));
	}

	fn flatten(&self, store: &Arc<S>, features: &Features<S>) -> Vec<Route> {
		tracing::trace!(features = features.len(), "recomputing child routes");
		self.per_feature.retain(|feature_id| features.contains_key(feature_id));

		let mut routes = Vec::new();
		for (feature_id, feature) in features {
			let contribution = self
				.per_feature
				.entry(feature_id)
				.get_or_compute(feature, |feature| self.feature_routes(store, feature_id, feature));
			routes.extend(contribution.iter().cloned());
		}
		routes
	}

	fn feature_routes(&self, store: &Arc<S>, feature_id: &str, feature: &Feature<S>) -> Arc<[Route]> {
		tracing::trace!(feature_id, "wrapping feature routes");
		let feature_name = self.config.feature_name(feature_id, feature);
		let wrap = |route: &LazyRoute<S>| {
			wrap_route(WrapOptions {
				config: self.config.clone(),
				store: Arc::clone(store),
				feature_id: feature_id.to_string(),
				feature_name: Some(feature_name.clone()),
				route: route.clone(),
				selection: RouteSelection::ByPath(Arc::clone(&self.get_routes)),
			})
		};

		match (self.get_routes)(feature) {
			Some(routes) => routes.iter().map(wrap).collect(),
			None => Arc::from([]),
		}
	}
}

impl<S: Store> fmt::Debug for ChildRoutesSelector<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChildRoutesSelector")
			.field("config", &self.config)
			.field("cached_features", &self.per_feature.len())
			.finish_non_exhaustive()
	}
}
