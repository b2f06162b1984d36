use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future;
use tokio::runtime::Handle;

use crate::RouteError;
use crate::config::{RematchFn, Selector};
use crate::feature::{Feature, FeatureState, FeatureStates, Features};
use crate::memo::Memo;
use crate::route::{Accessor, Component, Components, NavigationState, Redirect, Route, RouteFuture};
use crate::store::{LoadFuture, Store};

use super::RouteSelection;

/// Projects one feature's load state out of the container, memoized on the
/// identity of the feature-state collection.
pub(crate) struct StateSelector<S: Store> {
	pub store: Arc<S>,
	pub feature_id: String,
	pub get_feature_states: Selector<S, FeatureStates>,
	pub memo: Memo<FeatureStates, Option<FeatureState>>,
}

impl<S: Store> StateSelector<S> {
	pub fn select(&self) -> Option<FeatureState> {
		let state = self.store.get_state();
		let states = (self.get_feature_states)(&state);
		self.memo
			.get_or_compute(&states, |states| states.get(&self.feature_id).cloned())
	}
}

/// A route property served through an accessor once the feature is loaded.
pub(crate) struct Property<X> {
	accessor: fn(&Route) -> Option<Accessor<Option<X>>>,
	value: fn(&Route) -> Option<X>,
	/// Served on the client when the loaded route defines neither form.
	fallback: fn() -> Option<X>,
}

impl<X> Clone for Property<X> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<X> Copy for Property<X> {}

impl Property<Components> {
	pub fn components() -> Self {
		Self {
			accessor: |route| route.get_components.clone(),
			value: |route| route.components.clone(),
			fallback: || None,
		}
	}
}

impl Property<Route> {
	pub fn index_route() -> Self {
		Self {
			accessor: |route| route.get_index_route.clone(),
			value: |route| route.index_route.as_deref().cloned(),
			fallback: || None,
		}
	}
}

impl Property<Vec<Route>> {
	pub fn child_routes() -> Self {
		Self {
			accessor: |route| route.get_child_routes.clone(),
			value: |route| route.child_routes.clone(),
			fallback: || Some(vec![Route::catch_all()]),
		}
	}
}

/// Shared state behind every accessor of one wrapped route.
pub(crate) struct Resolver<S: Store> {
	pub store: Arc<S>,
	pub feature_id: String,
	pub is_server: bool,
	pub rematch_routes: Option<RematchFn<S>>,
	pub get_features: Selector<S, Features<S>>,
	pub selection: RouteSelection<S>,
	/// Path of the placeholder route, used to pick the loaded counterpart.
	pub preload_path: Option<String>,
	pub alert: Option<Component>,
	pub state: Arc<StateSelector<S>>,
	pub feature: Memo<Features<S>, Option<Arc<Feature<S>>>>,
	pub loaded_route: Memo<Feature<S>, Route>,
}

impl<S: Store> Resolver<S> {
	pub fn feature(&self) -> Option<Arc<Feature<S>>> {
		let state = self.store.get_state();
		let features = (self.get_features)(&state);
		self.feature
			.get_or_compute(&features, |features| features.get(&self.feature_id).cloned())
	}

	pub fn loaded_route(&self) -> Route {
		match self.feature() {
			Some(feature) => self
				.loaded_route
				.get_or_compute(&feature, |feature| self.select_loaded_route(feature)),
			None => Route::default(),
		}
	}

	fn select_loaded_route(&self, feature: &Feature<S>) -> Route {
		tracing::trace!(feature_id = %self.feature_id, "selecting loaded route");
		match &self.selection {
			RouteSelection::Single(get_route) => get_route(feature)
				.map(|route| route.resolve(&self.store))
				.unwrap_or_default(),
			RouteSelection::ByPath(get_routes) => {
				let Some(routes) = get_routes(feature) else {
					return Route::default();
				};
				routes
					.iter()
					.map(|route| route.resolve(&self.store))
					.find(|route| route.path == self.preload_path)
					.unwrap_or_default()
			}
		}
	}

	fn needs_load(&self) -> bool {
		self.state.select() == Some(FeatureState::NotLoaded)
	}

	/// Dispatches a load if the feature has not been asked to load yet.
	fn trigger_load(&self) -> Option<LoadFuture> {
		if !self.needs_load() {
			return None;
		}
		tracing::debug!(feature_id = %self.feature_id, "dispatching feature load");
		Some(self.store.load_feature(&self.feature_id))
	}

	/// Dispatches a client-side load on `handle` and re-matches on success.
	fn settle_in_background(&self, handle: &Handle) {
		let Some(load) = self.trigger_load() else {
			return;
		};
		let store = Arc::clone(&self.store);
		let rematch = self.rematch_routes.clone();
		let feature_id = self.feature_id.clone();

		handle.spawn(async move {
			match load.await {
				Ok(()) => {
					tracing::debug!(feature_id = %feature_id, "feature loaded");
					if let Some(rematch) = rematch {
						rematch(&store);
					}
				}
				// Surfaced through the feature state, not the router.
				Err(e) => tracing::warn!(feature_id = %feature_id, error = %e, "feature failed to load"),
			}
		});
	}

	/// Triggers a load if needed, then serves through `serve`.
	///
	/// On the server `serve` runs only after the load settles. On the client
	/// it runs immediately against whatever the container holds now. A client
	/// without a tokio runtime leaves the feature `NotLoaded` so a later call
	/// can dispatch it.
	fn after_load<T, F>(self: &Arc<Self>, nav: &NavigationState, serve: F) -> RouteFuture<T>
	where
		T: Send + 'static,
		F: FnOnce(&Self, &NavigationState) -> RouteFuture<T> + Send + 'static,
	{
		if self.is_server {
			if let Some(load) = self.trigger_load() {
				let resolver = Arc::clone(self);
				let nav = nav.clone();
				return async move {
					load.await.map_err(|source| RouteError::Load {
						feature_id: resolver.feature_id.clone(),
						source,
					})?;
					serve(&resolver, &nav).await
				}
				.boxed();
			}
			return serve(self, nav);
		}

		match Handle::try_current() {
			Ok(handle) => self.settle_in_background(&handle),
			Err(_) if self.needs_load() => tracing::warn!(
				feature_id = %self.feature_id,
				"no tokio runtime, feature load not dispatched"
			),
			Err(_) => {}
		}
		serve(self, nav)
	}

	fn serve<X: Send + 'static>(&self, nav: &NavigationState, property: Property<X>) -> RouteFuture<Option<X>> {
		let route = self.loaded_route();
		if let Some(accessor) = (property.accessor)(&route) {
			return accessor(nav);
		}
		let value = match (property.value)(&route) {
			Some(value) => Some(value),
			None if self.is_server => None,
			None => (property.fallback)(),
		};
		future::ready(Ok(value)).boxed()
	}

	pub fn get_component(&self, nav: &NavigationState) -> RouteFuture<Option<Component>> {
		if self.state.select() != Some(FeatureState::Loaded) {
			return future::ready(Ok(self.alert.clone())).boxed();
		}
		let route = self.loaded_route();
		match route.get_component {
			Some(accessor) => accessor(nav),
			None => future::ready(Ok(route.component)).boxed(),
		}
	}

	pub fn get_property<X: Send + 'static>(
		self: &Arc<Self>,
		nav: &NavigationState,
		property: Property<X>,
	) -> RouteFuture<Option<X>> {
		self.after_load(nav, move |resolver, nav| resolver.serve(nav, property))
	}

	pub fn on_enter(self: &Arc<Self>, nav: &NavigationState) -> RouteFuture<Option<Redirect>> {
		self.after_load(nav, |resolver, nav| match resolver.loaded_route().on_enter {
			Some(hook) => hook(nav),
			None => future::ready(Ok(None)).boxed(),
		})
	}

	pub fn on_change(&self, prev: &NavigationState, next: &NavigationState) -> RouteFuture<Option<Redirect>> {
		match self.loaded_route().on_change {
			Some(hook) => hook(prev, next),
			None => future::ready(Ok(None)).boxed(),
		}
	}

	pub fn on_leave(&self, prev: &NavigationState) {
		if let Some(hook) = self.loaded_route().on_leave {
			hook(prev);
		}
	}
}
