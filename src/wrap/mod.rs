/* src/wrap/mod.rs */

//!
//! Feature-aware route decoration.
//!
//! [`wrap_route`] takes the placeholder route registered for a feature and
//! returns a route whose accessors consult the feature's load state before
//! delegating to the route the loaded feature provides:
//!
//! - `get_component` serves the bound alert until the feature is loaded and
//!   never triggers a load.
//! - `get_components`, `get_index_route`, `get_child_routes` and `on_enter`
//!   dispatch the load when the feature is not loaded yet. On the server they
//!   complete after the load settles; on the client they complete at once,
//!   with a fallback if the loaded route is not available yet.
//! - `on_change` and `on_leave` delegate only.

mod alert;
mod resolver;

pub use alert::{AlertProps, FeatureStateAlert, FeatureStateFn, bind_alert};

use std::fmt;
use std::sync::Arc;

use crate::RouteError;
use crate::config::Config;
use crate::feature::Feature;
use crate::memo::Memo;
use crate::route::{LazyRoute, NavigationState, Route, Routes};
use crate::store::Store;

use alert::bind_alert_with;
use resolver::{Property, Resolver, StateSelector};

/// Picks the single loaded route of a feature.
pub type GetRoute<S> = Arc<dyn Fn(&Feature<S>) -> Option<LazyRoute<S>> + Send + Sync>;

/// Picks the loaded routes of a feature, one or many.
pub type GetRoutes<S> = Arc<dyn Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync>;

/// How the wrapper finds the loaded counterpart of its placeholder route.
pub enum RouteSelection<S> {
	/// The feature provides exactly one route.
	Single(GetRoute<S>),
	/// The feature provides several routes; the one whose `path` equals the
	/// placeholder's `path` is used.
	ByPath(GetRoutes<S>),
}

impl<S> Clone for RouteSelection<S> {
	fn clone(&self) -> Self {
		match self {
			Self::Single(f) => Self::Single(Arc::clone(f)),
			Self::ByPath(f) => Self::ByPath(Arc::clone(f)),
		}
	}
}

impl<S> fmt::Debug for RouteSelection<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Single(_) => f.write_str("Single"),
			Self::ByPath(_) => f.write_str("ByPath"),
		}
	}
}

/// Everything [`wrap_route`] needs for one route.
pub struct WrapOptions<S: Store> {
	pub config: Config<S>,
	pub store: Arc<S>,
	pub feature_id: String,
	/// Defaults to `feature_id`.
	pub feature_name: Option<String>,
	/// The placeholder registered before the feature loads.
	pub route: LazyRoute<S>,
	pub selection: RouteSelection<S>,
}

/// Decorates `options.route` with accessors that defer to the feature state.
pub fn wrap_route<S: Store>(options: WrapOptions<S>) -> Route {
	let WrapOptions {
		config,
		store,
		feature_id,
		feature_name,
		route,
		selection,
	} = options;

	let preload = route.resolve(&store);
	let feature_name = feature_name.unwrap_or_else(|| feature_id.clone());

	let state = Arc::new(StateSelector {
		store: Arc::clone(&store),
		feature_id: feature_id.clone(),
		get_feature_states: config.get_feature_states.clone(),
		memo: Memo::new(),
	});

	let alert = config.feature_state_alert.clone().map(|alert| {
		let state = Arc::clone(&state);
		bind_alert_with(
			alert,
			feature_id.clone(),
			feature_name,
			Arc::new(move || state.select()),
		)
	});

	let resolver = Arc::new(Resolver {
		store,
		feature_id,
		is_server: config.is_server(),
		rematch_routes: config.rematch_routes.clone(),
		get_features: config.get_features.clone(),
		selection,
		preload_path: preload.path.clone(),
		alert,
		state,
		feature: Memo::new(),
		loaded_route: Memo::new(),
	});

	let get_component = Arc::clone(&resolver);
	let get_components = Arc::clone(&resolver);
	let get_index_route = Arc::clone(&resolver);
	let get_child_routes = Arc::clone(&resolver);
	let on_enter = Arc::clone(&resolver);
	let on_change = Arc::clone(&resolver);
	let on_leave = resolver;

	Route {
		path: preload.path,
		get_component: Some(Arc::new(move |nav: &NavigationState| get_component.get_component(nav))),
		get_components: Some(Arc::new(move |nav: &NavigationState| {
			get_components.get_property(nav, Property::components())
		})),
		get_index_route: Some(Arc::new(move |nav: &NavigationState| {
			get_index_route.get_property(nav, Property::index_route())
		})),
		get_child_routes: Some(Arc::new(move |nav: &NavigationState| {
			get_child_routes.get_property(nav, Property::child_routes())
		})),
		on_enter: Some(Arc::new(move |nav: &NavigationState| on_enter.on_enter(nav))),
		on_change: Some(Arc::new(move |prev: &NavigationState, next: &NavigationState| {
			on_change.on_change(prev, next)
		})),
		on_leave: Some(Arc::new(move |prev: &NavigationState| on_leave.on_leave(prev))),
		..Route::default()
	}
}

/// Builder-style entry point for [`wrap_route`] that validates its options.
pub struct WrapRoute;

impl WrapRoute {
	pub fn builder<S: Store>(config: Config<S>) -> WrapRouteBuilder<S> {
		WrapRouteBuilder::new(config)
	}
}

/// Builder for a wrapped route.
pub struct WrapRouteBuilder<S: Store> {
	config: Config<S>,
	store: Option<Arc<S>>,
	feature_id: Option<String>,
	feature_name: Option<String>,
	route: Option<LazyRoute<S>>,
	get_route: Option<GetRoute<S>>,
	get_routes: Option<GetRoutes<S>>,
}

impl<S: Store> WrapRouteBuilder<S> {
	pub fn new(config: Config<S>) -> Self {
		Self {
			config,
			store: None,
			feature_id: None,
			feature_name: None,
			route: None,
			get_route: None,
			get_routes: None,
		}
	}

	pub fn store(mut self, store: Arc<S>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn feature_id(mut self, feature_id: impl Into<String>) -> Self {
		self.feature_id = Some(feature_id.into());
		self
	}

	pub fn feature_name(mut self, feature_name: impl Into<String>) -> Self {
		self.feature_name = Some(feature_name.into());
		self
	}

	pub fn route(mut self, route: impl Into<LazyRoute<S>>) -> Self {
		self.route = Some(route.into());
		self
	}

	pub fn get_route<F>(mut self, get_route: F) -> Self
	where
		F: Fn(&Feature<S>) -> Option<LazyRoute<S>> + Send + Sync + 'static,
	{
		self.get_route = Some(Arc::new(get_route));
		self
	}

	pub fn get_routes<F>(mut self, get_routes: F) -> Self
	where
		F: Fn(&Feature<S>) -> Option<Routes<S>> + Send + Sync + 'static,
	{
		self.get_routes = Some(Arc::new(get_routes));
		self
	}

	pub fn build(self) -> Result<Route, RouteError> {
		let store = self
			.store
			.ok_or_else(|| RouteError::Builder("store is required".to_string()))?;
		let feature_id = self
			.feature_id
			.ok_or_else(|| RouteError::Builder("feature_id is required".to_string()))?;
		let route = self
			.route
			.ok_or_else(|| RouteError::Builder("route is required".to_string()))?;
		let selection = match (self.get_route, self.get_routes) {
			(Some(get_route), None) => RouteSelection::Single(get_route),
			(None, Some(get_routes)) => RouteSelection::ByPath(get_routes),
			(Some(_), Some(_)) => {
				return Err(RouteError::Builder(
					"get_route and get_routes are mutually exclusive".to_string(),
				));
			}
			(None, None) => {
				return Err(RouteError::Builder(
					"one of get_route or get_routes is required".to_string(),
				));
			}
		};

		Ok(wrap_route(WrapOptions {
			config: self.config,
			store,
			feature_id,
			feature_name: self.feature_name,
			route,
			selection,
		}))
	}
}
