/* src/lib.rs */

//!
//! Lazy, feature-aware route resolution for single-page application routers.
//!
//! Features are bundles of routes held in a state container and loaded on
//! demand. This crate turns the container's feature collection into route
//! definitions a router can consume:
//!
//! - **wrap**: decorates a placeholder route so that its accessors wait for
//!   (or trigger) the owning feature's load, and shows an alert meanwhile.
//! - **child_routes**: flattens every feature's wrapped routes into one
//!   memoized child-route list, and exposes it as a router accessor.
//! - **feature_route**: one feature, one route, for static route trees.
//! - **adapter**: all of the above from one [`Config`].
//!
//! The container is consumed through the [`Store`] trait; the crate never
//! mutates features or their states, it only reads snapshots and dispatches
//! loads.
//!
//! ## Server and client
//!
//! With [`ConfigBuilder::is_server`] set, accessors that trigger a load
//! complete only after it settles and report load failures as
//! [`RouteError::Load`]. On the client they complete at once with a fallback;
//! the load is driven on the ambient tokio runtime and `rematch_routes` is
//! called when it succeeds.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for feature states, load errors,
//!   navigation states and redirects.

mod adapter;
mod config;
mod error;
mod feature;
mod memo;
mod store;

pub mod child_routes;
pub mod feature_route;
pub mod route;
pub mod wrap;

pub use adapter::{RouteAdapter, create};
pub use child_routes::{ChildRoutesSelector, ChildRoutesSelectorFactory, GetChildRoutes};
pub use config::{Config, ConfigBuilder, FeatureNameFn, RematchFn, Selector};
pub use error::{LoadError, RouteError};
pub use feature::{Feature, FeatureLoader, FeatureState, FeatureStates, Features};
pub use feature_route::{FeatureRouteFactory, FeatureRouteOptions};
pub use route::{Component, LazyRoute, NavigationState, Redirect, Render, Route, Routes};
pub use store::{FeatureContainer, LoadFuture, Store};
pub use wrap::{
	AlertProps, FeatureStateAlert, GetRoute, GetRoutes, RouteSelection, WrapOptions, WrapRoute,
	wrap_route,
};
