/* src/feature.rs */

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::LoadError;
use crate::route::Routes;

/// Produces the fully populated replacement of a feature.
pub type FeatureLoader<S> =
	Arc<dyn Fn() -> BoxFuture<'static, Result<Feature<S>, LoadError>> + Send + Sync>;

/// Registered features in registration order.
pub type Features<S> = IndexMap<String, Arc<Feature<S>>>;

/// Load state of every registered feature.
pub type FeatureStates = IndexMap<String, FeatureState>;

/// A lazily loadable bundle of routes.
pub struct Feature<S> {
	pub root_routes: Option<Routes<S>>,
	pub load: Option<FeatureLoader<S>>,
}

impl<S> Feature<S> {
	pub fn new(root_routes: impl Into<Routes<S>>) -> Self {
		Self {
			root_routes: Some(root_routes.into()),
			load: None,
		}
	}

	pub fn with_loader<F>(mut self, load: F) -> Self
	where
		F: Fn() -> BoxFuture<'static, Result<Feature<S>, LoadError>> + Send + Sync + 'static,
	{
		self.load = Some(Arc::new(load));
		self
	}
}

impl<S> Clone for Feature<S> {
	fn clone(&self) -> Self {
		Self {
			root_routes: self.root_routes.clone(),
			load: self.load.clone(),
		}
	}
}

impl<S> Default for Feature<S> {
	fn default() -> Self {
		Self {
			root_routes: None,
			load: None,
		}
	}
}

impl<S> fmt::Debug for Feature<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Feature")
			.field("root_routes", &self.root_routes)
			.field("load", &self.load.is_some())
			.finish()
	}
}

/// Load lifecycle of a feature. Only the container moves a feature between states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeatureState {
	#[default]
	NotLoaded,
	Loading,
	Loaded,
	Failed(LoadError),
}

impl FeatureState {
	pub fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded)
	}

	pub fn error(&self) -> Option<&LoadError> {
		match self {
			Self::Failed(error) => Some(error),
			_ => None,
		}
	}
}

impl fmt::Display for FeatureState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotLoaded => f.write_str("NOT_LOADED"),
			Self::Loading => f.write_str("LOADING"),
			Self::Loaded => f.write_str("LOADED"),
			Self::Failed(error) => write!(f, "FAILED: {error}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failed_state_carries_error() {
		let state = FeatureState::Failed(LoadError::failed("boom"));

		assert!(!state.is_loaded());
		assert_eq!(state.error(), Some(&LoadError::failed("boom")));
		assert_ne!(state, FeatureState::Loading);
		assert_eq!(state.to_string(), "FAILED: boom");
	}
}
