/* src/config.rs */

//!
//! Options shared by every route produced from one factory.

use std::fmt;
use std::sync::Arc;

use crate::feature::{Feature, FeatureStates, Features};
use crate::store::{FeatureContainer, Store};
use crate::wrap::FeatureStateAlert;

/// Projects a collection out of the container state.
pub type Selector<S, T> = Arc<dyn Fn(&<S as Store>::State) -> Arc<T> + Send + Sync>;

/// Maps `(feature_id, feature)` to a display name.
pub type FeatureNameFn<S> = Arc<dyn Fn(&str, &Feature<S>) -> String + Send + Sync>;

/// Forces the router to re-resolve the current location.
pub type RematchFn<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

/// Shared options, constructed once through [`ConfigBuilder`].
pub struct Config<S: Store> {
	pub(crate) is_server: bool,
	pub(crate) get_feature_states: Selector<S, FeatureStates>,
	pub(crate) get_features: Selector<S, Features<S>>,
	pub(crate) get_feature_name: FeatureNameFn<S>,
	pub(crate) rematch_routes: Option<RematchFn<S>>,
	pub(crate) feature_state_alert: Option<Arc<dyn FeatureStateAlert>>,
}

impl<S> Config<S>
where
	S: Store,
	S::State: FeatureContainer<S>,
{
	pub fn builder() -> ConfigBuilder<S> {
		ConfigBuilder::new()
	}
}

impl<S: Store> Config<S> {
	pub fn is_server(&self) -> bool {
		self.is_server
	}

	pub fn feature_name(&self, feature_id: &str, feature: &Feature<S>) -> String {
		(self.get_feature_name)(feature_id, feature)
	}
}

impl<S: Store> Clone for Config<S> {
	fn clone(&self) -> Self {
		Self {
			is_server: self.is_server,
			get_feature_states: self.get_feature_states.clone(),
			get_features: self.get_features.clone(),
			get_feature_name: self.get_feature_name.clone(),
			rematch_routes: self.rematch_routes.clone(),
			feature_state_alert: self.feature_state_alert.clone(),
		}
	}
}

impl<S> Default for Config<S>
where
	S: Store,
	S::State: FeatureContainer<S>,
{
	fn default() -> Self {
		ConfigBuilder::new().build()
	}
}

impl<S: Store> fmt::Debug for Config<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Config")
			.field("is_server", &self.is_server)
			.field("rematch_routes", &self.rematch_routes.is_some())
			.field("feature_state_alert", &self.feature_state_alert.is_some())
			.finish_non_exhaustive()
	}
}

/// Builder for [`Config`].
pub struct ConfigBuilder<S: Store> {
	is_server: bool,
	get_feature_states: Selector<S, FeatureStates>,
	get_features: Selector<S, Features<S>>,
	get_feature_name: Option<FeatureNameFn<S>>,
	rematch_routes: Option<RematchFn<S>>,
	feature_state_alert: Option<Arc<dyn FeatureStateAlert>>,
}

impl<S> ConfigBuilder<S>
where
	S: Store,
	S::State: FeatureContainer<S>,
{
	/// Starts from the conventional state shape: top-level `features` and
	/// `feature_states`.
	pub fn new() -> Self {
		Self::with_selectors(
			|state: &S::State| state.features(),
			|state: &S::State| state.feature_states(),
		)
	}
}

impl<S> Default for ConfigBuilder<S>
where
	S: Store,
	S::State: FeatureContainer<S>,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<S: Store> ConfigBuilder<S> {
	/// Starts from custom selectors locating the feature and feature-state
	/// collections inside the container state.
	pub fn with_selectors<F, FS>(get_features: F, get_feature_states: FS) -> Self
	where
		F: Fn(&S::State) -> Arc<Features<S>> + Send + Sync + 'static,
		FS: Fn(&S::State) -> Arc<FeatureStates> + Send + Sync + 'static,
	{
		Self {
			is_server: false,
			get_feature_states: Arc::new(get_feature_states),
			get_features: Arc::new(get_features),
			get_feature_name: None,
			rematch_routes: None,
			feature_state_alert: None,
		}
	}

	pub fn is_server(mut self, is_server: bool) -> Self {
		self.is_server = is_server;
		self
	}

	pub fn feature_name<F>(mut self, get_feature_name: F) -> Self
	where
		F: Fn(&str, &Feature<S>) -> String + Send + Sync + 'static,
	{
		self.get_feature_name = Some(Arc::new(get_feature_name));
		self
	}

	/// Ignored when `is_server` is set.
	pub fn rematch_routes<F>(mut self, rematch: F) -> Self
	where
		F: Fn(&Arc<S>) + Send + Sync + 'static,
	{
		self.rematch_routes = Some(Arc::new(rematch));
		self
	}

	pub fn feature_state_alert(mut self, alert: impl FeatureStateAlert + 'static) -> Self {
		self.feature_state_alert = Some(Arc::new(alert));
		self
	}

	pub fn build(self) -> Config<S> {
		let rematch_routes = if self.is_server {
			None
		} else {
			self.rematch_routes
		};

		let get_feature_name: FeatureNameFn<S> = match self.get_feature_name {
			Some(f) => f,
			None => Arc::new(|feature_id: &str, _: &Feature<S>| feature_id.to_string()),
		};

		Config {
			is_server: self.is_server,
			get_feature_states: self.get_feature_states,
			get_features: self.get_features,
			get_feature_name,
			rematch_routes,
			feature_state_alert: self.feature_state_alert,
		}
	}
}
