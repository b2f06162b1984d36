use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::LoadError;
use crate::feature::{FeatureStates, Features};

/// Settles when a dispatched feature load completes.
pub type LoadFuture = BoxFuture<'static, Result<(), LoadError>>;

/// The state container routes are resolved against.
///
/// The container owns features and their load states; this crate only reads
/// snapshots and asks for loads.
pub trait Store: Send + Sync + Sized + 'static {
	type State: Send + Sync + 'static;

	/// Returns the current state snapshot.
	fn get_state(&self) -> Arc<Self::State>;

	/// Dispatches a load for `feature_id`.
	///
	/// Implementations must move the feature to
	/// [`FeatureState::Loading`](crate::FeatureState::Loading) before
	/// returning, so a second caller in the same turn observes the transition
	/// and does not dispatch again. The returned future may be dropped without
	/// cancelling the load on the host side, but hosts that do the work inside
	/// the future itself rely on the caller driving it to completion.
	fn load_feature(&self, feature_id: &str) -> LoadFuture;
}

/// The conventional state shape: features and feature states at the top level.
///
/// The default selectors in [`ConfigBuilder`](crate::ConfigBuilder) read
/// through this trait.
pub trait FeatureContainer<S> {
	fn features(&self) -> Arc<Features<S>>;
	fn feature_states(&self) -> Arc<FeatureStates>;
}
