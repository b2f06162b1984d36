/* src/error.rs */

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Failure reported by a feature's load capability.
///
/// The container stores this value as [`FeatureState::Failed`](crate::FeatureState::Failed),
/// so it must stay cheap to clone and comparable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoadError {
	/// The load capability rejected.
	#[error("{0}")]
	Failed(String),
	/// No feature is registered under the requested identifier.
	#[error("feature not registered: {feature_id}")]
	NotRegistered { feature_id: String },
}

impl LoadError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// Errors surfaced to the router through an accessor or hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
	/// A feature failed to load while a server render waited on it.
	#[error("failed to load feature `{feature_id}`: {source}")]
	Load {
		feature_id: String,
		#[source]
		source: LoadError,
	},

	/// Wrapper options were incomplete or contradictory.
	#[error("builder error: {0}")]
	Builder(String),

	/// Raised by a host-supplied accessor or hook.
	#[error("navigation error: {0}")]
	Navigation(String),
}
