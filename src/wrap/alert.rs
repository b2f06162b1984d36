/* src/wrap/alert.rs */

use std::sync::Arc;

use crate::feature::FeatureState;
use crate::route::{Component, Render};
use crate::store::Store;

/// What an alert renderer is told about the feature it stands in for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertProps {
	pub feature_id: String,
	pub feature_name: String,
	/// `None` if the container has no state recorded for the feature.
	pub feature_state: Option<FeatureState>,
}

/// Renders alternate content while a feature is loading or has failed.
pub trait FeatureStateAlert: Send + Sync {
	fn render(&self, props: &AlertProps) -> String;
}

impl<F> FeatureStateAlert for F
where
	F: Fn(&AlertProps) -> String + Send + Sync,
{
	fn render(&self, props: &AlertProps) -> String {
		self(props)
	}
}

/// Reads the live feature state at render time.
pub type FeatureStateFn = Arc<dyn Fn() -> Option<FeatureState> + Send + Sync>;

struct BoundAlert {
	alert: Arc<dyn FeatureStateAlert>,
	feature_id: String,
	feature_name: String,
	select_feature_state: FeatureStateFn,
}

impl Render for BoundAlert {
	fn render(&self) -> String {
		let props = AlertProps {
			feature_id: self.feature_id.clone(),
			feature_name: self.feature_name.clone(),
			feature_state: (self.select_feature_state)(),
		};
		self.alert.render(&props)
	}
}

/// Binds `alert` to the current state of `feature_id` in `store`.
pub fn bind_alert<S, F>(
	alert: Arc<dyn FeatureStateAlert>,
	store: Arc<S>,
	feature_id: impl Into<String>,
	feature_name: impl Into<String>,
	select_feature_state: F,
) -> Component
where
	S: Store,
	F: Fn(&S::State) -> Option<FeatureState> + Send + Sync + 'static,
{
	let select: FeatureStateFn = Arc::new(move || select_feature_state(&store.get_state()));
	bind_alert_with(alert, feature_id, feature_name, select)
}

pub(crate) fn bind_alert_with(
	alert: Arc<dyn FeatureStateAlert>,
	feature_id: impl Into<String>,
	feature_name: impl Into<String>,
	select_feature_state: FeatureStateFn,
) -> Component {
	Component::new(BoundAlert {
		alert,
		feature_id: feature_id.into(),
		feature_name: feature_name.into(),
		select_feature_state,
	})
}
