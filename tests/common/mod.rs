/* tests/common/mod.rs */

#![allow(dead_code)]

pub mod router;
pub mod store;

use lazyroute::{AlertProps, FeatureState};

/// Alert used across tests: distinguishes failure from loading.
pub fn loading_alert(props: &AlertProps) -> String {
	match &props.feature_state {
		Some(FeatureState::Failed(e)) => format!("Failed to load {}: {e}", props.feature_name),
		Some(FeatureState::Loading) => format!("Loading {}...", props.feature_name),
		_ => String::new(),
	}
}
