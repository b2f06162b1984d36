/* tests/serde.rs */

#![cfg(feature = "serde")]

use lazyroute::{FeatureState, LoadError, NavigationState, Redirect};

#[test]
fn feature_state_survives_json() -> Result<(), serde_json::Error> {
	let failed = FeatureState::Failed(LoadError::failed("boom"));

	let json = serde_json::to_string(&failed)?;
	let back: FeatureState = serde_json::from_str(&json)?;

	assert_eq!(back, failed);
	assert_eq!(serde_json::to_string(&FeatureState::NotLoaded)?, "\"NotLoaded\"");
	Ok(())
}

#[test]
fn navigation_state_reads_host_json() -> Result<(), serde_json::Error> {
	let nav: NavigationState =
		serde_json::from_str(r#"{"pathname":"/bar/childpath","params":{"id":"7"}}"#)?;

	assert_eq!(nav.pathname, "/bar/childpath");
	assert_eq!(nav.params.get("id").map(String::as_str), Some("7"));
	assert_eq!(serde_json::to_string(&Redirect::to("/foo"))?, "\"/foo\"");
	Ok(())
}
