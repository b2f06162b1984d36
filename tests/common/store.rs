/* tests/common/store.rs */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;
use futures_util::FutureExt;
use futures_util::future;
use lazyroute::{
	Feature, FeatureContainer, FeatureState, FeatureStates, Features, LoadError, LoadFuture, Store,
};
use tokio::sync::broadcast;

/// Container state: features and their states at the top level, plus one
/// piece of application data.
#[derive(Clone)]
pub struct AppState {
	pub features: Arc<Features<MemoryStore>>,
	pub feature_states: Arc<FeatureStates>,
	pub counter: i64,
}

impl FeatureContainer<MemoryStore> for AppState {
	fn features(&self) -> Arc<Features<MemoryStore>> {
		Arc::clone(&self.features)
	}

	fn feature_states(&self) -> Arc<FeatureStates> {
		Arc::clone(&self.feature_states)
	}
}

/// Load transitions, in the order the container applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
	Loading(String),
	Loaded(String),
	Failed(String, LoadError),
}

struct Inner {
	state: ArcSwap<AppState>,
	dispatches: Mutex<HashMap<String, usize>>,
	events: broadcast::Sender<StoreEvent>,
}

impl Inner {
	fn update(&self, f: impl Fn(&AppState) -> AppState) {
		self.state.rcu(|current| f(current));
	}

	fn set_feature_state(&self, feature_id: &str, feature_state: FeatureState) {
		self.update(|current| {
			let mut states = (*current.feature_states).clone();
			states.insert(feature_id.to_string(), feature_state.clone());
			AppState {
				feature_states: Arc::new(states),
				..current.clone()
			}
		});
	}

	fn finish_load(&self, feature_id: &str, loaded: Feature<MemoryStore>) {
		let loaded = Arc::new(loaded);
		self.update(|current| {
			let mut features = (*current.features).clone();
			features.insert(feature_id.to_string(), Arc::clone(&loaded));
			let mut states = (*current.feature_states).clone();
			states.insert(feature_id.to_string(), FeatureState::Loaded);
			AppState {
				features: Arc::new(features),
				feature_states: Arc::new(states),
				..current.clone()
			}
		});
	}
}

/// In-memory feature container for tests.
///
/// `load_feature` moves the feature to `Loading` synchronously; the returned
/// future runs the feature's loader and records the outcome.
pub struct MemoryStore {
	inner: Arc<Inner>,
}

impl MemoryStore {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			inner: Arc::new(Inner {
				state: ArcSwap::from_pointee(AppState {
					features: Arc::default(),
					feature_states: Arc::default(),
					counter: 1,
				}),
				dispatches: Mutex::new(HashMap::new()),
				events: broadcast::channel(64).0,
			}),
		})
	}

	pub fn add_feature(&self, feature_id: &str, feature: Feature<MemoryStore>) {
		let feature = Arc::new(feature);
		self.inner.update(|current| {
			let mut features = (*current.features).clone();
			features.insert(feature_id.to_string(), Arc::clone(&feature));
			let mut states = (*current.feature_states).clone();
			states.insert(feature_id.to_string(), FeatureState::NotLoaded);
			AppState {
				features: Arc::new(features),
				feature_states: Arc::new(states),
				..current.clone()
			}
		});
	}

	/// Replaces a registered feature without touching its state.
	pub fn replace_feature(&self, feature_id: &str, feature: Feature<MemoryStore>) {
		let feature = Arc::new(feature);
		self.inner.update(|current| {
			let mut features = (*current.features).clone();
			features.insert(feature_id.to_string(), Arc::clone(&feature));
			AppState {
				features: Arc::new(features),
				..current.clone()
			}
		});
	}

	pub fn remove_feature(&self, feature_id: &str) {
		self.inner.update(|current| {
			let mut features = (*current.features).clone();
			features.shift_remove(feature_id);
			AppState {
				features: Arc::new(features),
				..current.clone()
			}
		});
	}

	pub fn set_counter(&self, counter: i64) {
		self.inner.update(|current| AppState {
			counter,
			..current.clone()
		});
	}

	pub fn feature_state(&self, feature_id: &str) -> Option<FeatureState> {
		self.get_state().feature_states.get(feature_id).cloned()
	}

	/// Number of `load_feature` calls received for `feature_id`.
	pub fn dispatch_count(&self, feature_id: &str) -> usize {
		let dispatches = self.inner.dispatches.lock().unwrap();
		dispatches.get(feature_id).copied().unwrap_or(0)
	}

	pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
		self.inner.events.subscribe()
	}

	/// Waits until `feature_id` reports loaded or failed.
	pub async fn settled(rx: &mut broadcast::Receiver<StoreEvent>, feature_id: &str) -> StoreEvent {
		loop {
			let event = rx.recv().await.unwrap();
			let id = match &event {
				StoreEvent::Loaded(id) | StoreEvent::Failed(id, _) => id,
				StoreEvent::Loading(_) => continue,
			};
			if id == feature_id {
				return event;
			}
		}
	}
}

impl Store for MemoryStore {
	type State = AppState;

	fn get_state(&self) -> Arc<AppState> {
		self.inner.state.load_full()
	}

	fn load_feature(&self, feature_id: &str) -> LoadFuture {
		*self
			.inner
			.dispatches
			.lock()
			.unwrap()
			.entry(feature_id.to_string())
			.or_default() += 1;

		let state = self.get_state();
		let Some(feature) = state.features.get(feature_id).cloned() else {
			let feature_id = feature_id.to_string();
			return future::ready(Err(LoadError::NotRegistered { feature_id })).boxed();
		};
		if state.feature_states.get(feature_id) != Some(&FeatureState::NotLoaded) {
			return future::ready(Ok(())).boxed();
		}

		self.inner.set_feature_state(feature_id, FeatureState::Loading);
		let _ = self.inner.events.send(StoreEvent::Loading(feature_id.to_string()));

		let inner = Arc::clone(&self.inner);
		let feature_id = feature_id.to_string();
		async move {
			let result = match &feature.load {
				Some(load) => load().await,
				None => Ok((*feature).clone()),
			};
			match result {
				Ok(loaded) => {
					inner.finish_load(&feature_id, loaded);
					let _ = inner.events.send(StoreEvent::Loaded(feature_id));
					Ok(())
				}
				Err(e) => {
					inner.set_feature_state(&feature_id, FeatureState::Failed(e.clone()));
					let _ = inner.events.send(StoreEvent::Failed(feature_id, e.clone()));
					Err(e)
				}
			}
		}
		.boxed()
	}
}
