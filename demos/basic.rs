/* demos/basic.rs */

use std::sync::Arc;

use arc_swap::ArcSwap;
use futures_util::FutureExt;
use futures_util::future;
use lazyroute::route::Accessor;
use lazyroute::{
	AlertProps, Component, Config, Feature, FeatureContainer, FeatureState, FeatureStates,
	Features, LoadError, LoadFuture, NavigationState, Route, RouteError, Store, create,
};
use tokio::sync::Notify;

#[derive(Default)]
struct AppState {
	features: Arc<Features<AppStore>>,
	feature_states: Arc<FeatureStates>,
}

impl FeatureContainer<AppStore> for AppState {
	fn features(&self) -> Arc<Features<AppStore>> {
		Arc::clone(&self.features)
	}

	fn feature_states(&self) -> Arc<FeatureStates> {
		Arc::clone(&self.feature_states)
	}
}

struct AppStore {
	state: Arc<ArcSwap<AppState>>,
}

impl AppStore {
	fn new() -> Arc<Self> {
		Arc::new(Self {
			state: Arc::new(ArcSwap::from_pointee(AppState::default())),
		})
	}

	fn register(&self, feature_id: &str, feature: Feature<AppStore>) {
		update(&self.state, feature_id, Some(Arc::new(feature)), FeatureState::NotLoaded);
	}
}

fn update(
	state: &ArcSwap<AppState>,
	feature_id: &str,
	feature: Option<Arc<Feature<AppStore>>>,
	feature_state: FeatureState,
) {
	state.rcu(|current| {
		let mut features = (*current.features).clone();
		if let Some(feature) = &feature {
			features.insert(feature_id.to_string(), Arc::clone(feature));
		}
		let mut states = (*current.feature_states).clone();
		states.insert(feature_id.to_string(), feature_state.clone());
		AppState {
			features: Arc::new(features),
			feature_states: Arc::new(states),
		}
	});
}

impl Store for AppStore {
	type State = AppState;

	fn get_state(&self) -> Arc<AppState> {
		self.state.load_full()
	}

	fn load_feature(&self, feature_id: &str) -> LoadFuture {
		let current = self.get_state();
		let Some(feature) = current.features.get(feature_id).cloned() else {
			return future::ready(Ok(())).boxed();
		};
		if current.feature_states.get(feature_id) != Some(&FeatureState::NotLoaded) {
			return future::ready(Ok(())).boxed();
		}
		update(&self.state, feature_id, None, FeatureState::Loading);

		let state = Arc::clone(&self.state);
		let feature_id = feature_id.to_string();
		async move {
			let loaded = match &feature.load {
				Some(load) => load().await,
				None => Ok((*feature).clone()),
			};
			match loaded {
				Ok(loaded) => {
					update(&state, &feature_id, Some(Arc::new(loaded)), FeatureState::Loaded);
					Ok(())
				}
				Err(e) => {
					update(&state, &feature_id, None, FeatureState::Failed(e.clone()));
					Err(e)
				}
			}
		}
		.boxed()
	}
}

/// Finds `/home` among the feature routes and renders it.
async fn render(
	get_child_routes: &Accessor<Option<Vec<Route>>>,
	nav: &NavigationState,
) -> Result<String, RouteError> {
	let routes = get_child_routes(nav).await?.unwrap_or_default();
	let Some(route) = routes.into_iter().find(|r| r.path.as_deref() == Some("home")) else {
		return Ok("not found".to_string());
	};
	if let Some(get_index_route) = &route.get_index_route {
		get_index_route(nav).await?;
	}
	let view = match &route.get_component {
		Some(get_component) => get_component(nav).await?,
		None => route.component.clone(),
	};
	Ok(view.map(|view| view.render()).unwrap_or_default())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let store = AppStore::new();
	store.register(
		"home",
		Feature::new(Route::with_path("home")).with_loader(|| {
			let home = Route::with_path("home").component(Component::text("Welcome home"));
			future::ready(Ok::<_, LoadError>(Feature::new(home))).boxed()
		}),
	);

	let rematched = Arc::new(Notify::new());
	let notify = Arc::clone(&rematched);
	let config = Config::builder()
		.feature_state_alert(|props: &AlertProps| match &props.feature_state {
			Some(state) => format!("{} is {state}", props.feature_name),
			None => format!("{} is unknown", props.feature_name),
		})
		.rematch_routes(move |_: &Arc<AppStore>| notify.notify_one())
		.build();

	let adapter = create(config);
	let get_child_routes = adapter.get_child_routes(Arc::clone(&store), |feature: &Feature<AppStore>| {
		feature.root_routes.clone()
	});

	let nav = NavigationState::new("/home");
	println!("{}", render(&get_child_routes, &nav).await?);

	// The load settles in the background and asks for a re-match.
	rematched.notified().await;
	println!("{}", render(&get_child_routes, &nav).await?);
	Ok(())
}
