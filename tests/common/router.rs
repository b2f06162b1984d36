use lazyroute::{Component, NavigationState, Redirect, Route, RouteError};

const MAX_REDIRECTS: usize = 5;

async fn child_routes(route: &Route, nav: &NavigationState) -> Result<Vec<Route>, RouteError> {
	match &route.get_child_routes {
		Some(accessor) => Ok(accessor(nav).await?.unwrap_or_default()),
		None => Ok(route.child_routes.clone().unwrap_or_default()),
	}
}

async fn index_route(route: &Route, nav: &NavigationState) -> Result<Option<Route>, RouteError> {
	match &route.get_index_route {
		Some(accessor) => accessor(nav).await,
		None => Ok(route.index_route.as_deref().cloned()),
	}
}

async fn component(route: &Route, nav: &NavigationState) -> Result<Option<Component>, RouteError> {
	match &route.get_component {
		Some(accessor) => accessor(nav).await,
		None => Ok(route.component.clone()),
	}
}

fn segment_matches(route: &Route, segment: &str) -> bool {
	matches!(route.path.as_deref(), Some(path) if path == segment || path == "*")
}

/// Matches `nav` against `root`, returning the chain of matched routes from
/// the root down, ending with the leaf's index route if it has one.
pub async fn match_routes(root: &Route, nav: &NavigationState) -> Result<Vec<Route>, RouteError> {
	let mut chain = vec![root.clone()];
	for segment in nav.pathname.split('/').filter(|s| !s.is_empty()) {
		let parent = chain.last().cloned().unwrap_or_default();
		let next = child_routes(&parent, nav)
			.await?
			.into_iter()
			.find(|route| segment_matches(route, segment))
			.ok_or_else(|| RouteError::Navigation(format!("no route matches {}", nav.pathname)))?;
		chain.push(next);
	}
	let leaf = chain.last().cloned().unwrap_or_default();
	if let Some(index) = index_route(&leaf, nav).await? {
		chain.push(index);
	}
	Ok(chain)
}

/// Resolves `pathname` the way a router would and renders the deepest
/// matched component. Enter hooks run top-down and may redirect.
pub async fn render(root: &Route, pathname: &str) -> Result<String, RouteError> {
	let mut location = pathname.to_string();
	for _ in 0..MAX_REDIRECTS {
		let nav = NavigationState::new(location.clone());
		let matched = match_routes(root, &nav).await?;

		let mut redirect = None;
		for route in &matched {
			if let Some(hook) = &route.on_enter
				&& let Some(to) = hook(&nav).await?
			{
				redirect = Some(to);
				break;
			}
		}
		if let Some(Redirect(to)) = redirect {
			location = to;
			continue;
		}

		for route in matched.iter().rev() {
			if let Some(view) = component(route, &nav).await? {
				return Ok(view.render());
			}
		}
		return Ok(String::new());
	}
	Err(RouteError::Navigation(format!("too many redirects from {pathname}")))
}
