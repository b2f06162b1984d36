/* src/route/component.rs */

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Something the host's rendering layer can paint.
///
/// The crate never renders; it only hands components to the router. Any
/// `Fn() -> String + Send + Sync` closure is a renderer.
pub trait Render: Send + Sync {
	fn render(&self) -> String;
}

impl<F> Render for F
where
	F: Fn() -> String + Send + Sync,
{
	fn render(&self) -> String {
		self()
	}
}

/// A shared handle to a renderer. Cloning shares the same renderer.
#[derive(Clone)]
pub struct Component(Arc<dyn Render>);

impl Component {
	pub fn new(render: impl Render + 'static) -> Self {
		Self(Arc::new(render))
	}

	/// A component that always renders `text`.
	pub fn text(text: impl Into<String>) -> Self {
		let text = text.into();
		Self::new(move || text.clone())
	}

	pub fn render(&self) -> String {
		self.0.render()
	}

	/// Returns true if both handles point at the same renderer.
	pub fn ptr_eq(&self, other: &Component) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Component")
			.field(&Arc::as_ptr(&self.0).cast::<()>())
			.finish()
	}
}

/// Named-slot components of a route.
pub type Components = IndexMap<String, Component>;
