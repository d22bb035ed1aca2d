//! Mock drawable and render target for tests.
//!
//! MockTarget records every render call (name and resolved transform) so
//! tests can assert on the exact draw sequence. MockDrawable exposes its
//! bounds and hidden flag through shared `Rc<Cell<_>>` handles, letting a
//! test mutate an object after the Scene has taken ownership of it.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use glam::Affine2;
use crate::error::Result;
use super::drawable::{Aabb, Capabilities, Drawable, DrawableKey, RenderTarget};

/// Render target that records draw invocations in order.
pub struct MockTarget {
    drawn: Vec<(String, Affine2)>,
}

impl MockTarget {
    pub fn new() -> Self {
        Self { drawn: Vec::new() }
    }

    /// Names of rendered drawables, in draw order
    pub fn names(&self) -> Vec<&str> {
        self.drawn.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Full draw log (name, resolved transform)
    pub fn drawn(&self) -> &[(String, Affine2)] {
        &self.drawn
    }

    /// Resolved transform a named drawable was rendered with
    pub fn transform_of(&self, name: &str) -> Option<Affine2> {
        self.drawn
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, transform)| transform)
    }
}

impl Default for MockTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for MockTarget {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Configurable drawable for tests.
pub struct MockDrawable {
    name: String,
    bounds: Rc<Cell<Aabb>>,
    hidden: Rc<Cell<bool>>,
    parent: Option<DrawableKey>,
    local_transform: Affine2,
}

impl MockDrawable {
    pub fn new(name: &str, bounds: Aabb) -> Self {
        Self {
            name: name.to_string(),
            bounds: Rc::new(Cell::new(bounds)),
            hidden: Rc::new(Cell::new(false)),
            parent: None,
            local_transform: Affine2::IDENTITY,
        }
    }

    /// Attach to a parent already inserted into the scene
    pub fn with_parent(mut self, parent: DrawableKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Start out hidden
    pub fn with_hidden(self, hidden: bool) -> Self {
        self.hidden.set(hidden);
        self
    }

    /// Use a non-identity local transform
    pub fn with_transform(mut self, transform: Affine2) -> Self {
        self.local_transform = transform;
        self
    }

    /// Shared handle for mutating bounds after insertion
    pub fn bounds_handle(&self) -> Rc<Cell<Aabb>> {
        self.bounds.clone()
    }

    /// Shared handle for toggling the hidden flag after insertion
    pub fn hidden_handle(&self) -> Rc<Cell<bool>> {
        self.hidden.clone()
    }
}

impl Drawable for MockDrawable {
    fn bounding_box(&self) -> Aabb {
        self.bounds.get()
    }

    fn render(&self, transform: &Affine2, target: &mut dyn RenderTarget) -> Result<()> {
        if let Some(mock) = target.as_any_mut().downcast_mut::<MockTarget>() {
            mock.drawn.push((self.name.clone(), *transform));
        }
        Ok(())
    }

    fn parent(&self) -> Option<DrawableKey> {
        self.parent
    }

    fn hidden(&self) -> bool {
        self.hidden.get()
    }

    fn local_transform(&self) -> Affine2 {
        self.local_transform
    }

    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::HIDER;
        if self.parent.is_some() {
            caps |= Capabilities::PARENTED;
        }
        if self.local_transform != Affine2::IDENTITY {
            caps |= Capabilities::TRANSFORMER;
        }
        caps
    }
}
