use crate::renderer::Renderer;
use std::collections::{BTreeMap, BTreeSet};

/// A named shape kind and the routine that draws it.
#[derive(Debug, Clone)]
pub struct ShapeDefinition {
    pub name: String,
    pub renderer: Renderer,
}

/// Lookup failed: no shape registered under this name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape: {0}")]
pub struct UnknownShapeError(pub String);

/// Maps shape tokens to renderers.
///
/// The registry is the only source of truth for which shapes exist.
/// Entities clone the renderer out of it at spawn time, so later
/// re-registration affects future spawns only.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    definitions: BTreeMap<String, ShapeDefinition>,
}

impl ShapeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding circle, square, triangle and dinosaur.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("circle", Renderer::Circle);
        registry.register("square", Renderer::Square);
        registry.register("triangle", Renderer::Triangle);
        registry.register("dinosaur", Renderer::Dinosaur);
        registry
    }

    /// Register `renderer` under `name`, replacing any previous definition.
    pub fn register(&mut self, name: impl Into<String>, renderer: Renderer) {
        let name = name.into();
        let previous = self.definitions.insert(
            name.clone(),
            ShapeDefinition {
                name: name.clone(),
                renderer,
            },
        );
        if previous.is_some() {
            tracing::debug!(shape = %name, "replaced shape definition");
        } else {
            tracing::debug!(shape = %name, "registered shape");
        }
    }

    /// Look up the renderer for `name`.
    pub fn resolve(&self, name: &str) -> Result<Renderer, UnknownShapeError> {
        self.definitions
            .get(name)
            .map(|def| def.renderer.clone())
            .ok_or_else(|| UnknownShapeError(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Names of all registered shapes.
    pub fn list_names(&self) -> BTreeSet<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = ShapeRegistry::with_builtins();
        let names: Vec<String> = registry.list_names().into_iter().collect();
        assert_eq!(names, vec!["circle", "dinosaur", "square", "triangle"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn register_then_resolve_returns_same_renderer() {
        let mut registry = ShapeRegistry::new();
        let star = Renderer::custom(|_, _, _| {});
        registry.register("star", star.clone());
        assert_eq!(registry.resolve("star").unwrap(), star);
    }

    #[test]
    fn resolve_unknown_fails() {
        let registry = ShapeRegistry::with_builtins();
        let err = registry.resolve("hexagon").unwrap_err();
        assert_eq!(err, UnknownShapeError("hexagon".into()));
        assert_eq!(err.to_string(), "unknown shape: hexagon");
    }

    #[test]
    fn register_overwrites() {
        let mut registry = ShapeRegistry::with_builtins();
        registry.register("circle", Renderer::Square);
        assert_eq!(registry.resolve("circle").unwrap(), Renderer::Square);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn overwrite_does_not_touch_resolved_clone() {
        let mut registry = ShapeRegistry::new();
        let first = Renderer::custom(|_, _, _| {});
        registry.register("blob", first.clone());
        let held = registry.resolve("blob").unwrap();
        registry.register("blob", Renderer::Circle);
        assert_eq!(held, first);
        assert_eq!(registry.resolve("blob").unwrap(), Renderer::Circle);
    }

    #[test]
    fn empty_registry() {
        let registry = ShapeRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("circle"));
        assert!(registry.list_names().is_empty());
    }
}
