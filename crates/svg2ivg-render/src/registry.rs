//! Id-keyed definitions collected during traversal.
//!
//! Gradients and patterns live in their own maps so a paint reference can check them before
//! falling back to plain definitions. The last registration for an id wins.

use crate::gradient::GradientSpec;
use crate::pattern::PatternSpec;
use rustc_hash::FxHashMap;
use svg2ivg_core::Node;

/// A registered element: a structural copy of the node, plus the pre-rendered body when the node
/// is a `<mask>`.
#[derive(Debug, Clone)]
pub struct Definition {
    pub node: Node,
    pub mask_body: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    gradients: FxHashMap<String, GradientSpec>,
    patterns: FxHashMap<String, PatternSpec>,
    definitions: FxHashMap<String, Definition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, id: &str, node: Node) {
        tracing::debug!(id, element = %node.name, "registered definition");
        self.definitions.insert(
            id.to_string(),
            Definition {
                node,
                mask_body: None,
            },
        );
    }

    /// Attaches a rendered mask body to the definition registered under `id`.
    pub fn set_mask_body(&mut self, id: &str, node: &Node, body: Vec<String>) {
        self.definitions
            .entry(id.to_string())
            .or_insert_with(|| Definition {
                node: node.clone(),
                mask_body: None,
            })
            .mask_body = Some(body);
    }

    pub fn insert_gradient(&mut self, id: &str, gradient: GradientSpec) {
        tracing::debug!(id, stops = gradient.stops.len(), "registered gradient");
        self.gradients.insert(id.to_string(), gradient);
    }

    pub fn insert_pattern(&mut self, id: &str, pattern: PatternSpec) {
        tracing::debug!(id, "registered pattern");
        self.patterns.insert(id.to_string(), pattern);
    }

    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.definitions.get(id)
    }

    pub fn gradient(&self, id: &str) -> Option<&GradientSpec> {
        self.gradients.get(id)
    }

    pub fn pattern(&self, id: &str) -> Option<&PatternSpec> {
        self.patterns.get(id)
    }
}
