//! Schema Resolution and Path Navigation
//!
//! This module locates the schema node governing a field path:
//!
//! - Reference resolution: `#/definitions/<name>[/...]` pointers are looked
//!   up in the root model's definitions table, chasing chains of references
//!   (self- and mutually-referential definitions included)
//! - Path navigation: dotted paths descend through `properties` and `items`
//!
//! # Degradation, Not Errors
//!
//! Resolution never fails the surrounding update. A malformed or dangling
//! pointer, a missing definitions table, or a reference cycle degrades to
//! the empty schema node ("no schema known") with a warning reported through
//! the injected [`Diagnostics`] sink. Navigating past the shape the schema
//! describes degrades silently - that is an ordinary miss, not a defect in
//! the schema.
//!
//! # Cycle Guard
//!
//! Every public entry point starts a fresh visited-pointer set; revisiting a
//! pointer inside one resolution chain means the definitions are cyclic at
//! that point and resolution degrades instead of recursing unboundedly.

use crate::models::{FieldPath, SchemaNode, SchemaShape, DEFINITIONS_PREFIX};
use crate::services::diagnostics::Diagnostics;
use std::collections::{BTreeMap, HashSet};

/// Resolves references and navigates field paths against one root model.
///
/// Borrows the root model's definitions table for the duration of an update;
/// construct one per operation via [`SchemaResolver::for_model`].
pub struct SchemaResolver<'a> {
    definitions: Option<&'a BTreeMap<String, SchemaNode>>,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> SchemaResolver<'a> {
    /// Create a resolver over the given root model's definitions table.
    pub fn for_model(model: &'a SchemaNode, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            definitions: model.definitions.as_ref(),
            diagnostics,
        }
    }

    /// Resolve a `#/definitions/<name>[/...]` pointer to a schema node.
    ///
    /// Extra pointer segments past the name navigate into the matched
    /// definition. Any degradation (malformed pointer, missing table,
    /// dangling name, cycle) yields the empty node.
    pub fn resolve_reference(&self, pointer: &str) -> SchemaNode {
        self.resolve_guarded(pointer, &mut HashSet::new())
    }

    /// Walk `segments` down `node`, returning the schema governing the
    /// addressed location. Fails closed to the empty node when the path
    /// outruns the described shape.
    pub fn locate(&self, segments: &[&str], node: &SchemaNode) -> SchemaNode {
        self.locate_guarded(segments, node, &mut HashSet::new())
    }

    /// Top-level entry: the schema node governing `path` under `model`.
    ///
    /// A root-level reference resolves directly, ignoring the path; the root
    /// path returns the model unchanged; anything else navigates segment by
    /// segment.
    pub fn find_schema(&self, path: &FieldPath, model: &SchemaNode) -> SchemaNode {
        if let SchemaShape::Reference(pointer) = model.shape() {
            return self.resolve_reference(pointer);
        }
        if path.is_root() {
            return model.clone();
        }
        let segments: Vec<&str> = path.segments().iter().map(String::as_str).collect();
        self.locate(&segments, model)
    }

    fn resolve_guarded(&self, pointer: &str, visited: &mut HashSet<String>) -> SchemaNode {
        if !visited.insert(pointer.to_string()) {
            self.diagnostics
                .warn(&format!("Reference cycle at '{pointer}', treating as unknown schema"));
            return SchemaNode::empty();
        }

        let Some(definitions) = self.definitions else {
            self.diagnostics
                .warn(&format!("Cannot resolve '{pointer}': model has no definitions table"));
            return SchemaNode::empty();
        };

        let name_and_subpath = pointer
            .strip_prefix(DEFINITIONS_PREFIX)
            .filter(|rest| !rest.is_empty());
        let Some(name_and_subpath) = name_and_subpath else {
            self.diagnostics.warn(&format!(
                "Malformed reference '{pointer}': expected '{DEFINITIONS_PREFIX}<name>'"
            ));
            return SchemaNode::empty();
        };

        let mut parts = name_and_subpath.split('/');
        let name = parts.next().unwrap_or_default();
        let Some(definition) = definitions.get(name) else {
            self.diagnostics
                .warn(&format!("Dangling reference '{pointer}': no definition named '{name}'"));
            return SchemaNode::empty();
        };

        let subpath: Vec<&str> = parts.collect();
        let resolved = if subpath.is_empty() {
            definition.clone()
        } else {
            self.locate_guarded(&subpath, definition, visited)
        };

        // Resolution may surface another reference; chase it within the
        // same guarded chain.
        if let SchemaShape::Reference(next) = resolved.shape() {
            let next = next.to_string();
            return self.resolve_guarded(&next, visited);
        }
        resolved
    }

    fn locate_guarded(
        &self,
        segments: &[&str],
        node: &SchemaNode,
        visited: &mut HashSet<String>,
    ) -> SchemaNode {
        // Reference resolution takes precedence over structural descent;
        // the remaining path is ignored at this level.
        if let SchemaShape::Reference(pointer) = node.shape() {
            return self.resolve_guarded(pointer, visited);
        }

        let Some((head, rest)) = segments.split_first() else {
            return node.clone();
        };

        match node.shape() {
            SchemaShape::Object(properties) => match properties.get(*head) {
                Some(child) => self.locate_guarded(rest, child, visited),
                None => SchemaNode::empty(),
            },
            // The index segment's identity is irrelevant to schema shape.
            SchemaShape::Array(items) => self.locate_guarded(rest, items, visited),
            _ => SchemaNode::empty(),
        }
    }
}
