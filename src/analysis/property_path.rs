use tracing::debug;

use crate::host::PropertyUniverse;
use crate::types::{
    Type,
    TypeKind,
};

use super::InferenceError;

fn push_unique(types: &mut Vec<Type>, ty: &Type) {
    if !types.contains(ty) {
        types.push(ty.clone());
    }
}

/// Replaces type sets by their members.
fn expand_type_sets(types: &[Type]) -> Vec<Type> {
    let mut expanded = vec![];
    for ty in types {
        if ty.kind() == TypeKind::TypeSet {
            for member in expand_type_sets(&ty.element_types) {
                push_unique(&mut expanded, &member);
            }
        } else {
            push_unique(&mut expanded, ty);
        }
    }
    expanded
}

/// Walks dotted property chains over the property universe.
#[derive(Debug, Clone, Copy)]
pub struct PropertyPathResolver<'h> {
    universe: &'h dyn PropertyUniverse,
}

impl<'h> PropertyPathResolver<'h> {
    pub fn new(universe: &'h dyn PropertyUniverse) -> Self {
        PropertyPathResolver { universe }
    }

    /// Types reached by following `path` from `base`.
    ///
    /// Every property matching a segment contributes its types, across all
    /// owning types. Untyped properties are skipped. An unmatched segment
    /// ends the walk with nothing.
    pub fn resolve(&self, base: &[Type], path: &[&str]) -> Vec<Type> {
        let Some((segment, rest)) = path.split_first() else {
            return vec![];
        };

        let expanded = expand_type_sets(base);
        let mut found = vec![];
        for (properties, _) in self.universe.all_properties(&expanded) {
            for property in properties
                .iter()
                .filter(|p| !p.types.is_empty() && p.is_named(segment))
            {
                for ty in property.types.iter() {
                    push_unique(&mut found, ty);
                }
            }
        }

        if found.is_empty() {
            debug!("{}", InferenceError::UnknownPathSegment(segment.to_string()));
            return vec![];
        }
        if rest.is_empty() {
            found
        } else {
            self.resolve(&found, rest)
        }
    }

    /// Same as [`resolve`](Self::resolve) for a path written as text (`Owner.Code`).
    pub fn resolve_text(&self, base: &[Type], path: &str) -> Vec<Type> {
        let path: String = path
            .trim()
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        if path.is_empty() {
            return vec![];
        }

        let segments: Vec<&str> = path.split('.').collect();
        self.resolve(base, &segments)
    }
}
