//! `ObjectAttributesValues` and `ObjectsAttributesValues`: a structure keyed by
//! the requested attribute names.
//!
//! Names come in three shapes: a comma separated string (`"Code, Owner"`),
//! a structure mapping keys to attribute paths, or an array of paths.

use indexmap::IndexMap;
use tracing::debug;

use crate::analysis::value_flow::SourceLiteral;
use crate::analysis::{
    AnalysisContext,
    CallSite,
    InferenceError,
};
use crate::grammar::{
    Expression,
    Spanned,
};
use crate::types::{
    array_ref_types,
    has_kind,
    ref_types,
    DerivedSource,
    Property,
    Type,
    TypeKind,
};
use crate::utils::{
    eq_ignore_case,
    FxIndexMap,
};

use super::{
    settle,
    InvocationTypesComputer,
};

/// A requested key and the attribute path it reads.
#[derive(Debug, Clone, PartialEq)]
struct Request {
    path: String,
    source: Option<DerivedSource>,
}

type Requests = IndexMap<String, Request>;

/// Points a synthesized key back at the literal text that named it.
fn literal_source(call: &CallSite, literal: &SourceLiteral, text: &str) -> DerivedSource {
    // Position inside the literal as written, quotes included.
    let offset = literal.span.start + literal.raw.find(text).unwrap_or(1);
    let method = call.module.method_at(literal.span.start);

    DerivedSource::Literal {
        module_uri: call.module.uri.clone(),
        method_name: method.map(|(method, _)| method.name.0.clone()),
        local_offset: match method {
            Some((_, span)) => offset.saturating_sub(span.start),
            None => offset,
        },
    }
}

fn requests<'m>(call: &CallSite<'m>, cx: &AnalysisContext, names: &'m Spanned<Expression>) -> Requests {
    let types = cx.types_of(call, names);
    let resolver = cx.value_flow(call);
    let mut requests = Requests::default();

    if has_kind(&types, |kind| kind == TypeKind::String) {
        let Some(resolved) = resolver.resolve_value(names) else {
            debug!("{}", InferenceError::UnresolvableContent(names.1));
            return requests;
        };
        let content: String = resolved
            .content
            .trim()
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        for name in content.split(',').filter(|name| !name.is_empty()) {
            requests.insert(
                name.to_string(),
                Request {
                    path: name.to_string(),
                    source: None,
                },
            );
        }
    } else if has_kind(&types, |kind| kind.is_structure()) {
        for (key, entry) in resolver.resolve_structure(names) {
            let source = match &entry.key_literal {
                Some(literal) if !eq_ignore_case(&key, &entry.value) => {
                    // `New Structure("Owner.Code")` names the key by its path.
                    let text = if literal.content.contains(&entry.value) {
                        &entry.value
                    } else {
                        &key
                    };
                    Some(literal_source(call, literal, text))
                }
                _ => None,
            };
            requests.insert(
                key,
                Request {
                    path: entry.value,
                    source,
                },
            );
        }
    } else if has_kind(&types, |kind| kind.is_array()) {
        for entry in resolver.resolve_array(names) {
            let key = entry.content.replace('.', "");
            let source = match &entry.literal {
                Some(literal) if !eq_ignore_case(&key, &entry.content) => {
                    Some(literal_source(call, literal, &entry.content))
                }
                _ => None,
            };
            requests.insert(
                key,
                Request {
                    path: entry.content,
                    source,
                },
            );
        }
    }

    requests
}

/// Follows the remaining path segments below `property`.
fn sub_property(cx: &AnalysisContext, property: &Property, segments: &[String]) -> Option<Property> {
    let (first, rest) = segments.split_first()?;
    let first = first.trim();
    if first.is_empty() {
        return None;
    }

    for (properties, _) in cx.properties.all_properties(&property.types) {
        if let Some(found) = properties.iter().find(|p| p.is_named(first)) {
            return if rest.is_empty() {
                Some(found.clone())
            } else {
                sub_property(cx, found, rest)
            };
        }
    }
    None
}

/// A synthesized key keeps the attribute's names when it matches them,
/// otherwise it is named by the key and linked to the naming literal.
fn property_for(key: &str, found: &Property, literal: Option<DerivedSource>) -> Property {
    let mut property = if found.is_named(key) {
        Property::derived(&found.name, &found.name_ru, found.types.clone(), found.source.clone())
    } else {
        Property::derived(key, key, found.types.clone(), literal)
    };
    property.readable = true;
    property.writable = true;
    property
}

struct Pending {
    key: String,
    rest: Vec<String>,
    source: Option<DerivedSource>,
}

/// Structure with one property per request that resolves on `refs`, in request order.
fn attributes_structure(cx: &AnalysisContext, refs: &[Type], requests: Requests) -> Result<Type, InferenceError> {
    let mut groups: FxIndexMap<String, Vec<Pending>> = FxIndexMap::default();
    for (key, request) in requests.iter() {
        let mut segments = request.path.split('.').map(|s| s.trim().to_string());
        let first = segments.next().unwrap_or_default();
        groups.entry(first.to_lowercase()).or_default().push(Pending {
            key: key.clone(),
            rest: segments.collect(),
            source: request.source.clone(),
        });
    }

    let mut found: IndexMap<String, Property> = IndexMap::default();
    for (properties, _) in cx.properties.all_properties(refs) {
        for property in properties.iter() {
            if groups.is_empty() {
                break;
            }
            let group = [property.name.to_lowercase(), property.name_ru.to_lowercase()]
                .into_iter()
                .find(|name| groups.contains_key(name));
            let Some(group) = group else {
                continue;
            };
            let Some(pending) = groups.get_mut(&group) else {
                continue;
            };

            pending.retain(|item| {
                let resolved = if item.rest.is_empty() {
                    Some(property.clone())
                } else {
                    sub_property(cx, property, &item.rest)
                };
                match resolved {
                    Some(resolved) => {
                        found.insert(
                            item.key.clone(),
                            property_for(&item.key, &resolved, item.source.clone()),
                        );
                        false
                    }
                    None => true,
                }
            });
            if pending.is_empty() {
                groups.shift_remove(&group);
            }
        }
    }

    for (name, pending) in groups.iter() {
        if !pending.is_empty() {
            debug!("{}", InferenceError::UnknownPathSegment(name.clone()));
        }
    }

    let properties: Vec<Property> = requests
        .keys()
        .filter_map(|key| found.shift_remove(key))
        .collect();
    cx.synthesizer().build_structure(properties.iter(), false)
}

/// `Common.ObjectAttributesValues(Ref, "Code, Description")`
#[derive(Debug)]
pub struct ObjectAttributesValues;

impl InvocationTypesComputer for ObjectAttributesValues {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() >= 2
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let (Some(object), Some(names)) = (call.param(0), call.param(1)) else {
            return vec![];
        };
        let refs = ref_types(&cx.types_of(call, object));
        if refs.is_empty() {
            return vec![];
        }

        let requests = requests(call, cx, names);
        if requests.is_empty() {
            return vec![];
        }
        settle(attributes_structure(cx, &refs, requests))
    }
}

/// `Common.ObjectsAttributesValues(Refs, "Code")`: a map from each ref to its structure.
#[derive(Debug)]
pub struct ObjectsAttributesValues;

impl InvocationTypesComputer for ObjectsAttributesValues {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() >= 2
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let (Some(objects), Some(names)) = (call.param(0), call.param(1)) else {
            return vec![];
        };
        let refs = array_ref_types(&cx.types_of(call, objects));
        if refs.is_empty() {
            return vec![];
        }

        let requests = requests(call, cx, names);
        if requests.is_empty() {
            return vec![];
        }
        let map = attributes_structure(cx, &refs, requests)
            .and_then(|structure| cx.synthesizer().build_map(&refs, &[structure], false));
        settle(map)
    }
}
