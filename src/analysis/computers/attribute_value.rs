use tracing::debug;

use crate::analysis::{
    AnalysisContext,
    CallSite,
    InferenceError,
};
use crate::types::{
    array_ref_types,
    ref_types,
    Type,
};

use super::{
    settle,
    InvocationTypesComputer,
};

/// Types reached by the attribute path in the second argument, or nothing
/// when the path content is not statically known.
fn path_types(call: &CallSite, cx: &AnalysisContext, refs: &[Type]) -> Vec<Type> {
    let Some(path) = call.param(1) else {
        return vec![];
    };
    let Some(resolved) = cx.value_flow(call).resolve_value(path) else {
        debug!("{}", InferenceError::UnresolvableContent(path.1));
        return vec![];
    };

    cx.paths().resolve_text(refs, &resolved.content)
}

/// `Common.ObjectAttributeValue(Ref, "Owner.Code")`
#[derive(Debug)]
pub struct ObjectAttributeValue;

impl InvocationTypesComputer for ObjectAttributeValue {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() >= 2
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(object) = call.param(0) else {
            return vec![];
        };
        let refs = ref_types(&cx.types_of(call, object));
        if refs.is_empty() {
            return vec![];
        }

        path_types(call, cx, &refs)
    }
}

/// `Common.ObjectsAttributeValue(Refs, "Code")`: a map from each ref to the attribute.
#[derive(Debug)]
pub struct ObjectsAttributeValue;

impl InvocationTypesComputer for ObjectsAttributeValue {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() >= 2
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(objects) = call.param(0) else {
            return vec![];
        };
        let refs = array_ref_types(&cx.types_of(call, objects));
        if refs.is_empty() {
            return vec![];
        }

        let values = path_types(call, cx, &refs);
        if values.is_empty() {
            return vec![];
        }
        settle(cx.synthesizer().build_map(&refs, &values, false))
    }
}
