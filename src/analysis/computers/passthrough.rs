use crate::analysis::{
    AnalysisContext,
    CallSite,
};
use crate::types::Type;

use super::{
    settle,
    InvocationTypesComputer,
};

/// Functions returning a value of their argument's type, such as
/// `CommonClientServer.CollapseArray(Array)`.
#[derive(Debug)]
pub struct Passthrough;

impl InvocationTypesComputer for Passthrough {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        call.param(0)
            .map(|param| cx.types_of(call, param))
            .unwrap_or_default()
    }
}

/// `CommonClientServer.ValueInArray(Value)`: an array holding the argument.
#[derive(Debug)]
pub struct ValueInArray;

impl InvocationTypesComputer for ValueInArray {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(value) = call.param(0) else {
            return vec![];
        };
        let types = cx.types_of(call, value);
        if types.is_empty() {
            return vec![];
        }

        settle(cx.synthesizer().build_array(&types, false))
    }
}
