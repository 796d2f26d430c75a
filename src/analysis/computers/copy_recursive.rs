use tracing::debug;

use crate::analysis::{
    AnalysisContext,
    CallSite,
};
use crate::grammar::Expression;
use crate::types::Type;

use super::InvocationTypesComputer;

/// `Common.CopyRecursive(Value[, FixData])`
///
/// A copy has the type of its source. A boolean literal as the second
/// argument converts structures, maps and arrays to that fixedness.
#[derive(Debug)]
pub struct CopyRecursive;

impl InvocationTypesComputer for CopyRecursive {
    fn accepts(&self, call: &CallSite) -> bool {
        (1..=2).contains(&call.param_count())
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(source) = call.param(0) else {
            return vec![];
        };
        let types = cx.types_of(call, source);

        let fixed = match call.param(1).map(|param| &param.0) {
            Some(Expression::Boolean(fixed)) => *fixed,
            _ => return types,
        };

        let synthesizer = cx.synthesizer();
        types
            .into_iter()
            .map(|ty| match synthesizer.transform(&ty, fixed) {
                Ok(transformed) => transformed,
                Err(err) => {
                    debug!("Keeping {ty}: {err}");
                    ty
                }
            })
            .collect()
    }
}
