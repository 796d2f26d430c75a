use crate::analysis::{
    AnalysisContext,
    CallSite,
};
use crate::types::{
    Type,
    TypeKind,
};

use super::{
    settle,
    InvocationTypesComputer,
};

/// `Common.FixedData(Value)`: fixed counterparts of mutable structures, maps and arrays.
#[derive(Debug)]
pub struct FixedData;

impl InvocationTypesComputer for FixedData {
    fn accepts(&self, call: &CallSite) -> bool {
        call.param_count() == 1
    }

    fn compute(&self, call: &CallSite, cx: &AnalysisContext) -> Vec<Type> {
        let Some(source) = call.param(0) else {
            return vec![];
        };

        let synthesizer = cx.synthesizer();
        cx.types_of(call, source)
            .iter()
            .filter(|ty| {
                matches!(
                    ty.kind(),
                    TypeKind::Structure | TypeKind::Map | TypeKind::Array
                )
            })
            .flat_map(|ty| settle(synthesizer.transform(ty, true)))
            .collect()
    }
}
