//! Post-parse linking: method scopes and implicit variable declarations.

use rustc_hash::FxHashSet;

use crate::grammar::{
    Block,
    Expression,
    Module,
    Statement,
};

/// Records method scopes and marks the assignments that implicitly declare variables.
#[tracing::instrument(skip_all, fields(module = %module.name))]
pub fn link_module(module: &mut Module) {
    for (index, (_, span)) in module.methods.iter().enumerate() {
        if span.end > span.start {
            module.scopes.insert(span.start..=span.end - 1, index);
        }
    }

    let module_vars: FxHashSet<String> = module
        .variables
        .iter()
        .map(|(name, _)| name.to_lowercase())
        .collect();

    for (method, _) in module.methods.iter_mut() {
        let mut known = module_vars.clone();
        known.extend(method.params.iter().map(|p| p.name.0.to_lowercase()));
        collect_local_vars(&method.body, &mut known);
        mark_implicit(&mut method.body, &mut known);
    }

    let mut known = module_vars;
    collect_local_vars(&module.statements, &mut known);
    mark_implicit(&mut module.statements, &mut known);
}

fn collect_local_vars(block: &Block, known: &mut FxHashSet<String>) {
    for (stmnt, _) in block.iter() {
        if let Statement::Var(names) = stmnt {
            known.extend(names.iter().map(|(name, _)| name.to_lowercase()));
        }
        for nested in stmnt.blocks() {
            collect_local_vars(nested, known);
        }
    }
}

fn declare(target: &mut Expression, known: &mut FxHashSet<String>) {
    if let Expression::Static(access) = target {
        if known.insert(access.name.to_lowercase()) {
            access.implicit = true;
        }
    }
}

fn mark_implicit(block: &mut Block, known: &mut FxHashSet<String>) {
    for (stmnt, _) in block.iter_mut() {
        match stmnt {
            Statement::Simple(simple) => {
                if simple.right.is_some() {
                    declare(&mut simple.left.0, known);
                }
            }
            Statement::If {
                branches,
                otherwise,
            } => {
                for (_, body) in branches.iter_mut() {
                    mark_implicit(body, known);
                }
                if let Some(body) = otherwise {
                    mark_implicit(body, known);
                }
            }
            Statement::ForEach { variable, body, .. } | Statement::ForTo { variable, body, .. } => {
                declare(&mut variable.0, known);
                mark_implicit(body, known);
            }
            Statement::While { body, .. } => mark_implicit(body, known),
            Statement::Try { body, except } => {
                mark_implicit(body, known);
                mark_implicit(except, known);
            }
            _ => {}
        }
    }
}
