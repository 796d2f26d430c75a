use crate::grammar::{
    Block,
    Module,
    Spanned,
    Statement,
};

/// Ordered statements that value-flow queries at `offset` search.
///
/// Inside a method these are the method's simple statements, flattened in
/// source order through every nested block. Outside of methods the module's
/// top-level statements are returned as they are.
pub fn statements_in_scope(module: &Module, offset: usize) -> Vec<&Spanned<Statement>> {
    match module.method_at(offset) {
        Some((method, _)) => simple_statements(&method.body),
        None => module.statements.iter().collect(),
    }
}

/// Simple statements around `offset` in source order: the enclosing method's,
/// or the module body's flattened through every nested block.
pub fn simple_statements_in_scope(module: &Module, offset: usize) -> Vec<&Spanned<Statement>> {
    match module.method_at(offset) {
        Some((method, _)) => simple_statements(&method.body),
        None => simple_statements(&module.statements),
    }
}

/// Pre-order walk of a block collecting simple statements only.
pub fn simple_statements(block: &Block) -> Vec<&Spanned<Statement>> {
    let mut statements = vec![];
    collect(block, &mut statements);
    statements
}

fn collect<'m>(block: &'m Block, statements: &mut Vec<&'m Spanned<Statement>>) {
    for stmnt in block.iter() {
        match &stmnt.0 {
            Statement::Simple(_) => statements.push(stmnt),
            compound => {
                for nested in compound.blocks() {
                    collect(nested, statements);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_module;

    #[test]
    fn test_method_statements_are_flattened() {
        let source = "Процедура Тест()\n  А = 1;\n  Если Истина Тогда\n    Б = 2;\n  КонецЕсли;\n  В = 3;\nКонецПроцедуры";
        let module = parse_module(source, "Test", "test.bsl").module;
        let offset = source.find('В').unwrap_or_default();

        let statements = statements_in_scope(&module, offset);
        let starts: Vec<usize> = statements.iter().map(|(_, span)| span.start).collect();

        assert_eq!(statements.len(), 3);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_module_statements_stay_top_level() {
        let source = "А = 1;\nЕсли Истина Тогда\n  Б = 2;\nКонецЕсли;";
        let module = parse_module(source, "Test", "test.bsl").module;

        let statements = statements_in_scope(&module, 0);

        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1].0, Statement::If { .. }));
        assert_eq!(simple_statements_in_scope(&module, 0).len(), 2);
    }
}
