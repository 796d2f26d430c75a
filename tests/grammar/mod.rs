use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use bsl_ssl_types::grammar::{
    parse_module,
    Block,
    Environment,
    Environments,
    Expression,
    Module,
    Spanned,
    Statement,
};

fn render(exp: &Spanned<Expression>) -> String {
    let args = |params: &[Option<Spanned<Expression>>]| {
        params
            .iter()
            .map(|param| param.as_ref().map(render).unwrap_or_default())
            .collect::<Vec<String>>()
            .join(", ")
    };

    match &exp.0 {
        Expression::String(literal) => format!("{:?}", literal.content()),
        Expression::Number(number) => number.clone(),
        Expression::Date(date) => format!("'{date}'"),
        Expression::Boolean(value) => value.to_string(),
        Expression::Static(access) if access.implicit => format!("let {}", access.name),
        Expression::Static(access) => access.name.clone(),
        Expression::Dynamic(access) => format!("{}.{}", render(&access.source), access.name.0),
        Expression::Invocation(inv) => {
            format!("{}({})", render(&inv.method_access), args(&inv.params))
        }
        Expression::New(creator) => format!("new {}({})", creator.type_name.0, args(&creator.params)),
        Expression::Index(source, index) => format!("{}[{}]", render(source), render(index)),
        Expression::Binary(op, lhs, rhs) => format!("({op:?} {} {})", render(lhs), render(rhs)),
        Expression::Unary(op, exp) => format!("({op:?} {})", render(exp)),
        Expression::Ternary(cond, then, otherwise) => {
            format!("?({}, {}, {})", render(cond), render(then), render(otherwise))
        }
        other => format!("{other:?}"),
    }
}

fn outline(block: &Block, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for (stmnt, _) in block.iter() {
        match stmnt {
            Statement::Simple(simple) => match &simple.right {
                Some(right) => lines.push(format!("{indent}{} = {}", render(&simple.left), render(right))),
                None => lines.push(format!("{indent}{}", render(&simple.left))),
            },
            Statement::If {
                branches,
                otherwise,
            } => {
                for (index, (cond, body)) in branches.iter().enumerate() {
                    let head = if index == 0 { "if" } else { "elsif" };
                    lines.push(format!("{indent}{head} {}", render(cond)));
                    outline(body, depth + 1, lines);
                }
                if let Some(body) = otherwise {
                    lines.push(format!("{indent}else"));
                    outline(body, depth + 1, lines);
                }
            }
            Statement::ForEach {
                variable,
                collection,
                body,
            } => {
                lines.push(format!("{indent}for each {} in {}", render(variable), render(collection)));
                outline(body, depth + 1, lines);
            }
            Statement::Return(exp) => lines.push(format!(
                "{indent}return {}",
                exp.as_ref().map(render).unwrap_or_default()
            )),
            other => lines.push(format!("{indent}{other:?}")),
        }
    }
}

fn parse(source: &str) -> Module {
    let response = parse_module(source, "Test", "test.bsl");
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.module
}

fn outline_module(module: &Module) -> String {
    let mut lines = vec![];
    outline(&module.statements, 0, &mut lines);
    lines.join("\n")
}

#[test]
fn test_concatenation_is_left_associative() {
    let module = parse("Поля = \"Код\" + \", \" + Имя;");

    assert_snapshot!(outline_module(&module), @r#"let Поля = (Plus (Plus "Код" ", ") Имя)"#);
}

#[test]
fn test_common_module_call() {
    let module = parse(
        "Результат = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, \"Код, Наименование\");",
    );

    assert_snapshot!(
        outline_module(&module),
        @r#"let Результат = ОбщегоНазначения.ЗначенияРеквизитовОбъекта(Ссылка, "Код, Наименование")"#
    );
}

#[test]
fn test_constructor_with_omitted_argument() {
    let module = parse("Параметры = Новый Структура(\"А, Б\", 1, , Истина);");

    assert_snapshot!(outline_module(&module), @r#"let Параметры = new Структура("А, Б", 1, , true)"#);
}

#[test]
fn test_multiline_string_literal() {
    let module = parse("Текст = \"Первая\n|Вторая \"\"кавычки\"\"\";");

    assert_snapshot!(outline_module(&module), @r#"let Текст = "Первая\nВторая \"кавычки\"""#);
}

#[test]
fn test_control_flow_outline() {
    let source = r#"
Если А Тогда
    Б = 1;
ИначеЕсли В Тогда
    Б = 2;
Иначе
    Для Каждого Строка Из Таблица Цикл
        Строка.Количество = 0;
    КонецЦикла;
КонецЕсли;
"#;
    let module = parse(source);

    assert_snapshot!(outline_module(&module), @r"
    if А
      let Б = 1
    elsif В
      Б = 2
    else
      for each let Строка in Таблица
        Строка.Количество = 0
    ");
}

#[test]
fn test_english_keywords() {
    let source = "If Cond Then\n    Result = New Array;\nEndIf;";
    let module = parse(source);

    assert_snapshot!(outline_module(&module), @r"
    if Cond
      let Result = new Array()
    ");
}

#[test]
fn test_methods_and_environments() {
    let source = r#"
&НаКлиенте
Процедура ПриОткрытии()
    Поле = 1;
КонецПроцедуры

&НаСервере
Функция Данные(Ссылка) Экспорт
    Возврат Ссылка.Код;
КонецФункции
"#;
    let module = parse(source);

    let names: Vec<&str> = module
        .methods
        .iter()
        .map(|(method, _)| method.name.0.as_str())
        .collect();
    assert_eq!(names, vec!["ПриОткрытии", "Данные"]);

    let inside_client = source.find("Поле").unwrap_or_default();
    let inside_server = source.find("Возврат").unwrap_or_default();
    assert_eq!(
        module.environments_at(inside_client),
        Environments(vec![Environment::Client])
    );
    assert_eq!(
        module.environments_at(inside_server),
        Environments(vec![Environment::Server])
    );
    assert_eq!(module.environments_at(0), Environments::all());

    let mut lines = vec![];
    let (method, _) = &module.methods[1];
    outline(&method.body, 0, &mut lines);
    assert_snapshot!(lines.join("\n"), @"return Ссылка.Код");
}

#[test]
fn test_broken_statement_does_not_hide_the_rest() {
    let response = parse_module("Если ;\nБ = 2;", "Test", "test.bsl");

    assert!(!response.errors.is_empty());
    let assigned = response
        .module
        .statements
        .iter()
        .filter_map(|(stmnt, _)| stmnt.as_simple())
        .any(|simple| render(&simple.left) == "let Б");
    assert!(assigned);
}
