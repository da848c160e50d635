#[cfg(test)]
mod property_tests {
    use frontend::ast::{NodeKind, Stmt};
    use frontend::parser::ParserErrorKind;
    use frontend::{check, parse, tokenize, SemanticError};
    use proptest::prelude::*;

    const KEYWORDS: &[&str] = &["int", "for", "while", "do", "if", "else", "switch", "case", "default", "break"];

    fn valid_identifier() -> impl Strategy<Value = String> {
        "[a-z_][a-zA-Z0-9_]{0,5}"
            .prop_map(|s| s.to_string())
            .prop_filter("Not a reserved keyword", |s| !KEYWORDS.contains(&s.as_str()))
    }

    fn number() -> impl Strategy<Value = String> {
        (0u32..1000u32).prop_map(|n| n.to_string())
    }

    // Arithmetic over the variables `a` and `b` and integer literals.
    fn arithmetic() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![number(), Just("a".to_string()), Just("b".to_string())];
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "%"]), inner.clone())
                    .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
                inner.clone().prop_map(|e| format!("({e})")),
                inner.prop_map(|e| format!("(b = {e})")),
            ]
        })
    }

    fn relop() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["<", ">", "<=", ">=", "==", "!="])
    }

    // Statements over the pre-declared variables `a` and `b`.
    fn statement() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            arithmetic().prop_map(|e| format!("a = {e};")),
            arithmetic().prop_map(|e| format!("int c = {e};")),
            Just("break;".to_string()),
        ];
        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(|body| format!("{{ {} }}", body.join(" "))),
                (arithmetic(), relop(), arithmetic(), inner.clone())
                    .prop_map(|(l, op, r, body)| format!("while ({l} {op} {r}) {body}")),
                (inner.clone(), arithmetic()).prop_map(|(body, c)| format!("do {body} while ({c});")),
                (arithmetic(), inner.clone(), prop::option::of(inner.clone())).prop_map(|(c, t, e)| match e {
                    Some(e) => format!("if ({c}) {t} else {e}"),
                    None => format!("if ({c}) {t}"),
                }),
                (arithmetic(), inner.clone())
                    .prop_map(|(limit, body)| format!("for (int i = 0; i < {limit}; i = i + 1) {body}")),
                (arithmetic(), number(), inner.clone(), inner)
                    .prop_map(|(d, v, c, def)| format!("switch ({d}) {{ case {v}: {c} default: {def} }}")),
            ]
        })
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config {
            cases: 64,
            .. proptest::test_runner::Config::default()
        })]

        #[test]
        fn prop_declared_identifiers_check(name in valid_identifier(), value in number()) {
            let input = format!("int {name} = {value}; {name} = {name} + 1;");
            let program = parse(&tokenize(&input).unwrap()).unwrap();
            prop_assert_eq!(program.len(), 2);
            let table = check(&program).unwrap();
            prop_assert!(table.contains(&name));
        }

        #[test]
        fn prop_undeclared_identifiers_fail(name in valid_identifier()) {
            let input = format!("int declared = 0; declared = {name};");
            prop_assume!(name != "declared");
            let program = parse(&tokenize(&input).unwrap()).unwrap();
            prop_assert_eq!(check(&program), Err(SemanticError::UndefinedVariable(name)));
        }

        #[test]
        fn prop_arithmetic_parses_to_one_declaration(expr in arithmetic()) {
            let input = format!("int a = 1; int b = 2; int r = {expr};");
            let program = parse(&tokenize(&input).unwrap()).unwrap();
            prop_assert_eq!(program.len(), 3);
            prop_assert_eq!(program.statements[2].kind(), NodeKind::Declaration);
            prop_assert!(check(&program).is_ok());
        }

        #[test]
        fn prop_single_comparison_parses(l in arithmetic(), op in relop(), r in arithmetic()) {
            let input = format!("int a = 0; int b = 0; if ({l} {op} {r}) a = 1;");
            let program = parse(&tokenize(&input).unwrap()).unwrap();
            let is_compare_if = matches!(&program.statements[2], Stmt::If { condition, .. } if condition.kind() == NodeKind::Compare);
            prop_assert!(is_compare_if);
        }

        #[test]
        fn prop_chained_comparison_rejected(a in arithmetic(), op1 in relop(), b in arithmetic(), op2 in relop(), c in arithmetic()) {
            let input = format!("while ({a} {op1} {b} {op2} {c}) {{ }}");
            let err = parse(&tokenize(&input).unwrap()).unwrap_err();
            let is_chained = matches!(err.kind, ParserErrorKind::ChainedComparison { .. });
            prop_assert!(is_chained, "{}: {:?}", input, err);
        }

        #[test]
        fn prop_nested_parentheses_parse(depth in 1usize..40usize) {
            let input = format!("int a = {}1{};", "(".repeat(depth), ")".repeat(depth));
            prop_assert!(parse(&tokenize(&input).unwrap()).is_ok());
        }

        #[test]
        fn prop_generated_programs_parse_and_check(stmts in prop::collection::vec(statement(), 0..6)) {
            let input = format!("int a = 0; int b = 0; int i = 0; {}", stmts.join(" "));
            let program = parse(&tokenize(&input).unwrap()).unwrap();
            prop_assert_eq!(program.len(), 3 + stmts.len());
            prop_assert!(check(&program).is_ok());
        }

        #[test]
        fn prop_truncated_programs_fail(stmts in prop::collection::vec(statement(), 1..4)) {
            // Dropping the final token always leaves a statement unterminated.
            let input = format!("int a = 0; int b = 0; {}", stmts.join(" "));
            let mut tokens = tokenize(&input).unwrap();
            tokens.pop();
            prop_assert!(parse(&tokens).is_err());
        }
    }
}
