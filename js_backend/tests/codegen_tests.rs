use compiler_core::{CompileError, CompilerSession};
use frontend::ast::{Expr, NodeKind, Program, Stmt};
use js_backend::runner::{self, NodeRunner};
use js_backend::{CodegenOptions, JsBackend, JsCodeGenerator, JsGenError};
use rstest::rstest;

/// Helper function to generate JavaScript from source
fn generate_js(source: &str) -> String {
    generate_js_with(source, CodegenOptions::default())
}

fn generate_js_with(source: &str, options: CodegenOptions) -> String {
    CompilerSession::new()
        .compile(source, &JsBackend::new(options))
        .expect("Compilation should succeed")
        .output
}

/// Runs the program and returns the reported top-level variables, or None without node.
fn run_js(source: &str) -> Option<String> {
    let runner = NodeRunner::default();
    if !runner.is_available() {
        eprintln!("node not found, skipping execution");
        return None;
    }
    let compilation = CompilerSession::new()
        .compile(source, &JsBackend::default())
        .expect("Compilation should succeed");
    let names = runner::top_level_declarations(&compilation.program);
    let script = runner::with_report(&compilation.output, &names);
    Some(runner.run(&script).expect("node should run the generated code"))
}

#[test]
fn test_for_loop() {
    let js = generate_js("int x = 1; for (int i = 0; i < 3; i = i + 1) { x = x + i; }");
    assert_eq!(
        js,
        "let x = 1;\n\
         for (let i = 0; i < 3; i = (i + 1)) {\n  \
           x = (x + i);\n\
         }"
    );
}

#[test]
fn test_for_loop_with_assignment_initializer() {
    let js = generate_js("int i = 9; for (i = 0; i < 2; i = i + 1) { }");
    assert!(js.contains("for (i = 0; i < 2; i = (i + 1)) {"), "{js}");
}

#[rstest]
#[case("int x = 1 + 2 * 3;", "let x = (1 + (2 * 3));")]
#[case("int x = 10 - 4 - 3;", "let x = ((10 - 4) - 3);")]
#[case("int x = (1 + 2) * 3;", "let x = ((1 + 2) * 3);")]
#[case("int x = 7 % 4 / 2;", "let x = ((7 % 4) / 2);")]
#[case("int x = 0; x = 5;", "let x = 0;\nx = 5;")]
#[case("int a = 0; int b = 0; a = (b = 3) + 1;", "let a = 0;\nlet b = 0;\na = ((b = 3) + 1);")]
#[case("int a = 0; int b = 0; a = b = 3;", "let a = 0;\nlet b = 0;\na = (b = 3);")]
fn test_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(generate_js(source), expected);
}

#[test]
fn test_while_loop() {
    let js = generate_js("int n = 0; while (n != 4) { n = n + 2; }");
    assert_eq!(js, "let n = 0;\nwhile (n != 4) {\n  n = (n + 2);\n}");
}

#[test]
fn test_do_while_loop() {
    let js = generate_js("int n = 0; do { n = n + 1; } while (n < 5);");
    assert_eq!(js, "let n = 0;\ndo {\n  n = (n + 1);\n} while (n < 5);");
}

#[test]
fn test_if_without_else() {
    let js = generate_js("int x = 1; if (x > 0) x = 2;");
    assert_eq!(js, "let x = 1;\nif (x > 0) {\n  x = 2;\n}");
    assert!(!js.contains("else"));
}

#[test]
fn test_if_else() {
    let js = generate_js("int x = 1; if (x >= 2) { x = 0; } else { x = 3; }");
    assert_eq!(js, "let x = 1;\nif (x >= 2) {\n  x = 0;\n} else {\n  x = 3;\n}");
}

#[test]
fn test_switch_keeps_fallthrough() {
    let js = generate_js("int x = 2; switch (x) { case 1: x = 10; break; default: x = 0; }");
    assert_eq!(
        js,
        "let x = 2;\n\
         switch (x) {\n  \
           case 1:\n    \
             x = 10;\n    \
             break;\n  \
           default:\n    \
             x = 0;\n\
         }"
    );
    // Only the break written in the source.
    assert_eq!(js.matches("break;").count(), 1);
}

#[test]
fn test_nested_control_flow_indents_each_level() {
    let js = generate_js("int x = 0; while (x < 9) { if (x == 3) { x = 9; } else { x = x + 1; } }");
    let lines: Vec<&str> = js.lines().collect();
    assert_eq!(lines[1], "while (x < 9) {");
    assert_eq!(lines[2], "  if (x == 3) {");
    assert_eq!(lines[3], "    x = 9;");
    assert_eq!(lines[4], "  } else {");
    assert_eq!(lines[6], "  }");
    assert_eq!(lines[7], "}");
}

#[test]
fn test_bare_block_has_no_braces() {
    let js = generate_js("{ int y = 1; y = y + 1; }");
    assert_eq!(js, "let y = 1;\ny = (y + 1);");
}

#[test]
fn test_flat_output() {
    let js = generate_js_with(
        "int x = 1; for (int i = 0; i < 3; i = i + 1) { x = x + i; }",
        CodegenOptions { indent_width: 0 },
    );
    assert!(js.lines().all(|line| !line.starts_with(' ')), "{js}");
    assert!(js.contains("\nx = (x + i);\n"));
}

#[test]
fn test_wide_indent() {
    let js = generate_js_with("int x = 1; while (x < 2) x = 2;", CodegenOptions { indent_width: 4 });
    assert_eq!(js, "let x = 1;\nwhile (x < 2) {\n    x = 2;\n}");
}

#[test]
fn test_empty_program() {
    assert_eq!(generate_js(""), "");
}

#[test]
fn test_reserved_words_are_renamed() {
    let js = generate_js("int var = 1; int new = var; var = var + new;");
    assert_eq!(js, "let $var = 1;\nlet $new = $var;\n$var = ($var + $new);");
}

#[test]
fn test_generator_is_reusable() {
    let program = CompilerSession::new().parse_program("int x = 1;").unwrap();
    let mut generator = JsCodeGenerator::new(&program);
    let first = generator.generate().unwrap();
    let second = generator.generate().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unsupported_for_initializer() {
    let source = "int i = 0; for (break; i < 3; i = i + 1) { }";
    let err = CompilerSession::new()
        .compile(source, &JsBackend::default())
        .unwrap_err();
    assert!(matches!(err, CompileError::Codegen(_)));
    assert_eq!(
        err.to_string(),
        "Code Generation stage error: Break cannot be rendered as a for-loop initializer"
    );
}

#[test]
fn test_unsupported_for_initializer_hand_built() {
    let mut program = Program {
        statements: vec![],
        string_interner: Default::default(),
    };
    let i = program.string_interner.get_or_intern("i");
    program.statements.push(Stmt::For {
        init: Box::new(Stmt::Block(vec![])),
        condition: Expr::Identifier(i),
        update: Expr::Identifier(i),
        body: Box::new(Stmt::Block(vec![])),
    });
    let err = JsCodeGenerator::new(&program).generate().unwrap_err();
    assert!(matches!(err, JsGenError::UnsupportedInHeader(NodeKind::Block)));
}

#[test]
fn test_semantic_failure_skips_codegen() {
    let err = CompilerSession::new()
        .compile("int x = 1; y = x;", &JsBackend::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "Semantic Analysis stage error: Undefined variable: y");
}

#[test]
fn test_execute_for_loop() {
    let Some(output) = run_js("int x = 1; for (int i = 0; i < 3; i = i + 1) { x = x + i; }") else {
        return;
    };
    assert_eq!(output, "x = 4");
}

#[test]
fn test_execute_switch_fallthrough() {
    let source = "int x = 1; int y = 0; \
                  switch (x) { case 1: y = y + 1; case 2: y = y + 10; break; default: y = 100; }";
    let Some(output) = run_js(source) else {
        return;
    };
    assert_eq!(output, "x = 1\ny = 11");
}

#[test]
fn test_execute_do_while_runs_once() {
    let Some(output) = run_js("int n = 10; do { n = n + 1; } while (n < 5);") else {
        return;
    };
    assert_eq!(output, "n = 11");
}

#[test]
fn test_execute_nested_assignment() {
    let Some(output) = run_js("int a = 0; int b = 0; a = (b = 3) + 1;") else {
        return;
    };
    assert_eq!(output, "a = 4\nb = 3");
}

#[test]
fn test_execute_division_is_not_truncated() {
    // JavaScript numbers are doubles.
    let Some(output) = run_js("int q = 7 / 2;") else {
        return;
    };
    assert_eq!(output, "q = 3.5");
}

#[test]
fn test_redeclaration_becomes_assignment() {
    let js = generate_js("int x = 1; int x = x + 2;");
    assert_eq!(js, "let x = 1;\nx = (x + 2);");
}

#[test]
fn test_redeclaration_inside_loop_reuses_outer_binding() {
    let js = generate_js("int x = 1; while (x < 3) { int x = x + 1; }");
    assert_eq!(js, "let x = 1;\nwhile (x < 3) {\n  x = (x + 1);\n}");
}

#[test]
fn test_for_initializer_reuses_outer_binding() {
    let js = generate_js("int i = 5; for (int i = 0; i < 2; i = i + 1) { }");
    assert!(js.contains("for (i = 0; i < 2; i = (i + 1)) {"), "{js}");
}

#[test]
fn test_sibling_blocks_each_declare() {
    let js = generate_js("int c = 0; if (c == 0) { int t = 1; } else { int t = 2; } int t = 3;");
    assert_eq!(
        js,
        "let c = 0;\n\
         if (c == 0) {\n  \
           let t = 1;\n\
         } else {\n  \
           let t = 2;\n\
         }\n\
         let t = 3;"
    );
}

#[test]
fn test_switch_arm_declarations_are_bound_before_the_switch() {
    let js = generate_js(
        "int s = 2; int r = 0; switch (s) { case 1: int t = 10; r = t; break; default: int t = 20; r = t; }",
    );
    assert_eq!(
        js,
        "let s = 2;\n\
         let r = 0;\n\
         let t;\n\
         switch (s) {\n  \
           case 1:\n    \
             t = 10;\n    \
             r = t;\n    \
             break;\n  \
           default:\n    \
             t = 20;\n    \
             r = t;\n\
         }"
    );
}

#[test]
fn test_console_is_renamed() {
    let js = generate_js("int console = 1; console = console + 1;");
    assert_eq!(js, "let $console = 1;\n$console = ($console + 1);");
}

#[test]
fn test_execute_top_level_redeclaration() {
    let Some(output) = run_js("int x = 1; int x = x + 2;") else {
        return;
    };
    assert_eq!(output, "x = 3");
}

#[test]
fn test_execute_switch_redeclaration() {
    let source = "int s = 2; int r = 0; \
                  switch (s) { case 1: int t = 10; r = t; break; default: int t = 20; r = t; }";
    let Some(output) = run_js(source) else {
        return;
    };
    assert_eq!(output, "s = 2\nr = 20");
}

#[test]
fn test_execute_variable_named_console() {
    let Some(output) = run_js("int console = 1; console = console + 1;") else {
        return;
    };
    assert_eq!(output, "console = 2");
}
