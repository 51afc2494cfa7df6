use std::sync::atomic::AtomicBool;

use malph::{
    common::Value,
    symbol::Ty,
    token::TokenKind,
    tokenize, Analyzer, RunReport,
};

fn run(src: &str) -> (Analyzer, RunReport) {
    let mut analyzer = Analyzer::new();
    let report = analyzer.run(src);
    (analyzer, report)
}

fn assert_success(src: &str) -> Analyzer {
    let (analyzer, report) = run(src);
    assert!(report.success, "diagnostics: {:?}", report.diagnostics);
    analyzer
}

fn assert_failure(src: &str) -> (Analyzer, RunReport) {
    let (analyzer, report) = run(src);
    assert!(!report.success, "expected diagnostics, got none");
    (analyzer, report)
}

// ---------------------------------------------------------------- tokenizer

#[test]
fn vi_alone_is_the_if_keyword() {
    let tokens = tokenize("Vi");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Vi);
}

#[test]
fn reserved_capitalized_words_outrank_function_names() {
    let kinds: Vec<_> = tokenize("Fun Malph War Saludo")
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Fun,
            TokenKind::Malph,
            TokenKind::War,
            TokenKind::FunName
        ]
    );
}

#[test]
fn number_tokens_carry_their_integer_value() {
    let tokens = tokenize("x;int=57");
    assert_eq!(tokens[4].kind, TokenKind::Number);
    assert_eq!(tokens[4].value, Value::Int(57));
}

#[test]
fn string_token_value_excludes_the_quotes() {
    let tokens = tokenize("s;string=\"hola mundo\"");
    assert_eq!(tokens[4].kind, TokenKind::Str);
    assert_eq!(tokens[4].value, Value::Str("hola mundo".into()));
}

#[test]
fn unknown_characters_warn_but_never_fail_a_run() {
    let (_, report) = run("a;int=5 @#");
    assert!(report.success, "warnings must not fail the run");
    assert!(!report.warnings.is_empty());
}

// ------------------------------------------------- declarations/assignments

#[test]
fn declaration_with_integer_value() {
    let analyzer = assert_success("a;int=5");
    let symbols = analyzer.snapshot_symbols();
    assert_eq!(symbols["a"].ty, Ty::Int);
    assert_eq!(symbols["a"].value, Some(Value::Int(5)));
}

#[test]
fn declaration_without_value_is_unassigned() {
    let analyzer = assert_success("a;int");
    assert_eq!(analyzer.snapshot_symbols()["a"].value, None);
}

#[test]
fn unassigned_variables_print_none() {
    let mut analyzer = assert_success("a;int Fun Malph[]( imp a ; )");
    assert_eq!(analyzer.take_output_log(), vec!["a (int): None"]);
}

#[test]
fn integer_assignment_from_numeric_string_coerces() {
    let analyzer = assert_success("a;int=\"42\"");
    assert_eq!(
        analyzer.snapshot_symbols()["a"].value,
        Some(Value::Int(42))
    );
}

#[test]
fn failed_integer_coercion_reports_and_writes_nothing() {
    let (analyzer, report) = assert_failure("a;int=\"abc\"");
    assert!(report.diagnostics[0].contains("se esperaba un valor entero"));
    assert!(!analyzer.snapshot_symbols().contains_key("a"));
}

#[test]
fn failed_coercion_leaves_a_prior_entry_unchanged() {
    let mut analyzer = Analyzer::new();
    assert!(analyzer.run("a;int=1").success);
    assert!(!analyzer.run("a;int=\"abc\"").success);
    assert_eq!(
        analyzer.snapshot_symbols()["a"].value,
        Some(Value::Int(1))
    );
}

#[test]
fn string_declarations_store_the_literal() {
    let analyzer = assert_success("s;string=\"hola\"");
    let symbols = analyzer.snapshot_symbols();
    assert_eq!(symbols["s"].ty, Ty::Str);
    assert_eq!(symbols["s"].value, Some(Value::Str("hola".into())));
}

// ------------------------------------------------------- print instructions

#[test]
fn symbols_persist_across_runs() {
    let mut analyzer = Analyzer::new();
    analyzer.run("a;int=3;");
    analyzer.run("Fun Malph[]( imp a ; )");
    assert_eq!(analyzer.take_output_log(), vec!["a (int): 3"]);
}

#[test]
fn imp_on_an_undeclared_variable_reports_in_the_log_only() {
    let (mut analyzer, report) = run("Fun Malph[]( imp b ; )");
    assert!(report.success, "an undeclared imp is not a diagnostic");
    assert_eq!(
        analyzer.take_output_log(),
        vec!["b: Variable no declarada."]
    );
}

#[test]
fn imp_without_a_variable() {
    let mut analyzer = assert_success("Fun Malph[]( imp ; )");
    assert_eq!(
        analyzer.take_output_log(),
        vec!["imp sin variable especificada."]
    );
}

#[test]
fn named_functions_execute_like_main() {
    let mut analyzer = assert_success("x;int=1 Fun Saludo[]( imp x ; )");
    assert_eq!(analyzer.take_output_log(), vec!["x (int): 1"]);
}

// -------------------------------------------------------------- conditions

#[test]
fn a_true_if_executes_its_body() {
    let mut analyzer = assert_success("a;int=7 Vi{ a > 5 }( imp a ; )");
    assert_eq!(analyzer.take_output_log(), vec!["a (int): 7"]);
}

#[test]
fn a_false_if_has_no_effect_and_no_diagnostic() {
    let mut analyzer = assert_success("a;int=1 Vi{ a > 5 }( imp a ; )");
    assert!(analyzer.take_output_log().is_empty());
}

#[test]
fn literal_only_conditions_evaluate() {
    let mut analyzer = assert_success("Vi{ 1 < 2 }( imp ; )");
    assert_eq!(analyzer.take_output_log().len(), 1);
}

#[test]
fn ordering_across_kinds_is_a_reported_error() {
    let (mut analyzer, report) =
        assert_failure("a;int=1 b;string=\"x\" Vi{ a > b }( imp a ; )");
    assert!(report.diagnostics[0].contains("no se pueden comparar"));
    assert!(analyzer.take_output_log().is_empty());
}

#[test]
fn equality_across_kinds_is_false_not_an_error() {
    // `b` is undeclared, so it resolves to the opaque string "b"
    let mut analyzer = assert_success("a;int=1 Vi{ a == b }( imp a ; )");
    assert!(analyzer.take_output_log().is_empty());
}

#[test]
fn undeclared_operands_compare_as_their_own_names() {
    let mut analyzer = assert_success("Vi{ x == x }( imp ; )");
    assert_eq!(analyzer.take_output_log().len(), 1);

    let mut analyzer = assert_success("Vi{ x == y }( imp ; )");
    assert!(analyzer.take_output_log().is_empty());
}

#[test]
fn ordering_against_an_unassigned_variable_is_an_error() {
    let (_, report) = assert_failure("a;int Vi{ a > 1 }( imp a ; )");
    assert!(report.diagnostics[0].contains("no se pueden comparar"));
}

// ------------------------------------------------------------------- loops

#[test]
fn war_loop_prints_then_increments_until_false() {
    let mut analyzer = assert_success("i;int=0 War{ i < 3 }( imp i ; ++ i ; )");
    assert_eq!(
        analyzer.take_output_log(),
        vec!["i (int): 0", "i (int): 1", "i (int): 2"]
    );
    assert_eq!(
        analyzer.snapshot_symbols()["i"].value,
        Some(Value::Int(3))
    );
}

#[test]
fn incrementing_a_string_variable_stops_the_loop() {
    let (mut analyzer, report) =
        assert_failure("s;string=\"x\" War{ s == s }( imp s ; ++ s ; )");
    assert!(report.diagnostics[0].contains("no es un entero"));
    assert_eq!(analyzer.take_output_log(), vec!["s (string): x"]);
}

#[test]
fn incrementing_an_undeclared_counter_stops_the_loop() {
    let (mut analyzer, report) =
        assert_failure("i;int=0 War{ i < 3 }( imp i ; ++ j ; )");
    assert!(report.diagnostics[0].contains("no está definida"));
    assert_eq!(analyzer.take_output_log().len(), 1);
}

#[test]
fn a_cancelled_run_stops_an_unbounded_loop() {
    // `0 < 1` never turns false; the pre-armed flag is the only way out.
    let cancel = AtomicBool::new(true);
    let mut analyzer = Analyzer::new();
    let report = analyzer.run_with_cancel("i;int=0 War{ 0 < 1 }( imp i ; ++ i ; )", &cancel);
    assert!(!report.success);
    assert!(report.diagnostics[0].contains("cancelada"));
    assert!(analyzer.take_output_log().is_empty());
}

// ----------------------------------------------------------- syntax errors

#[test]
fn a_missing_close_paren_reports_end_of_file() {
    let (_, report) = assert_failure("Fun Malph[]( imp a ;");
    assert!(report.diagnostics[0].contains("al final del archivo"));
}

#[test]
fn syntax_errors_name_the_offending_token_and_line() {
    let (_, report) = assert_failure("a;int=5\n]");
    assert_eq!(
        report.diagnostics[0],
        "Error de sintaxis en ']', línea 2"
    );
}

#[test]
fn the_prefix_before_a_syntax_error_still_executes() {
    let (analyzer, report) = assert_failure("a;int=3 ]");
    assert_eq!(
        analyzer.snapshot_symbols()["a"].value,
        Some(Value::Int(3))
    );
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn empty_input_is_a_syntax_error() {
    let (_, report) = assert_failure("");
    assert!(report.diagnostics[0].contains("al final del archivo"));
}

#[test]
fn a_bare_imp_is_not_a_top_level_expression() {
    assert_failure("imp a ;");
}
