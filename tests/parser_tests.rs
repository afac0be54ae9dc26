// Integration tests for the parser

use icelang::parser::ast::*;
use icelang::parser::{parse_expression_source, parse_source, ParseError};
use proptest::prelude::*;

fn assignment_value(program: &StatementList) -> &Expression {
    match &program.statements[0] {
        Statement::Assignment { value, .. } => value,
        other => panic!("Expected assignment, got {:?}", other),
    }
}

fn digit(expr: &Expression) -> f64 {
    match expr {
        Expression::Digit { value, .. } => *value,
        other => panic!("Expected digit literal, got {:?}", other),
    }
}

#[test]
fn test_decimal_literal() {
    let program = parse_source("x is 12.5;").expect("Parsing failed");
    assert_eq!(digit(assignment_value(&program)), 12.5);
}

#[test]
fn test_digit_followed_by_letter_is_lexical_error() {
    let err = parse_source("x is 1a;").unwrap_err();
    assert!(matches!(err, ParseError::Lexical(_)));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let program = parse_source("x is 1 + 2 * 3;").expect("Parsing failed");

    match assignment_value(&program) {
        Expression::Binary {
            op: BinOp::Add,
            left,
            right,
            ..
        } => {
            assert_eq!(digit(left), 1.0);
            match right.as_ref() {
                Expression::Binary {
                    op: BinOp::Mul,
                    left,
                    right,
                    ..
                } => {
                    assert_eq!(digit(left), 2.0);
                    assert_eq!(digit(right), 3.0);
                }
                other => panic!("Expected product, got {:?}", other),
            }
        }
        other => panic!("Expected sum, got {:?}", other),
    }
}

#[test]
fn test_power_chain_is_left_associative() {
    let program = parse_source("x is 2 ** 3 ** 2;").expect("Parsing failed");

    match assignment_value(&program) {
        Expression::Binary {
            op: BinOp::Pow,
            left,
            right,
            ..
        } => {
            assert_eq!(digit(right), 2.0);
            assert!(matches!(
                left.as_ref(),
                Expression::Binary { op: BinOp::Pow, .. }
            ));
        }
        other => panic!("Expected power, got {:?}", other),
    }
}

#[test]
fn test_for_statement_with_step() {
    let program =
        parse_source("for i from 1 to 10 step 2 { draw(i); }").expect("Parsing failed");

    assert_eq!(program.len(), 1);
    match &program.statements[0] {
        Statement::For {
            variable,
            from,
            to,
            step,
            body,
            ..
        } => {
            assert_eq!(variable.as_str(), "i");
            assert_eq!(digit(from), 1.0);
            assert_eq!(digit(to), 10.0);
            assert_eq!(step.as_ref().map(digit), Some(2.0));

            assert_eq!(body.len(), 1);
            match &body.statements[0] {
                Statement::Call { callee, args, .. } => {
                    assert_eq!(callee.as_str(), "draw");
                    assert_eq!(args.len(), 1);
                    match &args.args[0] {
                        Expression::Symbol { name, .. } => assert_eq!(name.as_str(), "i"),
                        other => panic!("Expected symbol, got {:?}", other),
                    }
                }
                other => panic!("Expected call, got {:?}", other),
            }
        }
        other => panic!("Expected for statement, got {:?}", other),
    }
}

#[test]
fn test_tuple_and_group() {
    match parse_expression_source("(1, 2, 3)").expect("Parsing failed") {
        Expression::Tuple { elements, .. } => {
            let values: Vec<f64> = elements.iter().map(digit).collect();
            assert_eq!(values, vec![1.0, 2.0, 3.0]);
        }
        other => panic!("Expected tuple, got {:?}", other),
    }

    let expr = parse_expression_source("(1)").expect("Parsing failed");
    assert_eq!(expr.kind(), NodeKind::DigitLiteral);
    assert_eq!(digit(&expr), 1.0);
}

#[test]
fn test_missing_expression_reports_position() {
    let err = parse_source("x is ;").unwrap_err();

    assert!(err.is_syntax());
    assert_eq!(err.message(), "expected expression, found ';'");
    assert_eq!(err.location(), SourceLocation::new(5, 1, 6));
}

#[test]
fn test_error_on_later_line() {
    let err = parse_source("x is 1;\n\nfor i from 0 to\n").unwrap_err();

    assert_eq!(err.location().line, 4);
    assert_eq!(err.message(), "expected expression, found end of input");
}

#[test]
fn test_keywords_are_case_insensitive() {
    let upper = parse_source("FOR i FROM 0 TO 1 { }").expect("Parsing failed");
    let lower = parse_source("for i from 0 to 1 { }").expect("Parsing failed");
    assert_eq!(upper, lower);

    let mixed = parse_source("x Is 1;").expect("Parsing failed");
    assert_eq!(mixed, parse_source("x is 1;").expect("Parsing failed"));
}

#[test]
fn test_identifiers_fold_but_keep_spelling() {
    let program = parse_source("Draw(1);\ndraw(1);").expect("Parsing failed");

    let callees: Vec<&Identifier> = program
        .iter()
        .map(|s| match s {
            Statement::Call { callee, .. } => callee,
            other => panic!("Expected call, got {:?}", other),
        })
        .collect();

    assert_eq!(callees[0], callees[1]);
    assert_eq!(callees[0].as_str(), "Draw");
    assert_eq!(callees[1].as_str(), "draw");
    assert_eq!(callees[0].folded(), "draw");
}

#[test]
fn test_comments_and_blank_program() {
    let source = "// header\n-- another\n\n";
    assert!(parse_source(source).expect("Parsing failed").is_empty());

    let program = parse_source("x is 1; // trailing\ny is x -- also trailing\n;")
        .expect("Parsing failed");
    assert_eq!(program.len(), 2);
    assert_eq!(program.statements[1].line(), 2);
}

#[test]
fn test_reprint_is_canonical() {
    let source = "\
// spiral
N is 36;
FOR k FROM 0 TO N STEP 1
    line((k, k ** 2), -(k - 1) / 2, Sin(k * 3.25));
";
    let program = parse_source(source).expect("Parsing failed");

    assert_eq!(
        program.to_string(),
        "N is 36;\nfor k from 0 to N step 1 {\n    line((k, k ** 2), -(k - 1) / 2, Sin(k * 3.25));\n}\n"
    );
}

// ===== Round trip =====

/// Reset every line number so trees parsed from different layouts compare
fn clear_lines(list: &mut StatementList) {
    list.line = 0;
    for statement in &mut list.statements {
        match statement {
            Statement::Assignment { value, line, .. } => {
                *line = 0;
                clear_expression_lines(value);
            }
            Statement::Call { args, line, .. } => {
                *line = 0;
                args.line = 0;
                args.args.iter_mut().for_each(clear_expression_lines);
            }
            Statement::For {
                from,
                to,
                step,
                body,
                line,
                ..
            } => {
                *line = 0;
                clear_expression_lines(from);
                clear_expression_lines(to);
                if let Some(step) = step {
                    clear_expression_lines(step);
                }
                clear_lines(body);
            }
        }
    }
}

fn clear_expression_lines(expr: &mut Expression) {
    match expr {
        Expression::Binary {
            left, right, line, ..
        } => {
            *line = 0;
            clear_expression_lines(left);
            clear_expression_lines(right);
        }
        Expression::Unary { operand, line, .. } => {
            *line = 0;
            clear_expression_lines(operand);
        }
        Expression::Digit { line, .. } | Expression::Symbol { line, .. } => *line = 0,
        Expression::Call { args, line, .. } => {
            *line = 0;
            args.line = 0;
            args.args.iter_mut().for_each(clear_expression_lines);
        }
        Expression::Tuple { elements, line } => {
            *line = 0;
            elements.iter_mut().for_each(clear_expression_lines);
        }
    }
}

fn parse_without_lines(source: &str) -> StatementList {
    let mut program = parse_source(source).expect("Parsing failed");
    clear_lines(&mut program);
    program
}

#[test]
fn test_decimal_literals_keep_their_value() {
    for literal in ["0.3", "0.7", "3.14159", "99.99", "0.123456789", "000.100"] {
        let source = format!("x is {};", literal);
        let first = parse_source(&source).expect("Parsing failed");
        let printed = first.to_string();
        let second = parse_source(&printed).expect("Parsing failed");

        assert_eq!(
            digit(assignment_value(&first)),
            digit(assignment_value(&second)),
            "{} reprinted as {:?}",
            literal,
            printed
        );
        assert_eq!(printed, second.to_string());
    }
}

#[test]
fn test_out_of_range_literal_is_rejected() {
    let source = format!("x is 1{};", "0".repeat(400));
    let err = parse_source(&source).unwrap_err();

    assert!(err.is_lexical());
    assert_eq!(err.message(), "numeric literal out of range");
}

#[test]
fn test_reparse_matches_across_layouts() {
    let source = "FOR i FROM 0.30 TO 10 draw(-i, (i, 2 ** -0.7))\n;\nY IS (((1)));";
    let first = parse_without_lines(source);
    let second = parse_without_lines(&first.to_string());
    assert_eq!(first, second);
}

const NAMES: &[&str] = &["x", "Y", "draw", "Point", "a_1", "dx"];
const OPERATORS: &[&str] = &["+", "-", "*", "/", "**"];

fn keyword(word: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![
        Just(word.to_string()),
        Just(word.to_uppercase()),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    proptest::sample::select(NAMES).prop_map(str::to_string)
}

fn arb_number() -> impl Strategy<Value = String> {
    "[0-9]{1,6}(\\.[0-9]{1,8})?"
}

fn arb_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![arb_number(), arb_name()];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (
                inner.clone(),
                proptest::sample::select(OPERATORS),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("({} {} {})", left, op, right)),
            inner.clone().prop_map(|operand| format!("-({})", operand)),
            (arb_name(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(name, args)| format!("{}({})", name, args.join(", "))),
            prop::collection::vec(inner, 2..4)
                .prop_map(|elements| format!("({})", elements.join(","))),
        ]
    })
}

fn arb_statement() -> impl Strategy<Value = String> {
    let simple = prop_oneof![
        (arb_name(), keyword("is"), arb_expression())
            .prop_map(|(name, is, value)| format!("{} {} {};", name, is, value)),
        (arb_name(), prop::collection::vec(arb_expression(), 0..3))
            .prop_map(|(name, args)| format!("{}({});", name, args.join(", "))),
    ];

    simple.prop_recursive(2, 16, 3, |inner| {
        (
            (keyword("for"), arb_name(), keyword("from"), arb_expression()),
            (keyword("to"), arb_expression()),
            prop::option::of((keyword("step"), arb_expression())),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|((for_kw, name, from_kw, from), (to_kw, to), step, body)| {
                let step = step
                    .map(|(kw, e)| format!(" {} {}", kw, e))
                    .unwrap_or_default();
                let body = if body.len() == 1 {
                    body[0].clone()
                } else {
                    format!("{{\n{}\n}}", body.join("\n"))
                };
                format!(
                    "{} {} {} {} {} {}{} {}",
                    for_kw, name, from_kw, from, to_kw, to, step, body
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]
    #[test]
    fn parse_print_parse_is_stable(
        statements in prop::collection::vec(arb_statement(), 0..5)
    ) {
        let source = statements.join("\n");
        let first = parse_source(&source);
        prop_assert!(first.is_ok(), "failed to parse {:?}: {:?}", source, first);
        let first = first.unwrap();

        let printed = first.to_string();
        let second = parse_source(&printed);
        prop_assert!(second.is_ok(), "failed to reparse {:?}: {:?}", printed, second);
        let second = second.unwrap();

        prop_assert_eq!(second.to_string(), printed);

        let mut first = first;
        let mut second = second;
        clear_lines(&mut first);
        clear_lines(&mut second);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn decimal_literals_reprint_to_the_same_value(literal in arb_number()) {
        let expr = parse_expression_source(&literal).unwrap();
        let reparsed = parse_expression_source(&expr.to_string()).unwrap();
        prop_assert_eq!(digit(&expr), digit(&reparsed));
    }
}
