//! Pretty-printer producing canonical source text
//!
//! `Display` on the AST writes source that parses back to the same tree:
//! one statement per line, four spaces of indentation per loop level,
//! lowercase keywords, and single spaces around binary operators.
//! Identifiers keep their original spelling.
//!
//! Brackets are inserted only where the tree needs them. A left operand is
//! bracketed when it binds more loosely than its operator, a right operand
//! when it binds equally or more loosely (operators are left-associative).
//! Negation takes an atom, so a negated binary or negation is bracketed.
//!
//! Numbers are written from the digits the lexer recorded, never re-derived
//! from the `f64`, so printing and lexing again yields the identical value.

use crate::parser::ast::*;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

impl fmt::Display for StatementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, self, 0)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

impl fmt::Display for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_comma_separated(f, &self.args)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Binary {
                op, left, right, ..
            } => {
                write_operand(f, left, left.rank() > op.rank())?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right, right.rank() >= op.rank())
            }
            Expression::Unary { op, operand, .. } => {
                f.write_str(op.symbol())?;
                let bracket = matches!(
                    operand.as_ref(),
                    Expression::Binary { .. } | Expression::Unary { .. }
                );
                write_operand(f, operand, bracket)
            }
            Expression::Digit { digits, .. } => f.write_str(digits),
            Expression::Symbol { name, .. } => write!(f, "{}", name),
            Expression::Call { callee, args, .. } => write!(f, "{}({})", callee, args),
            Expression::Tuple { elements, .. } => {
                f.write_char('(')?;
                write_comma_separated(f, elements)?;
                f.write_char(')')
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expression, bracket: bool) -> fmt::Result {
    if bracket {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, exprs: &[Expression]) -> fmt::Result {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", expr)?;
    }
    Ok(())
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_statements(f: &mut fmt::Formatter<'_>, list: &StatementList, depth: usize) -> fmt::Result {
    for statement in list {
        write_indent(f, depth)?;
        write_statement(f, statement, depth)?;
        f.write_char('\n')?;
    }
    Ok(())
}

fn write_statement(f: &mut fmt::Formatter<'_>, statement: &Statement, depth: usize) -> fmt::Result {
    match statement {
        Statement::Assignment { target, value, .. } => write!(f, "{} is {};", target, value),
        Statement::Call { callee, args, .. } => write!(f, "{}({});", callee, args),
        Statement::For {
            variable,
            from,
            to,
            step,
            body,
            ..
        } => {
            write!(f, "for {} from {} to {}", variable, from, to)?;
            if let Some(step) = step {
                write!(f, " step {}", step)?;
            }
            if body.is_empty() {
                return f.write_str(" { }");
            }
            f.write_str(" {\n")?;
            write_statements(f, body, depth + 1)?;
            write_indent(f, depth)?;
            f.write_char('}')
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{parse_expression_source, parse_source};

    fn reprint(source: &str) -> String {
        parse_expression_source(source).unwrap().to_string()
    }

    #[test]
    fn test_minimal_brackets() {
        assert_eq!(reprint("1 + 2 * 3"), "1 + 2 * 3");
        assert_eq!(reprint("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(reprint("((1))"), "1");
        assert_eq!(reprint("1 - (2 - 3)"), "1 - (2 - 3)");
        assert_eq!(reprint("(1 - 2) - 3"), "1 - 2 - 3");
        assert_eq!(reprint("2 ** (3 ** 2)"), "2 ** (3 ** 2)");
        assert_eq!(reprint("2 ** 3 ** 2"), "2 ** 3 ** 2");
    }

    #[test]
    fn test_negation() {
        assert_eq!(reprint("-x"), "-x");
        assert_eq!(reprint("-(a + b)"), "-(a + b)");
        assert_eq!(reprint("-(-1)"), "-(-1)");
        assert_eq!(reprint("1 - -2"), "1 - -2");
        assert_eq!(reprint("-(2) ** 2"), "-2 ** 2");
    }

    #[test]
    fn test_numbers_calls_and_tuples() {
        assert_eq!(reprint("12.5"), "12.5");
        assert_eq!(reprint("3.0"), "3");
        assert_eq!(reprint("007.250"), "7.25");
        assert_eq!(reprint("F( a ,b,(1,2) )"), "F(a, b, (1, 2))");
        assert_eq!(reprint("now()"), "now()");
    }

    #[test]
    fn test_decimals_survive_reprinting() {
        for source in ["0.3", "0.7", "3.14159", "99.99", "0.123456789", "12.5"] {
            let first = parse_expression_source(source).unwrap();
            let printed = first.to_string();
            let second = parse_expression_source(&printed).unwrap();

            assert_eq!(printed, source);
            assert_eq!(first, second, "value changed for {}", source);
        }
    }

    #[test]
    fn test_program_layout() {
        let source = "X IS 1;FOR i FROM 0 TO 10 STEP 2 draw(i);\nfor j from 0 to 1 {}";
        let program = parse_source(source).unwrap();

        assert_eq!(
            program.to_string(),
            "X is 1;\nfor i from 0 to 10 step 2 {\n    draw(i);\n}\nfor j from 0 to 1 { }\n"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let source = "for i from 0 to 1 { for j from 0 to 1 { dot(i, j); } }";
        let program = parse_source(source).unwrap();

        assert_eq!(
            program.to_string(),
            "for i from 0 to 1 {\n    for j from 0 to 1 {\n        dot(i, j);\n    }\n}\n"
        );
    }
}
