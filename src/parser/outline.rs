//! Flattened, one-row-per-node view of the AST
//!
//! Used by `icelang ast` and by the inspector's outline pane. Rows come out in
//! pre-order; nesting is encoded as a depth, two spaces per level when
//! rendered as text. Loop parts (`from`, `to`, `step`, `body`) get their own
//! unlabelled-kind rows so the tree reads like the source.

use crate::parser::ast::*;

/// One line of the outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub depth: usize,
    pub label: String,
    pub line: usize,
    /// `None` for rows that name a part of their parent rather than a node
    pub kind: Option<NodeKind>,
}

/// Flatten `program` into outline rows.
pub fn outline(program: &StatementList) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    rows.push(OutlineRow {
        depth: 0,
        label: format!("program [{}]", program.len()),
        line: program.line,
        kind: Some(NodeKind::StatementList),
    });
    push_statements(&mut rows, program, 1);
    rows
}

/// Render rows as indented text, one row per line.
pub fn render_outline(rows: &[OutlineRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&"  ".repeat(row.depth));
        out.push_str(&row.label);
        out.push_str(&format!("  @{}\n", row.line));
    }
    out
}

fn push_statements(rows: &mut Vec<OutlineRow>, list: &StatementList, depth: usize) {
    for statement in list {
        push_statement(rows, statement, depth);
    }
}

fn push_statement(rows: &mut Vec<OutlineRow>, statement: &Statement, depth: usize) {
    match statement {
        Statement::Assignment {
            target,
            value,
            line,
        } => {
            rows.push(node_row(depth, format!("assign {}", target), *line, statement.kind()));
            push_expression(rows, value, depth + 1);
        }
        Statement::Call { callee, args, line } => {
            rows.push(node_row(depth, format!("call {}", callee), *line, statement.kind()));
            push_arguments(rows, args, depth + 1);
        }
        Statement::For {
            variable,
            from,
            to,
            step,
            body,
            line,
        } => {
            rows.push(node_row(depth, format!("for {}", variable), *line, statement.kind()));

            rows.push(part_row(depth + 1, "from", from.line()));
            push_expression(rows, from, depth + 2);
            rows.push(part_row(depth + 1, "to", to.line()));
            push_expression(rows, to, depth + 2);
            if let Some(step) = step {
                rows.push(part_row(depth + 1, "step", step.line()));
                push_expression(rows, step, depth + 2);
            }

            rows.push(OutlineRow {
                depth: depth + 1,
                label: format!("body [{}]", body.len()),
                line: body.line,
                kind: Some(NodeKind::StatementList),
            });
            push_statements(rows, body, depth + 2);
        }
    }
}

fn push_arguments(rows: &mut Vec<OutlineRow>, args: &ArgList, depth: usize) {
    for arg in args.iter() {
        push_expression(rows, arg, depth);
    }
}

fn push_expression(rows: &mut Vec<OutlineRow>, expr: &Expression, depth: usize) {
    let kind = expr.kind();
    match expr {
        Expression::Binary {
            op,
            left,
            right,
            line,
        } => {
            rows.push(node_row(depth, format!("binary {}", op.symbol()), *line, kind));
            push_expression(rows, left, depth + 1);
            push_expression(rows, right, depth + 1);
        }
        Expression::Unary { op, operand, line } => {
            rows.push(node_row(depth, format!("unary {}", op.symbol()), *line, kind));
            push_expression(rows, operand, depth + 1);
        }
        Expression::Digit { digits, line, .. } => {
            rows.push(node_row(depth, format!("number {}", digits), *line, kind));
        }
        Expression::Symbol { name, line } => {
            rows.push(node_row(depth, format!("symbol {}", name), *line, kind));
        }
        Expression::Call { callee, args, line } => {
            rows.push(node_row(depth, format!("call {}", callee), *line, kind));
            push_arguments(rows, args, depth + 1);
        }
        Expression::Tuple { elements, line } => {
            rows.push(node_row(depth, format!("tuple [{}]", elements.len()), *line, kind));
            for element in elements {
                push_expression(rows, element, depth + 1);
            }
        }
    }
}

fn node_row(depth: usize, label: String, line: usize, kind: NodeKind) -> OutlineRow {
    OutlineRow {
        depth,
        label,
        line,
        kind: Some(kind),
    }
}

fn part_row(depth: usize, label: &str, line: usize) -> OutlineRow {
    OutlineRow {
        depth,
        label: label.to_string(),
        line,
        kind: None,
    }
}
