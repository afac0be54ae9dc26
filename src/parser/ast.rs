// AST (Abstract Syntax Tree) definitions for the drawing language

use std::fmt;
use std::hash::{Hash, Hasher};

/// Source location information for error reporting
///
/// `offset` counts characters from the start of the input, `line` and
/// `column` are both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// An identifier as written in the source together with its case-folded form.
///
/// Equality and hashing use the folded form only, so `Draw` and `draw` name
/// the same symbol while each node still remembers how it was spelled.
#[derive(Debug, Clone, Default)]
pub struct Identifier {
    raw: String,
    folded: String,
}

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Identifier { raw, folded }
    }

    /// Replace the spelling; the folded form is re-derived immediately.
    pub fn set(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.folded = self.raw.to_lowercase();
    }

    /// Original spelling
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercase form used for symbol resolution
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Identifier::new(raw)
    }
}

/// Discriminant shared by every node, for consumers that dispatch on kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    StatementList,
    ArgList,
    Assignment,
    Call,
    ForStatement,
    BinaryExpression,
    UnaryExpression,
    DigitLiteral,
    CallExpression,
    SymbolExpression,
    TupleExpression,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    /// Binding rank; lower binds tighter. Unary expressions and atoms are rank 0.
    pub fn rank(self) -> u8 {
        match self {
            BinOp::Pow => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Add | BinOp::Sub => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "**",
        }
    }
}

/// Loosest binary rank, where expression parsing starts
pub const MAX_RANK: u8 = 3;

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Neg, // -x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
        }
    }
}

/// Ordered statements of a program or loop body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementList {
    pub statements: Vec<Statement>,
    pub line: usize,
}

impl StatementList {
    pub fn new(line: usize) -> Self {
        StatementList {
            statements: Vec::new(),
            line,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::StatementList
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Call arguments, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgList {
    pub args: Vec<Expression>,
    pub line: usize,
}

impl ArgList {
    pub fn new(line: usize) -> Self {
        ArgList {
            args: Vec::new(),
            line,
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.args.iter()
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::ArgList
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name is expr;`
    Assignment {
        target: Identifier,
        value: Expression,
        line: usize,
    },
    /// `name(args);`
    Call {
        callee: Identifier,
        args: ArgList,
        line: usize,
    },
    /// `for name from expr to expr [step expr] block`
    For {
        variable: Identifier,
        from: Expression,
        to: Expression,
        step: Option<Expression>,
        body: StatementList,
        line: usize,
    },
}

impl Statement {
    pub fn line(&self) -> usize {
        match self {
            Statement::Assignment { line, .. } => *line,
            Statement::Call { line, .. } => *line,
            Statement::For { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Assignment { .. } => NodeKind::Assignment,
            Statement::Call { .. } => NodeKind::Call,
            Statement::For { .. } => NodeKind::ForStatement,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        op: BinOp,
        left: Box<Expression>,
        right: Box<Expression>,
        line: usize,
    },
    Unary {
        op: UnOp,
        operand: Box<Expression>,
        line: usize,
    },
    /// `digits` is the literal's canonical spelling: no leading zeros in the
    /// integer part, no trailing zeros in the fraction
    Digit {
        value: f64,
        digits: String,
        line: usize,
    },
    Symbol {
        name: Identifier,
        line: usize,
    },
    Call {
        callee: Identifier,
        args: ArgList,
        line: usize,
    },
    /// Always holds at least two elements
    Tuple {
        elements: Vec<Expression>,
        line: usize,
    },
}

impl Expression {
    pub fn line(&self) -> usize {
        match self {
            Expression::Binary { line, .. } => *line,
            Expression::Unary { line, .. } => *line,
            Expression::Digit { line, .. } => *line,
            Expression::Symbol { line, .. } => *line,
            Expression::Call { line, .. } => *line,
            Expression::Tuple { line, .. } => *line,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Binary { .. } => NodeKind::BinaryExpression,
            Expression::Unary { .. } => NodeKind::UnaryExpression,
            Expression::Digit { .. } => NodeKind::DigitLiteral,
            Expression::Symbol { .. } => NodeKind::SymbolExpression,
            Expression::Call { .. } => NodeKind::CallExpression,
            Expression::Tuple { .. } => NodeKind::TupleExpression,
        }
    }

    /// Binding rank of the expression's outermost operator (0 for atoms and negation)
    pub fn rank(&self) -> u8 {
        match self {
            Expression::Binary { op, .. } => op.rank(),
            _ => 0,
        }
    }
}
