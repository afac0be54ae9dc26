//! Case-insensitive index of every name a program mentions
//!
//! Names are keyed by their folded form, so `Draw` and `draw` share one
//! entry. Each entry keeps the spellings seen (in order of first
//! appearance) and every use with its line.

use crate::parser::ast::*;
use rustc_hash::FxHashMap;
use std::fmt;

/// How a name is used at one site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolUse {
    Assigned,
    LoopVariable,
    Called,
    Read,
}

impl fmt::Display for SymbolUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolUse::Assigned => "assigned",
            SymbolUse::LoopVariable => "loop variable",
            SymbolUse::Called => "called",
            SymbolUse::Read => "read",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub spellings: Vec<String>,
    pub first_line: usize,
    pub uses: Vec<(SymbolUse, usize)>,
}

impl SymbolEntry {
    fn new(line: usize) -> Self {
        SymbolEntry {
            spellings: Vec::new(),
            first_line: line,
            uses: Vec::new(),
        }
    }

    /// Spelling of the first occurrence
    pub fn name(&self) -> &str {
        self.spellings.first().map(String::as_str).unwrap_or("")
    }

    pub fn count(&self, kind: SymbolUse) -> usize {
        self.uses.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Distinct use kinds, in the order they first occur
    pub fn kinds(&self) -> Vec<SymbolUse> {
        let mut kinds = Vec::new();
        for (kind, _) in &self.uses {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    symbols: FxHashMap<String, SymbolEntry>,
}

impl SymbolIndex {
    pub fn build(program: &StatementList) -> Self {
        let mut index = SymbolIndex::default();
        index.visit_statements(program);
        index
    }

    /// Look up `name` ignoring case
    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(Identifier::new(name).folded())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Entries ordered by folded name
    pub fn sorted(&self) -> Vec<(&str, &SymbolEntry)> {
        let mut entries: Vec<(&str, &SymbolEntry)> = self
            .symbols
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    fn record(&mut self, name: &Identifier, kind: SymbolUse, line: usize) {
        let entry = self
            .symbols
            .entry(name.folded().to_string())
            .or_insert_with(|| SymbolEntry::new(line));

        if !entry.spellings.iter().any(|s| s == name.as_str()) {
            entry.spellings.push(name.as_str().to_string());
        }
        entry.first_line = entry.first_line.min(line);
        entry.uses.push((kind, line));
    }

    fn visit_statements(&mut self, list: &StatementList) {
        for statement in list {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assignment {
                target,
                value,
                line,
            } => {
                self.record(target, SymbolUse::Assigned, *line);
                self.visit_expression(value);
            }
            Statement::Call { callee, args, line } => {
                self.record(callee, SymbolUse::Called, *line);
                for arg in args.iter() {
                    self.visit_expression(arg);
                }
            }
            Statement::For {
                variable,
                from,
                to,
                step,
                body,
                line,
            } => {
                self.record(variable, SymbolUse::LoopVariable, *line);
                self.visit_expression(from);
                self.visit_expression(to);
                if let Some(step) = step {
                    self.visit_expression(step);
                }
                self.visit_statements(body);
            }
        }
    }

    fn visit_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Binary { left, right, .. } => {
                self.visit_expression(left);
                self.visit_expression(right);
            }
            Expression::Unary { operand, .. } => self.visit_expression(operand),
            Expression::Digit { .. } => {}
            Expression::Symbol { name, line } => self.record(name, SymbolUse::Read, *line),
            Expression::Call { callee, args, line } => {
                self.record(callee, SymbolUse::Called, *line);
                for arg in args.iter() {
                    self.visit_expression(arg);
                }
            }
            Expression::Tuple { elements, .. } => {
                for element in elements {
                    self.visit_expression(element);
                }
            }
        }
    }
}

impl fmt::Display for SymbolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, entry) in self.sorted() {
            let kinds: Vec<String> = entry.kinds().iter().map(|k| k.to_string()).collect();
            write!(f, "{}  line {}  {}", entry.name(), entry.first_line, kinds.join(", "))?;
            if entry.spellings.len() > 1 {
                write!(f, "  (also {})", entry.spellings[1..].join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
