//! Context-free grammar data model (spec §3), loader, weak Chomsky normal
//! form transform, and the two CFPQ evaluators (Hellings and matrix).

pub mod hellings;
pub mod loader;
pub mod matrix_cfpq;
pub mod wcnf;

use std::collections::BTreeSet;

/// A grammar symbol: either a nonterminal variable or a terminal label,
/// distinguished the way `original_source/project/recursive_finite_state_machines.py`'s
/// `ECFG._read_line` distinguishes them — uppercase-initial is a variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Variable(String),
    Terminal(String),
}

impl Symbol {
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.chars().next() {
            Some(c) if c.is_uppercase() => Symbol::Variable(token.to_string()),
            _ => Symbol::Terminal(token.to_string()),
        }
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Symbol::Variable(v) => Some(v),
            Symbol::Terminal(_) => None,
        }
    }
}

/// One production `head -> body`, where an empty `body` denotes `A -> ε`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
    pub head: String,
    pub body: Vec<Symbol>,
}

/// A context-free grammar with unrestricted production shape.
#[derive(Debug, Clone, Default)]
pub struct Cfg {
    pub start: String,
    pub productions: Vec<Production>,
}

impl Cfg {
    #[must_use]
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            productions: Vec::new(),
        }
    }

    pub fn add_production(&mut self, head: impl Into<String>, body: Vec<Symbol>) {
        self.productions.push(Production {
            head: head.into(),
            body,
        });
    }

    /// Every distinct variable appearing as a production head or body
    /// symbol, plus the start symbol.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        vars.insert(self.start.clone());
        for p in &self.productions {
            vars.insert(p.head.clone());
            for sym in &p.body {
                if let Symbol::Variable(v) = sym {
                    vars.insert(v.clone());
                }
            }
        }
        vars
    }
}

/// A grammar known to already satisfy weak Chomsky normal form: every
/// production is `A -> ε`, `A -> a`, or `A -> B C`. The type-level split
/// keeps [`hellings::evaluate`] and [`matrix_cfpq::evaluate`] from
/// accidentally being handed a grammar still carrying arbitrary-length
/// bodies.
#[derive(Debug, Clone)]
pub struct WcnfCfg(pub(crate) Cfg);

impl WcnfCfg {
    #[must_use]
    pub fn inner(&self) -> &Cfg {
        &self.0
    }
}
