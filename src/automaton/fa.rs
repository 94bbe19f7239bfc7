//! [`FiniteAutomaton`] (spec §3) and Thompson construction from a regex
//! [`Ast`](crate::regex::Ast), grounded on the teacher's `core::nfa`
//! (`Builder`/`Fragment`) and `core::sim` (epsilon closure, `move`).
//!
//! Bounding-box/visualization bookkeeping from the teacher is dropped —
//! there is no GUI in this crate.

use std::collections::BTreeSet;

use crate::regex::Ast;
use crate::symbol::{SymbolId, SymbolTable};

/// Identifier of a state within a single [`FiniteAutomaton`]; dense, starts
/// at 0. Mirrors the teacher's `automaton::StateId`.
pub type StateId = u32;

/// Labels a transition: either epsilon or a concrete symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    Eps,
    Sym(SymbolId),
}

#[derive(Debug, Clone)]
struct Transition {
    to: StateId,
    label: EdgeLabel,
}

/// A (possibly nondeterministic, possibly carrying epsilon transitions)
/// finite automaton, per spec §3. Intermediate construction products may
/// contain epsilon transitions; [`FiniteAutomaton::decompose`] (see
/// `automaton::decomposition`) requires them to have been eliminated first
/// (e.g. via [`FiniteAutomaton::remove_epsilons`]).
#[derive(Debug, Clone)]
pub struct FiniteAutomaton {
    num_states: u32,
    pub start_states: Vec<StateId>,
    pub final_states: Vec<StateId>,
    adjacency: Vec<Vec<Transition>>,
}

impl FiniteAutomaton {
    #[must_use]
    pub fn num_states(&self) -> u32 {
        self.num_states
    }

    #[must_use]
    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.num_states
    }

    fn transitions(&self, state: StateId) -> &[Transition] {
        &self.adjacency[state as usize]
    }

    /// The distinct, non-epsilon symbols used by this automaton.
    #[must_use]
    pub fn alphabet(&self) -> Vec<SymbolId> {
        let mut syms: BTreeSet<SymbolId> = BTreeSet::new();
        for row in &self.adjacency {
            for tr in row {
                if let EdgeLabel::Sym(s) = tr.label {
                    syms.insert(s);
                }
            }
        }
        syms.into_iter().collect()
    }

    /// Whether this automaton still contains epsilon transitions.
    #[must_use]
    pub fn has_epsilons(&self) -> bool {
        self.adjacency
            .iter()
            .any(|row| row.iter().any(|tr| matches!(tr.label, EdgeLabel::Eps)))
    }

    pub fn epsilon_closure(&self, seed: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = seed.clone();
        let mut stack: Vec<StateId> = seed.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for tr in self.transitions(state) {
                if tr.label == EdgeLabel::Eps && closure.insert(tr.to) {
                    stack.push(tr.to);
                }
            }
        }
        closure
    }

    pub fn move_on(&self, states: &BTreeSet<StateId>, symbol: SymbolId) -> BTreeSet<StateId> {
        let mut frontier = BTreeSet::new();
        for &state in states {
            for tr in self.transitions(state) {
                if tr.label == EdgeLabel::Sym(symbol) {
                    frontier.insert(tr.to);
                }
            }
        }
        frontier
    }

    /// Simulates the automaton over a word of interned symbols, tolerating
    /// nondeterminism and epsilon transitions (used for tests only — the
    /// production pipelines go through decomposition instead).
    #[must_use]
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let mut current: BTreeSet<StateId> = self.start_states.iter().copied().collect();
        current = self.epsilon_closure(&current);
        for &symbol in word {
            let moved = self.move_on(&current, symbol);
            current = self.epsilon_closure(&moved);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|s| self.final_states.contains(s))
    }

    /// Returns every `(from, label, to)` triple, for decomposition.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (StateId, EdgeLabel, StateId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, row)| {
            row.iter()
                .map(move |tr| (from as StateId, tr.label, tr.to))
        })
    }

    /// Builds a single-state automaton accepting only the empty string,
    /// needed as the unit automaton for an ECFG production `A -> $`.
    #[must_use]
    pub fn epsilon_only() -> Self {
        Self {
            num_states: 1,
            start_states: vec![0],
            final_states: vec![0],
            adjacency: vec![Vec::new()],
        }
    }
}

/// Builds a [`FiniteAutomaton`] from a regex AST using Thompson's
/// construction, interning atom labels into `symbols`.
#[must_use]
pub fn thompson_from_ast(ast: &Ast, symbols: &mut SymbolTable) -> FiniteAutomaton {
    let mut builder = Builder::new(symbols);
    let fragment = builder.build(ast);
    builder.finalize(fragment.start, fragment.accepts)
}

struct Fragment {
    start: StateId,
    accepts: Vec<StateId>,
}

struct Builder<'a> {
    adjacency: Vec<Vec<Transition>>,
    symbols: &'a mut SymbolTable,
}

impl<'a> Builder<'a> {
    fn new(symbols: &'a mut SymbolTable) -> Self {
        Self {
            adjacency: Vec::new(),
            symbols,
        }
    }

    fn new_state(&mut self) -> StateId {
        let id = self.adjacency.len() as StateId;
        self.adjacency.push(Vec::new());
        id
    }

    fn add_edge(&mut self, from: StateId, to: StateId, label: EdgeLabel) {
        self.adjacency[from as usize].push(Transition { to, label });
    }

    fn build(&mut self, ast: &Ast) -> Fragment {
        match ast {
            Ast::Epsilon => self.build_epsilon(),
            Ast::Atom(label) => self.build_atom(label),
            Ast::Concat(lhs, rhs) => self.build_concat(lhs, rhs),
            Ast::Alt(lhs, rhs) => self.build_alternation(lhs, rhs),
            Ast::Star(inner) => self.build_star(inner),
            Ast::Plus(inner) => self.build_plus(inner),
            Ast::Opt(inner) => self.build_optional(inner),
        }
    }

    fn build_epsilon(&mut self) -> Fragment {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, accept, EdgeLabel::Eps);
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_atom(&mut self, label: &str) -> Fragment {
        let symbol = self.symbols.intern(label);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, accept, EdgeLabel::Sym(symbol));
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_concat(&mut self, lhs: &Ast, rhs: &Ast) -> Fragment {
        let left = self.build(lhs);
        let right = self.build(rhs);
        for accept in &left.accepts {
            self.add_edge(*accept, right.start, EdgeLabel::Eps);
        }
        Fragment {
            start: left.start,
            accepts: right.accepts,
        }
    }

    fn build_alternation(&mut self, lhs: &Ast, rhs: &Ast) -> Fragment {
        let left = self.build(lhs);
        let right = self.build(rhs);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, left.start, EdgeLabel::Eps);
        self.add_edge(start, right.start, EdgeLabel::Eps);
        for state in left.accepts.iter().chain(right.accepts.iter()) {
            self.add_edge(*state, accept, EdgeLabel::Eps);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_star(&mut self, inner: &Ast) -> Fragment {
        let frag = self.build(inner);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, frag.start, EdgeLabel::Eps);
        self.add_edge(start, accept, EdgeLabel::Eps);
        for state in frag.accepts {
            self.add_edge(state, frag.start, EdgeLabel::Eps);
            self.add_edge(state, accept, EdgeLabel::Eps);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_plus(&mut self, inner: &Ast) -> Fragment {
        let frag = self.build(inner);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, frag.start, EdgeLabel::Eps);
        for state in &frag.accepts {
            self.add_edge(*state, frag.start, EdgeLabel::Eps);
            self.add_edge(*state, accept, EdgeLabel::Eps);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn build_optional(&mut self, inner: &Ast) -> Fragment {
        let frag = self.build(inner);
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, frag.start, EdgeLabel::Eps);
        self.add_edge(start, accept, EdgeLabel::Eps);
        for state in frag.accepts {
            self.add_edge(state, accept, EdgeLabel::Eps);
        }
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn finalize(self, start: StateId, accepts: Vec<StateId>) -> FiniteAutomaton {
        let mut accepts = accepts;
        accepts.sort_unstable();
        accepts.dedup();
        FiniteAutomaton {
            num_states: self.adjacency.len() as u32,
            start_states: vec![start],
            final_states: accepts,
            adjacency: self.adjacency,
        }
    }
}

/// Builds a [`FiniteAutomaton`] directly from explicit transitions, start
/// and final sets — the shape a graph-to-NFA adapter or an
/// intersection/block-diagonal construction produces.
#[must_use]
pub fn from_parts(
    num_states: u32,
    start_states: Vec<StateId>,
    final_states: Vec<StateId>,
    transitions: &[(StateId, SymbolId, StateId)],
) -> FiniteAutomaton {
    let mut adjacency = vec![Vec::new(); num_states as usize];
    for &(from, sym, to) in transitions {
        adjacency[from as usize].push(Transition {
            to,
            label: EdgeLabel::Sym(sym),
        });
    }
    FiniteAutomaton {
        num_states,
        start_states,
        final_states,
        adjacency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(symbols: &mut SymbolTable, labels: &[&str]) -> Vec<SymbolId> {
        labels.iter().map(|l| symbols.intern(l)).collect()
    }

    #[test]
    fn epsilon_accepts_only_empty_word() {
        let mut symbols = SymbolTable::new();
        let nfa = thompson_from_ast(&Ast::Epsilon, &mut symbols);
        assert!(nfa.accepts(&[]));
        let a = symbols.intern("a");
        assert!(!nfa.accepts(&[a]));
    }

    #[test]
    fn star_accepts_any_repetition() {
        let mut symbols = SymbolTable::new();
        let ast = Ast::star(Ast::Atom("a".into()));
        let nfa = thompson_from_ast(&ast, &mut symbols);
        assert!(nfa.accepts(&[]));
        assert!(nfa.accepts(&word(&mut symbols, &["a"])));
        assert!(nfa.accepts(&word(&mut symbols, &["a", "a", "a"])));
        let b = symbols.intern("b");
        assert!(!nfa.accepts(&[b]));
    }

    #[test]
    fn concat_requires_order() {
        let mut symbols = SymbolTable::new();
        let ast = Ast::concat(Ast::Atom("a".into()), Ast::Atom("b".into()));
        let nfa = thompson_from_ast(&ast, &mut symbols);
        assert!(nfa.accepts(&word(&mut symbols, &["a", "b"])));
        assert!(!nfa.accepts(&word(&mut symbols, &["b", "a"])));
    }

    #[test]
    fn alternation_accepts_either_branch() {
        let mut symbols = SymbolTable::new();
        let ast = Ast::alt(Ast::Atom("a".into()), Ast::Atom("b".into()));
        let nfa = thompson_from_ast(&ast, &mut symbols);
        assert!(nfa.accepts(&word(&mut symbols, &["a"])));
        assert!(nfa.accepts(&word(&mut symbols, &["b"])));
        assert!(!nfa.accepts(&word(&mut symbols, &["a", "b"])));
    }
}
