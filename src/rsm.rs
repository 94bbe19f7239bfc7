//! Recursive state machines (spec §3/§9), grounded on
//! `original_source/project/recursive_finite_state_machines.py::RecursiveFiniteAutomaton`
//! and `ECFG.to_recursive_fa`.

use indexmap::IndexMap;

use crate::automaton::dfa::{self, Dfa};
use crate::automaton::fa::thompson_from_ast;
use crate::automaton::min;
use crate::ecfg::Ecfg;
use crate::symbol::SymbolTable;

/// A recursive state machine: a minimized DFA per variable, any of which
/// may reference another variable as a call symbol in its alphabet. Stored
/// as a flat arena keyed by variable (spec §9) rather than a graph of
/// mutually-referencing automata, since variable names are a stable,
/// interned key.
#[derive(Debug, Clone)]
pub struct RecursiveStateMachine {
    pub start: String,
    pub automata: IndexMap<String, Dfa>,
}

impl RecursiveStateMachine {
    #[must_use]
    pub fn automaton_for(&self, variable: &str) -> Option<&Dfa> {
        self.automata.get(variable)
    }

    #[must_use]
    pub fn start_automaton(&self) -> Option<&Dfa> {
        self.automaton_for(&self.start)
    }
}

/// Builds a recursive state machine from an ECFG, minimizing each
/// variable's regex body into a DFA (`ECFG.to_recursive_fa` composed with
/// `RecursiveFiniteAutomaton.minimize`, folded into one pass here since
/// nothing downstream needs the unminimized intermediate).
#[must_use]
pub fn from_ecfg(ecfg: &Ecfg, symbols: &mut SymbolTable) -> RecursiveStateMachine {
    let mut automata = IndexMap::new();
    for (head, ast) in &ecfg.productions {
        let nfa = thompson_from_ast(ast, symbols);
        let dfa = min::minimize(&dfa::determinize(&nfa));
        automata.insert(head.clone(), dfa);
    }
    RecursiveStateMachine {
        start: ecfg.start.clone(),
        automata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecfg;

    #[test]
    fn builds_one_automaton_per_variable() {
        let mut symbols = SymbolTable::new();
        let text = "S -> a S b | $\nA -> a+";
        let grammar = ecfg::load(text, "S").unwrap();
        let rsm = from_ecfg(&grammar, &mut symbols);
        assert!(rsm.automaton_for("S").is_some());
        assert!(rsm.automaton_for("A").is_some());
        assert!(rsm.automaton_for("Missing").is_none());
    }

    #[test]
    fn start_automaton_accepts_the_empty_word() {
        let mut symbols = SymbolTable::new();
        let grammar = ecfg::load("S -> a S b | $", "S").unwrap();
        let rsm = from_ecfg(&grammar, &mut symbols);
        let start = rsm.start_automaton().unwrap();
        assert!(start.accepts(&[]));
    }
}
