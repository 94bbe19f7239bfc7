//! Boolean decomposition of a (deterministic, epsilon-free)
//! [`FiniteAutomaton`] into one adjacency matrix per symbol (spec §4.1),
//! grounded on `original_source/project/boolean_decomposition.py`'s
//! `BooleanAdjacencies` class.

use std::collections::BTreeMap;

use crate::automaton::fa::{EdgeLabel, FiniteAutomaton, StateId};
use crate::matrix::BooleanMatrix;
use crate::symbol::SymbolId;

/// Per-symbol boolean adjacency matrices for a single automaton, plus the
/// start/final sets needed to read off acceptance from a reachability
/// matrix.
#[derive(Debug, Clone)]
pub struct BooleanDecomposition {
    pub num_states: u32,
    pub start_states: Vec<StateId>,
    pub final_states: Vec<StateId>,
    per_symbol: BTreeMap<SymbolId, BooleanMatrix>,
}

impl BooleanDecomposition {
    #[must_use]
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.per_symbol.keys().copied()
    }

    #[must_use]
    pub fn matrix(&self, symbol: SymbolId) -> Option<&BooleanMatrix> {
        self.per_symbol.get(&symbol)
    }

    /// The union of every per-symbol matrix: the automaton's plain
    /// adjacency, ignoring edge labels.
    #[must_use]
    pub fn label_erased_adjacency(&self) -> BooleanMatrix {
        let mut out = BooleanMatrix::zero(self.num_states as usize);
        for m in self.per_symbol.values() {
            out.or_assign(m);
        }
        out
    }

    /// Reachability closure over the label-erased adjacency (spec §4.1),
    /// grounded on `boolean_decomposition.py::transitive_closure`.
    #[must_use]
    pub fn transitive_closure(&self) -> BooleanMatrix {
        self.label_erased_adjacency().transitive_closure()
    }
}

/// Decomposes a finite automaton into per-symbol boolean matrices.
///
/// The automaton must not contain epsilon transitions — run it through
/// [`crate::automaton::dfa::determinize`] first if needed, since subset
/// construction already eliminates them.
#[must_use]
pub fn decompose(fa: &FiniteAutomaton) -> BooleanDecomposition {
    let n = fa.num_states() as usize;
    let mut per_symbol: BTreeMap<SymbolId, BooleanMatrix> = BTreeMap::new();
    for (from, label, to) in fa.edges() {
        let EdgeLabel::Sym(symbol) = label else {
            continue;
        };
        let matrix = per_symbol
            .entry(symbol)
            .or_insert_with(|| BooleanMatrix::zero(n));
        matrix.set(from as usize, to as usize, true);
    }
    BooleanDecomposition {
        num_states: fa.num_states(),
        start_states: fa.start_states.clone(),
        final_states: fa.final_states.clone(),
        per_symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::dfa;
    use crate::automaton::fa::thompson_from_ast;
    use crate::regex::Ast;
    use crate::symbol::SymbolTable;

    #[test]
    fn decomposition_has_one_matrix_per_distinct_symbol() {
        let mut symbols = SymbolTable::new();
        let ast = Ast::build("a b a").unwrap();
        let nfa = thompson_from_ast(&ast, &mut symbols);
        let d = dfa::determinize(&nfa);
        let fa = d.to_finite_automaton();
        let decomp = decompose(&fa);
        assert_eq!(decomp.symbols().count(), 2);
    }

    #[test]
    fn transitive_closure_connects_start_to_accepting() {
        let mut symbols = SymbolTable::new();
        let ast = Ast::build("a b").unwrap();
        let nfa = thompson_from_ast(&ast, &mut symbols);
        let d = dfa::determinize(&nfa);
        let fa = d.to_finite_automaton();
        let decomp = decompose(&fa);
        let closure = decomp.transitive_closure();
        let start = decomp.start_states[0] as usize;
        assert!(decomp
            .final_states
            .iter()
            .any(|&f| closure.get(start, f as usize)));
    }
}
