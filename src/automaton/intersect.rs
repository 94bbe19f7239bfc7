//! Tensor-product finite-automaton intersection (spec §4.2), grounded on
//! `original_source/project/rpq/all_pairs.py::finite_automata_intersection`.

use crate::automaton::decomposition::{decompose, BooleanDecomposition};
use crate::automaton::fa::{FiniteAutomaton, StateId};
use crate::matrix::BooleanMatrix;

/// The boolean-decomposed intersection of two automata: a composite state
/// `(i, j)` is addressed by the flattened index `i * rhs.num_states + j`,
/// the same arithmetic [`BooleanMatrix::kron`] uses, so that
/// [`project_left`]/[`project_right`] invert it directly.
#[derive(Debug, Clone)]
pub struct Intersection {
    pub lhs_size: usize,
    pub rhs_size: usize,
    pub start_states: Vec<StateId>,
    pub final_states: Vec<StateId>,
    pub adjacency: BooleanMatrix,
}

impl Intersection {
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.lhs_size * self.rhs_size
    }

    /// Recovers the left-operand state a composite index came from.
    #[must_use]
    pub fn project_left(&self, composite: usize) -> usize {
        BooleanMatrix::project_lhs(composite, self.rhs_size)
    }

    /// Recovers the right-operand state a composite index came from.
    #[must_use]
    pub fn project_right(&self, composite: usize) -> usize {
        BooleanMatrix::project_rhs(composite, self.rhs_size)
    }

    #[must_use]
    pub fn transitive_closure(&self) -> BooleanMatrix {
        self.adjacency.transitive_closure()
    }

    /// Whether the intersection accepts: some start composite state can
    /// reach some final composite state (spec §8 soundness invariant).
    #[must_use]
    pub fn is_nonempty(&self) -> bool {
        let closure = self.transitive_closure();
        self.start_states.iter().any(|&s| {
            self.final_states
                .iter()
                .any(|&f| s == f || closure.get(s as usize, f as usize))
        })
    }
}

/// Intersects two epsilon-free, deterministic automata by tensoring their
/// per-symbol boolean matrices and keeping only shared symbols (a symbol
/// absent from one operand's alphabet contributes no edges to either, so
/// omitting it from the product is equivalent to, and cheaper than,
/// tensoring a zero matrix).
#[must_use]
pub fn intersect(lhs: &FiniteAutomaton, rhs: &FiniteAutomaton) -> Intersection {
    let lhs_d = decompose(lhs);
    let rhs_d = decompose(rhs);
    intersect_decomposed(&lhs_d, &rhs_d)
}

fn intersect_decomposed(lhs: &BooleanDecomposition, rhs: &BooleanDecomposition) -> Intersection {
    let lhs_size = lhs.num_states as usize;
    let rhs_size = rhs.num_states as usize;
    let mut adjacency = BooleanMatrix::zero(lhs_size * rhs_size);

    for symbol in lhs.symbols() {
        let (Some(lhs_mat), Some(rhs_mat)) = (lhs.matrix(symbol), rhs.matrix(symbol)) else {
            continue;
        };
        let product = lhs_mat.kron(rhs_mat);
        adjacency.or_assign(&product);
    }

    let mut start_states = Vec::new();
    for &i in &lhs.start_states {
        for &j in &rhs.start_states {
            start_states.push(i * rhs_size as u32 + j);
        }
    }

    let mut final_states = Vec::new();
    for &i in &lhs.final_states {
        for &j in &rhs.final_states {
            final_states.push(i * rhs_size as u32 + j);
        }
    }

    Intersection {
        lhs_size,
        rhs_size,
        start_states,
        final_states,
        adjacency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::dfa;
    use crate::automaton::fa::thompson_from_ast;
    use crate::regex::Ast;
    use crate::symbol::SymbolTable;

    fn dfa_of(pattern: &str, symbols: &mut SymbolTable) -> FiniteAutomaton {
        let ast = Ast::build(pattern).unwrap();
        let nfa = thompson_from_ast(&ast, symbols);
        dfa::determinize(&nfa).to_finite_automaton()
    }

    #[test]
    fn intersection_of_disjoint_languages_is_empty() {
        let mut symbols = SymbolTable::new();
        let a_star = dfa_of("a*", &mut symbols);
        let b_star = dfa_of("b+", &mut symbols);
        let inter = intersect(&a_star, &b_star);
        assert!(!inter.is_nonempty());
    }

    #[test]
    fn intersection_of_overlapping_languages_is_nonempty() {
        let mut symbols = SymbolTable::new();
        let a_star = dfa_of("a*", &mut symbols);
        let a_or_b = dfa_of("a | b", &mut symbols);
        let inter = intersect(&a_star, &a_or_b);
        assert!(inter.is_nonempty());
    }

    #[test]
    fn projection_recovers_operand_states() {
        let mut symbols = SymbolTable::new();
        let a_star = dfa_of("a*", &mut symbols);
        let b_star = dfa_of("b*", &mut symbols);
        let inter = intersect(&a_star, &b_star);
        let composite = inter.rhs_size;
        assert_eq!(inter.project_left(composite), 1);
        assert_eq!(inter.project_right(composite), 0);
    }
}
