//! Matrix-based CFPQ (spec §4.7): a boolean matrix per nonterminal, updated
//! to a fixed point. Grounded on
//! `original_source/project/cfpq/matrix.py::get_reachable_pairs`.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::automaton::fa::StateId;
use crate::cfg::{Symbol, WcnfCfg};
use crate::graph::Graph;
use crate::matrix::BooleanMatrix;
use crate::symbol::SymbolTable;

use super::hellings::Triple;

/// Evaluates a weak-CNF grammar against a graph via the matrix fixed-point
/// algorithm, returning the same triple shape as [`super::hellings::evaluate`]
/// so callers can share [`super::hellings::reachable_pairs`].
#[must_use]
pub fn evaluate(graph: &Graph, grammar: &WcnfCfg, symbols: &SymbolTable) -> HashSet<Triple> {
    let cfg = grammar.inner();
    let n = graph.num_vertices();
    let mut by_nonterminal: HashMap<String, BooleanMatrix> = cfg
        .variables()
        .into_iter()
        .map(|v| (v, BooleanMatrix::zero(n)))
        .collect();

    for production in &cfg.productions {
        match production.body.as_slice() {
            [] => {
                let matrix = by_nonterminal.entry(production.head.clone()).or_insert_with(|| BooleanMatrix::zero(n));
                for v in 0..n {
                    matrix.set(v, v, true);
                }
            }
            [Symbol::Terminal(t)] => {
                if let Some(symbol) = symbols.lookup(t) {
                    let matrix = by_nonterminal
                        .entry(production.head.clone())
                        .or_insert_with(|| BooleanMatrix::zero(n));
                    for &(u, edge_symbol, v) in graph.edges() {
                        if edge_symbol == symbol {
                            matrix.set(u as usize, v as usize, true);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let binary_productions: Vec<(&str, &str, &str)> = cfg
        .productions
        .iter()
        .filter_map(|p| match p.body.as_slice() {
            [Symbol::Variable(a), Symbol::Variable(b)] => Some((p.head.as_str(), a.as_str(), b.as_str())),
            _ => None,
        })
        .collect();

    let mut iterations = 0usize;
    loop {
        iterations += 1;
        let mut changed = false;
        for &(head, left, right) in &binary_productions {
            let product = by_nonterminal[left].mul(&by_nonterminal[right]);
            let target = by_nonterminal.get_mut(head).expect("head interned above");
            if target.or_assign(&product) {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    debug!(iterations, nonterminals = by_nonterminal.len(), "matrix CFPQ converged");

    let mut result = HashSet::new();
    for (nonterminal, matrix) in &by_nonterminal {
        for i in 0..n {
            for j in matrix.row(i).ones() {
                result.insert((i as StateId, nonterminal.clone(), j as StateId));
            }
        }
    }
    result
}
