//! Hellings' worklist CFPQ algorithm (spec §4.6), grounded on
//! `original_source/project/hellings_algorithm.py::get_reachable_pairs_hellings`.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::automaton::fa::StateId;
use crate::cfg::{Symbol, WcnfCfg};
use crate::graph::Graph;
use crate::symbol::SymbolTable;

/// A `(source, nonterminal, target)` triple meaning `nonterminal ⇒* w` for
/// some word `w` labeling a graph path `source -> target`.
pub type Triple = (StateId, String, StateId);

/// Evaluates a weak-CNF grammar against a graph via Hellings' algorithm.
#[must_use]
pub fn evaluate(graph: &Graph, grammar: &WcnfCfg, symbols: &SymbolTable) -> HashSet<Triple> {
    let cfg = grammar.inner();
    let mut result: HashSet<Triple> = HashSet::new();

    for production in &cfg.productions {
        match production.body.as_slice() {
            [] => {
                for v in 0..graph.num_vertices() as StateId {
                    result.insert((v, production.head.clone(), v));
                }
            }
            [Symbol::Terminal(t)] => {
                if let Some(symbol) = symbols.lookup(t) {
                    for &(u, edge_symbol, v) in graph.edges() {
                        if edge_symbol == symbol {
                            result.insert((u, production.head.clone(), v));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let mut worklist: VecDeque<Triple> = result.iter().cloned().collect();
    let mut iterations = 0usize;

    while let Some((v, n_i, u)) = worklist.pop_front() {
        iterations += 1;
        let left_extensions: Vec<(StateId, String)> = result
            .iter()
            .filter(|(_, _, to)| *to == v)
            .map(|(from, nt, _)| (*from, nt.clone()))
            .collect();
        for (v_hat, n_j) in left_extensions {
            for n_k in heads_for_body(cfg, &n_j, &n_i) {
                let candidate = (v_hat, n_k, u);
                if result.insert(candidate.clone()) {
                    worklist.push_back(candidate);
                }
            }
        }

        let right_extensions: Vec<(String, StateId)> = result
            .iter()
            .filter(|(from, _, _)| *from == u)
            .map(|(_, nt, to)| (nt.clone(), *to))
            .collect();
        for (n_j, v_hat) in right_extensions {
            for n_k in heads_for_body(cfg, &n_i, &n_j) {
                let candidate = (v, n_k, v_hat);
                if result.insert(candidate.clone()) {
                    worklist.push_back(candidate);
                }
            }
        }
    }

    debug!(iterations, triples = result.len(), "Hellings CFPQ converged");
    result
}

fn heads_for_body(cfg: &crate::cfg::Cfg, left: &str, right: &str) -> Vec<String> {
    cfg.productions
        .iter()
        .filter(|p| {
            matches!(
                p.body.as_slice(),
                [Symbol::Variable(a), Symbol::Variable(b)] if a == left && b == right
            )
        })
        .map(|p| p.head.clone())
        .collect()
}

/// Restricts Hellings' full triple set to `(src, dst)` pairs reachable
/// under `start_nonterminal`, between the given start and final vertex
/// sets (grounded on `hellings_algorithm.py::cf_query_to_graph`).
#[must_use]
pub fn reachable_pairs(
    triples: &HashSet<Triple>,
    start_nonterminal: &str,
    start_states: &[StateId],
    final_states: &[StateId],
) -> Vec<(StateId, StateId)> {
    let starts: HashSet<StateId> = start_states.iter().copied().collect();
    let finals: HashSet<StateId> = final_states.iter().copied().collect();
    let mut result: Vec<(StateId, StateId)> = triples
        .iter()
        .filter(|(src, sym, dst)| sym == start_nonterminal && starts.contains(src) && finals.contains(dst))
        .map(|(src, _, dst)| (*src, *dst))
        .collect();
    result.sort_unstable();
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::{loader, wcnf};
    use crate::graph::load_dot;

    fn bracket_graph() -> (Graph, SymbolTable) {
        let mut symbols = SymbolTable::new();
        let dot = r#"
            digraph brackets {
                0 -> 1 [label="a"];
                1 -> 2 [label="b"];
            }
        "#;
        let graph = load_dot(dot, &mut symbols).unwrap();
        (graph, symbols)
    }

    #[test]
    fn matches_balanced_bracket_language() {
        let (graph, symbols) = bracket_graph();
        let cfg = loader::load("S -> a S b | $", "S").unwrap();
        let wcnf = wcnf::transform(&cfg);
        let triples = evaluate(&graph, &wcnf, &symbols);
        let pairs = reachable_pairs(&triples, "S", &[0], &[2]);
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn every_vertex_reaches_itself_via_epsilon() {
        let (graph, symbols) = bracket_graph();
        let cfg = loader::load("S -> a S b | $", "S").unwrap();
        let wcnf = wcnf::transform(&cfg);
        let triples = evaluate(&graph, &wcnf, &symbols);
        assert!(triples.contains(&(0, "S".to_string(), 0)));
        assert!(triples.contains(&(1, "S".to_string(), 1)));
        assert!(triples.contains(&(2, "S".to_string(), 2)));
    }

    #[test]
    fn unmatched_single_edge_is_not_in_the_language() {
        let (graph, symbols) = bracket_graph();
        let cfg = loader::load("S -> a S b | $", "S").unwrap();
        let wcnf = wcnf::transform(&cfg);
        let triples = evaluate(&graph, &wcnf, &symbols);
        let pairs = reachable_pairs(&triples, "S", &[0], &[1]);
        assert!(pairs.is_empty());
    }
}
