//! All-pairs RPQ evaluation (spec §4.3), grounded on
//! `original_source/project/rpq/all_pairs.py::regular_query_to_graph` and
//! `get_reachable_by_intersection`.

use tracing::debug;

use crate::automaton::fa::StateId;
use crate::automaton::intersect::intersect;
use crate::automaton::{dfa, min};
use crate::errors::Result;
use crate::graph::Graph;
use crate::regex::Ast;
use crate::symbol::SymbolTable;

/// Evaluates `(regex, graph, start_set, final_set)` into every `(u, v)` pair
/// connected by a graph path whose label sequence is a word of the regex's
/// language (spec §4.3's guarantee).
pub fn eval(
    regex: &str,
    graph: &Graph,
    start_states: &[StateId],
    final_states: &[StateId],
    symbols: &mut SymbolTable,
) -> Result<Vec<(StateId, StateId)>> {
    let ast = Ast::build(regex)?;
    let query_nfa = crate::automaton::fa::thompson_from_ast(&ast, symbols);
    let query_dfa = min::minimize(&dfa::determinize(&query_nfa));
    let query_fa = query_dfa.to_finite_automaton();
    let graph_fa = graph.to_finite_automaton(Some(start_states), Some(final_states));

    let intersection = intersect(&query_fa, &graph_fa);
    let closure = intersection.transitive_closure();
    debug!(
        states = intersection.num_states(),
        nnz = closure.nnz(),
        "computed all-pairs RPQ transitive closure"
    );

    let mut result = Vec::new();
    for &start in &intersection.start_states {
        for &end in &intersection.final_states {
            let reachable = start == end || closure.get(start as usize, end as usize);
            if reachable {
                let u = intersection.project_right(start as usize) as StateId;
                let v = intersection.project_right(end as usize) as StateId;
                result.push((u, v));
            }
        }
    }
    result.sort_unstable();
    result.dedup();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_dot;

    fn two_cycles_graph(symbols: &mut SymbolTable) -> Graph {
        // 0 -> 1 -> 2 -> 0 labeled "a"; 0 -> 3 -> 0 labeled "b"
        let dot = r#"
            digraph two_cycles {
                0 -> 1 [label="a"];
                1 -> 2 [label="a"];
                2 -> 0 [label="a"];
                0 -> 3 [label="b"];
                3 -> 0 [label="b"];
            }
        "#;
        load_dot(dot, symbols).unwrap()
    }

    #[test]
    fn a_star_from_zero_reaches_the_whole_a_cycle() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let starts = [0];
        let finals: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();
        let pairs = eval("a*", &graph, &starts, &finals, &mut symbols).unwrap();
        let reached: Vec<StateId> = pairs.iter().map(|&(_, v)| v).collect();
        assert!(reached.contains(&0));
        assert!(reached.contains(&1));
        assert!(reached.contains(&2));
        assert!(!reached.contains(&3));
    }

    #[test]
    fn b_plus_from_zero_reaches_only_vertex_three() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let starts = [0];
        let finals: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();
        let pairs = eval("b+", &graph, &starts, &finals, &mut symbols).unwrap();
        assert_eq!(pairs, vec![(0, 3)]);
    }

    #[test]
    fn disjoint_alphabet_yields_no_pairs() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let starts = [0];
        let finals: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();
        let pairs = eval("c+", &graph, &starts, &finals, &mut symbols).unwrap();
        assert!(pairs.is_empty());
    }
}
