//! Multi-source matrix-BFS RPQ (spec §4.4), grounded on
//! `original_source/project/rpq/multiple_sources.py`'s
//! `multiple_sources_reachability_with_regular_constraints` and
//! `_transform_rows`.

use std::collections::HashSet;

use tracing::debug;

use crate::automaton::decomposition::decompose;
use crate::automaton::fa::{thompson_from_ast, StateId};
use crate::automaton::{dfa, min};
use crate::errors::Result;
use crate::graph::Graph;
use crate::matrix::{BooleanMatrix, RectMatrix};
use crate::regex::Ast;
use crate::symbol::SymbolTable;

/// Result shape of a multi-source query, mirroring the `for_each_vertex`
/// flag of the original implementation: union mode collapses every source's
/// reachable set into one, per-source mode keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSourceResult {
    Union(Vec<StateId>),
    PerSource(Vec<(StateId, StateId)>),
}

/// Answers "from each vertex in `sources`, which vertices in `final_states`
/// are reachable along a path satisfying `regex`?" in one sweep (spec
/// §4.4).
pub fn eval(
    regex: &str,
    graph: &Graph,
    sources: &[StateId],
    final_states: &[StateId],
    per_source: bool,
    symbols: &mut SymbolTable,
) -> Result<MultiSourceResult> {
    let ast = Ast::build(regex)?;
    let query_nfa = thompson_from_ast(&ast, symbols);
    let query_dfa = min::minimize(&dfa::determinize(&query_nfa));
    let query_fa = query_dfa.to_finite_automaton();
    let graph_fa = graph.to_finite_automaton(None, None);

    let query_decomp = decompose(&query_fa);
    let graph_decomp = decompose(&graph_fa);

    let q = query_decomp.num_states as usize;
    let g = graph_decomp.num_states as usize;
    let k = sources.len();

    let block_diagonals: Vec<BooleanMatrix> = query_decomp
        .symbols()
        .filter_map(|symbol| {
            let qm = query_decomp.matrix(symbol)?;
            let gm = graph_decomp.matrix(symbol)?;
            Some(BooleanMatrix::block_diag(qm, gm))
        })
        .collect();

    if block_diagonals.is_empty() || k == 0 {
        return Ok(empty_result(per_source));
    }

    let width = q + g;
    let rows = if per_source { q * k } else { q };
    let mut frontier = RectMatrix::zero(rows, width);
    seed_frontier(&mut frontier, &query_decomp.start_states, sources, q, per_source);

    let mut iterations = 0usize;
    loop {
        let mut sum = RectMatrix::zero(rows, width);
        for d in &block_diagonals {
            let product = frontier.mul_square(d);
            let normalized = row_normalize(&product, q);
            sum.or_assign(&normalized);
        }
        let changed = frontier.or_assign(&sum);
        iterations += 1;
        if !changed {
            break;
        }
    }
    debug!(iterations, q, g, k, "multi-source matrix BFS converged");

    Ok(harvest(
        &frontier,
        &query_decomp.final_states,
        sources,
        final_states,
        q,
        per_source,
    ))
}

fn empty_result(per_source: bool) -> MultiSourceResult {
    if per_source {
        MultiSourceResult::PerSource(Vec::new())
    } else {
        MultiSourceResult::Union(Vec::new())
    }
}

fn seed_frontier(
    frontier: &mut RectMatrix,
    query_starts: &[StateId],
    sources: &[StateId],
    q: usize,
    per_source: bool,
) {
    if per_source {
        for (j, &source) in sources.iter().enumerate() {
            for i in 0..q {
                frontier.set(j * q + i, i, true);
            }
            for &qs in query_starts {
                frontier.set(j * q + qs as usize, q + source as usize, true);
            }
        }
    } else {
        for i in 0..q {
            frontier.set(i, i, true);
        }
        for &qs in query_starts {
            for &source in sources {
                frontier.set(qs as usize, q + source as usize, true);
            }
        }
    }
}

fn harvest(
    frontier: &RectMatrix,
    query_finals: &[StateId],
    sources: &[StateId],
    final_states: &[StateId],
    q: usize,
    per_source: bool,
) -> MultiSourceResult {
    let source_set: HashSet<usize> = sources.iter().map(|&s| s as usize).collect();
    let final_set: HashSet<usize> = final_states.iter().map(|&s| s as usize).collect();
    let g = frontier.num_cols() - q;

    if per_source {
        let mut result: HashSet<(StateId, StateId)> = HashSet::new();
        for (j, &source) in sources.iter().enumerate() {
            for &qf in query_finals {
                let row = j * q + qf as usize;
                for v in 0..g {
                    if frontier.get(row, q + v) && !source_set.contains(&v) && final_set.contains(&v) {
                        result.insert((source, v as StateId));
                    }
                }
            }
        }
        let mut pairs: Vec<(StateId, StateId)> = result.into_iter().collect();
        pairs.sort_unstable();
        MultiSourceResult::PerSource(pairs)
    } else {
        let mut result: HashSet<StateId> = HashSet::new();
        for &qf in query_finals {
            for v in 0..g {
                if frontier.get(qf as usize, q + v) && !source_set.contains(&v) && final_set.contains(&v) {
                    result.insert(v as StateId);
                }
            }
        }
        let mut vertices: Vec<StateId> = result.into_iter().collect();
        vertices.sort_unstable();
        MultiSourceResult::Union(vertices)
    }
}

/// `RowNormalize` (spec §4.4): within every consecutive block of `q` rows,
/// permutes/merges rows so the leftmost `q x q` sub-block becomes the
/// identity matrix.
fn row_normalize(m: &RectMatrix, q: usize) -> RectMatrix {
    let mut result = m.clone();
    let total_rows = result.num_rows();
    let mut block_start = 0;
    while block_start < total_rows {
        let end_index = block_start + q;
        let mut i = block_start;
        while i < end_index {
            let Some(p) = result.row(i).ones().next() else {
                // row is all zero; nothing to normalize.
                i += 1;
                continue;
            };
            let row_index = block_start + p;
            if row_index >= end_index {
                // first set bit falls outside the left q x q sub-block: spurious.
                result.zero_row(i);
                i += 1;
                continue;
            }
            if p == i - block_start {
                // already at the identity position for this source.
                i += 1;
                continue;
            }
            let target_first = result.row(row_index).ones().next();
            if target_first == Some(p) {
                let snapshot = result.row(i).clone();
                result.row_mut(row_index).union_with(&snapshot);
                result.zero_row(i);
                i += 1;
            } else {
                result.swap_rows(i, row_index);
                // do not advance: the swapped-in row must be re-examined.
            }
        }
        block_start += q;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::load_dot;

    fn two_cycles_graph(symbols: &mut SymbolTable) -> Graph {
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
    fn union_mode_matches_all_pairs_for_a_single_source() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let sources = [0];
        let finals: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();
        let result = eval("a*", &graph, &sources, &finals, false, &mut symbols).unwrap();
        match result {
            MultiSourceResult::Union(mut vertices) => {
                vertices.sort_unstable();
                assert_eq!(vertices, vec![0, 1, 2]);
            }
            _ => panic!("expected union-mode result"),
        }
    }

    #[test]
    fn per_source_mode_separates_sources() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let sources = [1, 3];
        let finals: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();
        let result = eval("a*", &graph, &sources, &finals, true, &mut symbols).unwrap();
        match result {
            MultiSourceResult::PerSource(mut pairs) => {
                pairs.sort_unstable();
                // source 1 walks the a-cycle to 2 and 0 (1 itself is excluded, it's a source);
                // source 3 has no outgoing "a" edges at all.
                assert_eq!(pairs, vec![(1, 0), (1, 2)]);
            }
            _ => panic!("expected per-source result"),
        }
    }

    #[test]
    fn final_filter_excludes_vertices_outside_the_final_set() {
        let mut symbols = SymbolTable::new();
        let graph = two_cycles_graph(&mut symbols);
        let sources = [0];
        let finals = [1]; // restrict to vertex 1 only
        let result = eval("a*", &graph, &sources, &finals, false, &mut symbols).unwrap();
        match result {
            MultiSourceResult::Union(vertices) => assert_eq!(vertices, vec![1]),
            _ => panic!("expected union-mode result"),
        }
    }
}
