//! Seeded end-to-end RPQ scenarios over the two-cycles fixture (spec.md §8,
//! scenarios 1-4), grounded on
//! `original_source/project/grapth_utils.py::create_two_cycles_graph`: a
//! cycle of `n+1` vertices `{0..=n}` labeled `a`, sharing vertex `0` with a
//! second cycle of `m` extra vertices `{n+1..=n+m}` labeled `b`.

use pathquery_core::automaton::fa::StateId;
use pathquery_core::graph::load_dot;
use pathquery_core::rpq::multi_source::{self, MultiSourceResult};
use pathquery_core::rpq::all_pairs;
use pathquery_core::symbol::SymbolTable;

/// `create_two_cycles_graph(3, 3, ("a", "b"))`: cycle `0-1-2-3-0` labeled
/// `a`, cycle `0-4-5-6-0` labeled `b`.
fn two_cycles_3_3(symbols: &mut SymbolTable) -> pathquery_core::graph::Graph {
    let dot = r#"
        digraph two_cycles {
            0 -> 1 [label="a"];
            1 -> 2 [label="a"];
            2 -> 3 [label="a"];
            3 -> 0 [label="a"];
            0 -> 4 [label="b"];
            4 -> 5 [label="b"];
            5 -> 6 [label="b"];
            6 -> 0 [label="b"];
        }
    "#;
    load_dot(dot, symbols).unwrap()
}

#[test]
fn scenario_1_a_star_b_star_reaches_every_pair_in_u_cross_v() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let u: [StateId; 3] = [0, 1, 2];
    let v: [StateId; 3] = [4, 5, 6];

    let pairs = all_pairs::eval("a* b*", &graph, &u, &v, &mut symbols).unwrap();
    let mut pairs = pairs;
    pairs.sort_unstable();

    let mut expected: Vec<(StateId, StateId)> = u.iter().flat_map(|&s| v.iter().map(move |&t| (s, t))).collect();
    expected.sort_unstable();
    assert_eq!(pairs, expected);
}

#[test]
fn scenario_2_a_a_b_reaches_only_two_to_four() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let u: [StateId; 3] = [0, 1, 2];
    let v: [StateId; 3] = [4, 5, 6];

    let pairs = all_pairs::eval("a a b", &graph, &u, &v, &mut symbols).unwrap();
    assert_eq!(pairs, vec![(2, 4)]);
}

#[test]
fn scenario_3_b_star_reaches_the_b_cycle_only_from_the_shared_vertex() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let u: [StateId; 3] = [0, 1, 2];
    let v: [StateId; 3] = [4, 5, 6];

    let mut pairs = all_pairs::eval("b*", &graph, &u, &v, &mut symbols).unwrap();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 4), (0, 5), (0, 6)]);
}

#[test]
fn scenario_4_multi_source_per_source_a_b_b_reaches_three_to_five_only() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let sources: [StateId; 3] = [1, 2, 3];
    let finals: [StateId; 3] = [4, 5, 6];

    let result = multi_source::eval("a b b", &graph, &sources, &finals, true, &mut symbols).unwrap();
    let MultiSourceResult::PerSource(pairs) = result else {
        panic!("expected per-source result");
    };
    assert_eq!(pairs, vec![(3, 5)]);
}

#[test]
fn projection_keeps_pairs_inside_u_cross_v() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let u: [StateId; 2] = [0, 3];
    let v: [StateId; 2] = [4, 6];

    let pairs = all_pairs::eval("a* b*", &graph, &u, &v, &mut symbols).unwrap();
    for &(s, t) in &pairs {
        assert!(u.contains(&s), "{s} not in U");
        assert!(v.contains(&t), "{t} not in V");
    }
}

#[test]
fn all_pairs_rpq_is_a_pure_function() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let u: [StateId; 3] = [0, 1, 2];
    let v: [StateId; 3] = [4, 5, 6];

    let first = all_pairs::eval("a* b*", &graph, &u, &v, &mut symbols).unwrap();
    let second = all_pairs::eval("a* b*", &graph, &u, &v, &mut symbols).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rpq_equivalence_all_pairs_matches_multi_source_union_over_all_vertices() {
    let mut symbols = SymbolTable::new();
    let graph = two_cycles_3_3(&mut symbols);
    let all: Vec<StateId> = (0..graph.num_vertices() as StateId).collect();

    let mut all_pairs_result = all_pairs::eval("a* b*", &graph, &all, &all, &mut symbols).unwrap();
    all_pairs_result.sort_unstable();

    let result = multi_source::eval("a* b*", &graph, &all, &all, false, &mut symbols).unwrap();
    let MultiSourceResult::Union(reached) = result else {
        panic!("expected union-mode result");
    };

    // Union mode reports reachable *targets* collapsed across every source;
    // the all-pairs pair set, projected onto its second component, must
    // produce the same vertex set.
    let mut all_pairs_targets: Vec<StateId> = all_pairs_result.iter().map(|&(_, t)| t).collect();
    all_pairs_targets.sort_unstable();
    all_pairs_targets.dedup();
    assert_eq!(reached, all_pairs_targets);
}
