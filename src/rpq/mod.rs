//! Regular path query evaluation: all-pairs (spec §4.3) and multi-source
//! matrix-BFS (spec §4.4) evaluators.

pub mod all_pairs;
pub mod multi_source;
