//! Boolean-matrix evaluation engine for regular and context-free path
//! queries over labeled directed graphs.
//!
//! The pipeline runs bottom-up: a regex compiles to a minimized DFA
//! ([`regex`], [`automaton`]), a DFA decomposes into per-symbol boolean
//! matrices ([`automaton::decomposition`]), and reachability questions
//! reduce to boolean matrix operations — transitive closure for all-pairs
//! queries ([`rpq::all_pairs`]), row-normalized matrix BFS for multi-source
//! queries ([`rpq::multi_source`]), and fixed-point iteration per
//! nonterminal for context-free queries ([`cfg::hellings`],
//! [`cfg::matrix_cfpq`]). [`ecfg`] and [`rsm`] extend the same machinery to
//! grammars given as a regex per variable.

pub mod automaton;
pub mod cfg;
pub mod ecfg;
pub mod errors;
pub mod graph;
pub mod matrix;
pub mod regex;
pub mod rpq;
pub mod rsm;
pub mod symbol;

pub use errors::{Error, Result};
