//! Automaton construction and analysis: Thompson NFAs, subset-construction
//! DFAs, Hopcroft minimization, boolean decomposition, and tensor-product
//! intersection.

pub mod decomposition;
pub mod dfa;
pub mod fa;
pub mod intersect;
pub mod min;

pub use dfa::Dfa;
pub use fa::{FiniteAutomaton, StateId};
