//! Subset construction (component 5 of the system overview), grounded on
//! the teacher's `core::dfa::Determinizer`, generalized from `char` symbols
//! to interned [`SymbolId`]s.

use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexMap;

use crate::automaton::fa::{FiniteAutomaton, StateId};
use crate::symbol::SymbolId;

/// A deterministic finite automaton produced from subset construction.
/// Mirrors the teacher's `Dfa`, plus an explicit `alphabet` field (the
/// `crates/regviz_core` variant of the teacher returns the alphabet
/// alongside the DFA; the `src/core` variant bundles it in. We bundle it,
/// since every downstream consumer — minimization, decomposition — needs
/// it in lockstep with `trans`).
#[derive(Debug, Clone)]
pub struct Dfa {
    pub num_states: u32,
    pub start: StateId,
    pub accepts: Vec<StateId>,
    /// Transition table indexed by state then alphabet-symbol index.
    /// `None` means a transition into an implicit dead state.
    pub trans: Vec<Vec<Option<StateId>>>,
    pub alphabet: Vec<SymbolId>,
}

impl Dfa {
    #[must_use]
    pub fn symbol_index(&self, symbol: SymbolId) -> Option<usize> {
        self.alphabet.iter().position(|&s| s == symbol)
    }

    /// Simulates the DFA over a word, used by tests and by the CLI.
    #[must_use]
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let mut current = self.start;
        for &symbol in word {
            let Some(idx) = self.symbol_index(symbol) else {
                return false;
            };
            match self.trans[current as usize][idx] {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.accepts.contains(&current)
    }

    /// Converts this DFA into a [`FiniteAutomaton`] over the same state
    /// numbering, so it can feed [`crate::automaton::decomposition`] and
    /// [`crate::automaton::intersect`] directly.
    #[must_use]
    pub fn to_finite_automaton(&self) -> FiniteAutomaton {
        let mut transitions = Vec::new();
        for (from, row) in self.trans.iter().enumerate() {
            for (idx, dst) in row.iter().enumerate() {
                if let Some(to) = dst {
                    transitions.push((from as StateId, self.alphabet[idx], *to));
                }
            }
        }
        crate::automaton::fa::from_parts(
            self.num_states,
            vec![self.start],
            self.accepts.clone(),
            &transitions,
        )
    }
}

/// Determinizes an NFA (which may contain epsilon transitions) into a DFA
/// via subset construction.
#[must_use]
pub fn determinize(nfa: &FiniteAutomaton) -> Dfa {
    Determinizer::new(nfa).run()
}

fn set_to_key(set: BTreeSet<StateId>) -> Vec<StateId> {
    set.into_iter().collect()
}

struct Determinizer<'a> {
    nfa: &'a FiniteAutomaton,
    alphabet: Vec<SymbolId>,
    map: IndexMap<Vec<StateId>, StateId>,
    queue: VecDeque<Vec<StateId>>,
    transitions: Vec<Vec<Option<StateId>>>,
}

impl<'a> Determinizer<'a> {
    fn new(nfa: &'a FiniteAutomaton) -> Self {
        let alphabet = nfa.alphabet();
        let mut map = IndexMap::new();
        let mut queue = VecDeque::new();

        let seed: BTreeSet<StateId> = nfa.start_states.iter().copied().collect();
        let closure = nfa.epsilon_closure(&seed);
        let start_key = set_to_key(closure);

        map.insert(start_key.clone(), 0);
        queue.push_back(start_key);

        Self {
            nfa,
            alphabet,
            map,
            queue,
            transitions: Vec::new(),
        }
    }

    fn run(mut self) -> Dfa {
        while let Some(key) = self.queue.pop_front() {
            let state_id = self.map[&key];
            self.ensure_capacity(state_id as usize + 1);
            let subset: BTreeSet<StateId> = key.iter().copied().collect();

            for symbol_idx in 0..self.alphabet.len() {
                let symbol = self.alphabet[symbol_idx];
                let next = self.advance_subset(&subset, symbol);
                self.transitions[state_id as usize][symbol_idx] = next;
            }
        }

        let accepts = self.collect_accepting();
        Dfa {
            num_states: self.map.len() as u32,
            start: 0,
            accepts,
            trans: self.transitions,
            alphabet: self.alphabet,
        }
    }

    fn ensure_capacity(&mut self, len: usize) {
        while self.transitions.len() < len {
            self.transitions.push(vec![None; self.alphabet.len()]);
        }
    }

    fn advance_subset(&mut self, subset: &BTreeSet<StateId>, symbol: SymbolId) -> Option<StateId> {
        let moved = self.nfa.move_on(subset, symbol);
        if moved.is_empty() {
            return None;
        }
        let closure = self.nfa.epsilon_closure(&moved);
        Some(self.lookup_or_insert(closure))
    }

    fn lookup_or_insert(&mut self, subset: BTreeSet<StateId>) -> StateId {
        let key = set_to_key(subset);
        if let Some(id) = self.map.get(&key) {
            *id
        } else {
            let new_id = self.map.len() as StateId;
            self.map.insert(key.clone(), new_id);
            self.queue.push_back(key);
            new_id
        }
    }

    fn collect_accepting(&self) -> Vec<StateId> {
        self.map
            .iter()
            .filter_map(|(subset, id)| {
                let accepting = subset
                    .iter()
                    .any(|state| self.nfa.final_states.contains(state));
                accepting.then_some(*id)
            })
            .collect()
    }
}
