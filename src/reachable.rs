use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{alphabet::Symbol, math::Bijection, Dfa, StateIndex};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Symbol>, StateIndex);

/// Struct that can return the minimal representatives of a [`Dfa`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin. States are produced in breadth-first order.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a Dfa,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

#[allow(missing_docs)]
impl<'a> MinimalRepresentatives<'a> {
    pub fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        let mut queue = VecDeque::new();
        if origin < dfa.size() {
            seen.insert(origin);
            queue.push_back((vec![], origin));
        }
        Self { dfa, seen, queue }
    }
}

impl Iterator for MinimalRepresentatives<'_> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (sym, &p) in self
            .dfa
            .alphabet()
            .universe()
            .zip(self.dfa.row_unchecked(q))
        {
            if self.seen.insert(p) {
                let mut new_access = access.clone();
                new_access.push(sym);
                self.queue.push_back((new_access, p));
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the indices of all reachable states of a [`Dfa`] in breadth-first order.
#[derive(Debug, Clone)]
pub struct ReachableStates<'a>(MinimalRepresentatives<'a>);

#[allow(missing_docs)]
impl<'a> ReachableStates<'a> {
    pub fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        Self(MinimalRepresentatives::new(dfa, origin))
    }
}

impl Iterator for ReachableStates<'_> {
    type Item = StateIndex;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, q)| q)
    }
}

impl Dfa {
    /// Returns an iterator over the minimal representatives of all states that are
    /// reachable from the initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, 0)
    }

    /// Returns an iterator over the minimal representatives of all states that are
    /// reachable from `origin`.
    pub fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Iterates over the states reachable from the initial state in breadth-first order.
    pub fn reachable_state_indices(&self) -> ReachableStates<'_> {
        ReachableStates::new(self, 0)
    }

    /// Iterates over the states reachable from `origin` in breadth-first order.
    pub fn reachable_state_indices_from(&self, origin: StateIndex) -> ReachableStates<'_> {
        ReachableStates::new(self, origin)
    }

    /// Tries to construct a word that is accepted. The returned word is the
    /// length-lexicographically minimal accepted word; if none exists, `None` is returned.
    pub fn give_word(&self) -> Option<Vec<Symbol>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(q).then_some(word))
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Computes the set of states that are reachable from the initial state. This is a
    /// closure computation: starting from the frontier `{0}`, the successors of all frontier
    /// states on all symbols that have not been seen before form the next frontier, until a
    /// frontier turns out empty. States and symbols are visited in ascending order.
    pub fn reachable_set(&self) -> BitSet {
        let mut reachable = BitSet::with_capacity(self.size());
        if self.is_empty() {
            return reachable;
        }
        reachable.insert(0);

        let mut frontier = reachable.clone();
        let mut iteration = 0;
        while !frontier.is_empty() {
            let mut next = BitSet::with_capacity(self.size());
            for q in frontier.iter() {
                for &p in self.row_unchecked(q) {
                    if !reachable.contains(p) {
                        next.insert(p);
                    }
                }
            }
            reachable.union_with(&next);
            iteration += 1;
            trace!(
                "reachability iteration {iteration} discovered {} new states",
                next.len()
            );
            frontier = next;
        }
        reachable
    }

    /// Removes every state that cannot be reached from the initial state. The remaining
    /// states are renumbered contiguously while keeping their relative order, and all
    /// transitions and accepting states are remapped accordingly.
    ///
    /// Returns the renumbering, mapping the old index of every retained state to its new
    /// index. If all states are reachable, this is the identity and the automaton is left
    /// untouched.
    pub fn prune_unreachable(&mut self) -> Bijection<StateIndex, StateIndex> {
        let reachable = self.reachable_set();
        let renumbering: Bijection<StateIndex, StateIndex> = reachable
            .iter()
            .enumerate()
            .map(|(new, old)| (old, new))
            .collect();

        if renumbering.len() == self.size() {
            debug!("all {} states are reachable", self.size());
            return renumbering;
        }

        let mut new_index = vec![StateIndex::MAX; self.size()];
        for (&old, &new) in renumbering.iter() {
            new_index[old] = new;
        }

        let mut table = Vec::with_capacity(renumbering.len() * self.alphabet().size());
        for old in reachable.iter() {
            table.extend(self.row_unchecked(old).iter().map(|&target| new_index[target]));
        }
        let accepting = self
            .accepting_states()
            .filter(|&q| reachable.contains(q))
            .map(|q| new_index[q])
            .collect();

        debug!(
            "pruned {} unreachable states, {} remain",
            self.size() - renumbering.len(),
            renumbering.len()
        );
        *self = Dfa::from_table_unchecked(*self.alphabet(), renumbering.len(), accepting, table);
        renumbering
    }
}
