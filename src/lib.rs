//! Library for minimizing deterministic finite automata (DFA) in Rust.
//!
//! A [`Dfa`] consists of the states `0..n`, of which `0` is initial, an [`alphabet::Alphabet`]
//! of `k` opaque symbols, a set of accepting states and a complete transition table with one
//! row of `k` targets for every state. The table is validated once when the automaton is
//! built (see [`Dfa::from_parts`] and [`Dfa::builder`]), afterwards every operation relies
//! on it being total.
//!
//! Minimization works in two steps, which are bundled in the [`minimization::Minimizer`]:
//! - states that are not reachable from the initial state are removed and the remaining ones
//!   are renumbered, see [`Dfa::prune_unreachable`],
//! - states that no word can distinguish are merged. This is done with Moore's partition
//!   refinement ([`minimization::moore_partition_refinement`]), which starts by separating
//!   accepting from rejecting states and splits classes round by round until the partition
//!   does not change anymore. The result is collapsed with [`Dfa::quotient`].
//!
//! The outcome is the unique (up to renaming of states) minimal automaton for the language.
//! States of the result are ordered by the smallest original state they contain, so the
//! output is reproducible for a fixed input.
//!
//! Besides that, the crate can read and write automata in a simple text format
//! ([`format`]), render them as transition tables or in the DOT format ([`dot`]) and
//! generate random automata ([`random`], behind the `random` feature).
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_minimization::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::DfaBuilder,
        dot::Dottable,
        error::DfaError,
        format::{parse_dfa, read_dfa, write_dfa, LoadError, ParseError},
        math::{self, Bijection, Partition},
        minimization::{moore_partition_refinement, Minimizer, MooreRounds, Refinement},
        reachable::{MinimalRepresentatives, ReachableStates},
        Dfa, StateIndex,
    };
}

/// Type of the indices of states. The states of an automaton with `n` states are always
/// `0..n`.
pub type StateIndex = usize;

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;

/// Errors that can occur when building or minimizing automata.
pub mod error;

/// Defines the [`Dfa`] type, its construction and basic queries.
pub mod automaton;
pub use automaton::Dfa;

/// Breadth-first exploration of the reachable part of an automaton and removal of unreachable states.
pub mod reachable;

/// Contains the partition refinement algorithm and the [`minimization::Minimizer`].
pub mod minimization;

/// Quotient construction, collapsing the classes of a partition.
pub mod quotient;

pub mod format;

/// Export of automata to the DOT format of graphviz.
pub mod dot;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Six states over two symbols, where 1, 2 and 4 are accepting. The states 1, 2 and 4 as
    /// well as 0 and 3 are indistinguishable, so the minimal automaton has three states.
    pub fn textbook_dfa() -> Dfa {
        Dfa::builder()
            .with_accepting([1, 2, 4])
            .with_rows([[3, 1], [2, 5], [2, 5], [0, 4], [2, 5], [5, 5]])
            .build()
            .unwrap()
    }
}
