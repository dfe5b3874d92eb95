use thiserror::Error;

use crate::StateIndex;

/// Abstracts the errors that can occur when building or minimizing a [`crate::Dfa`].
///
/// All variants except [`DfaError::NoConvergence`] describe malformed input and are
/// raised while the automaton is constructed, before any algorithm touches it.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DfaError {
    /// The transition table does not have one row per state.
    #[error("transition table has {found} rows but the automaton has {expected} states")]
    RowCount {
        /// Number of states the automaton was declared with.
        expected: usize,
        /// Number of rows that were supplied.
        found: usize,
    },
    /// A row of the transition table does not have one entry per alphabet symbol.
    #[error("row of state {state} has {found} entries, expected one for each of the {expected} symbols")]
    RowLength {
        /// The state whose row is malformed.
        state: StateIndex,
        /// Size of the alphabet.
        expected: usize,
        /// Length of the supplied row.
        found: usize,
    },
    /// A transition points to a state that does not exist.
    #[error("transition from state {state} on symbol {symbol} leads to {target}, but there are only {size} states")]
    TargetOutOfRange {
        /// Origin of the transition.
        state: StateIndex,
        /// Column of the symbol.
        symbol: usize,
        /// The offending target.
        target: StateIndex,
        /// Number of states.
        size: usize,
    },
    /// An accepting state that does not exist.
    #[error("accepting state {state} does not exist, there are only {size} states")]
    AcceptingOutOfRange {
        /// The offending accepting state.
        state: StateIndex,
        /// Number of states.
        size: usize,
    },
    /// Partition refinement did not reach a fixed point within the guaranteed number of
    /// rounds. This can only be caused by a defect in the refinement itself.
    #[error("partition refinement did not converge after {rounds} rounds (bound is {bound})")]
    NoConvergence {
        /// Number of rounds that were performed.
        rounds: usize,
        /// Maximal number of rounds a valid automaton can need.
        bound: usize,
    },
}

impl DfaError {
    /// Returns true if the error is caused by malformed input rather than by an
    /// internal invariant violation.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, DfaError::NoConvergence { .. })
    }
}
