/// Moore's algorithm for computing the coarsest partition of indistinguishable states.
pub mod partition_refinement;

use tracing::debug;

use crate::{error::DfaError, math::Bijection, Dfa, StateIndex};

pub use partition_refinement::{moore_partition_refinement, MooreRounds, Refinement};

/// Owns a [`Dfa`] while it is being minimized. Minimization happens in two steps, first
/// [`Minimizer::prune_unreachable`] removes all states that are not reachable and then
/// [`Minimizer::minimize`] merges states that are indistinguishable. Each step replaces
/// the automaton as a whole.
///
/// # Example
/// ```
/// use dfa_minimization::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_accepting([1, 2])
///     .with_rows([[1, 2], [1, 2], [1, 2], [0, 0]])
///     .build()
///     .unwrap();
///
/// let mut minimizer = Minimizer::new(dfa);
/// minimizer.prune_unreachable();
/// assert_eq!(minimizer.dfa().size(), 3);
/// minimizer.minimize().unwrap();
/// assert_eq!(minimizer.into_dfa().size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Minimizer {
    dfa: Dfa,
    refinement: Option<Refinement>,
}

impl Minimizer {
    /// Takes ownership of `dfa`.
    pub fn new(dfa: Dfa) -> Self {
        Self {
            dfa,
            refinement: None,
        }
    }

    /// The automaton in its current state of processing.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Hands the automaton back.
    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Removes all states that are not reachable from the initial state, see
    /// [`Dfa::prune_unreachable`]. Returns the renumbering of the retained states.
    pub fn prune_unreachable(&mut self) -> Bijection<StateIndex, StateIndex> {
        self.dfa.prune_unreachable()
    }

    /// Computes the coarsest partition of indistinguishable states with
    /// [`moore_partition_refinement`] and replaces the automaton by its quotient. The
    /// returned [`Refinement`] refers to the states before the quotient was taken.
    ///
    /// The automaton should be pruned before, otherwise classes that consist only of
    /// unreachable states survive in the result.
    pub fn minimize(&mut self) -> Result<&Refinement, DfaError> {
        let refinement = moore_partition_refinement(&self.dfa)?;
        let quotient = self.dfa.quotient(refinement.partition());
        debug!(
            "minimization took {} rounds and merged {} states into {}",
            refinement.rounds(),
            self.dfa.size(),
            quotient.size()
        );
        self.dfa = quotient;
        let refinement: &Refinement = self.refinement.insert(refinement);
        Ok(refinement)
    }

    /// The result of the last call to [`Minimizer::minimize`], if any.
    pub fn last_refinement(&self) -> Option<&Refinement> {
        self.refinement.as_ref()
    }
}

impl Dfa {
    /// Returns the unique (up to renaming of states) minimal automaton that accepts the
    /// same language as `self`. Unreachable states are removed first, then
    /// indistinguishable states are merged.
    pub fn minimize(self) -> Result<Dfa, DfaError> {
        let mut minimizer = Minimizer::new(self);
        minimizer.prune_unreachable();
        minimizer.minimize()?;
        Ok(minimizer.into_dfa())
    }

    /// Checks whether `self` is minimal, meaning all states are reachable and no two states
    /// are indistinguishable.
    pub fn is_minimal(&self) -> Result<bool, DfaError> {
        if self.reachable_set().len() != self.size() {
            return Ok(false);
        }
        Ok(moore_partition_refinement(self)?.partition().size() == self.size())
    }
}
