use tracing::{error, trace};

use crate::{error::DfaError, math::Partition, Dfa, StateIndex};

const UNASSIGNED: StateIndex = StateIndex::MAX;

/// The outcome of running partition refinement to its fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    partition: Partition,
    rounds: usize,
}

impl Refinement {
    /// The coarsest partition that groups exactly the states which are indistinguishable.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Number of refinement rounds that were computed, including the last round which
    /// confirmed that the partition is stable.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Consumes `self` and returns the partition.
    pub fn into_partition(self) -> Partition {
        self.partition
    }
}

/// Computes the partition that separates accepting from rejecting states and nothing else.
/// Each of the two classes is represented by its smallest state.
pub fn initial_partition(dfa: &Dfa) -> Partition {
    Partition::by_key(dfa.size(), |q| dfa.is_accepting(q))
}

/// Checks whether `p` and `q` stay in the same class when going from `previous` to the
/// next round: they have to share a class in `previous` and every symbol has to lead them
/// into the same class of `previous`.
fn stays_together(dfa: &Dfa, previous: &Partition, p: StateIndex, q: StateIndex) -> bool {
    previous[p] == previous[q]
        && dfa
            .row_unchecked(p)
            .iter()
            .zip(dfa.row_unchecked(q))
            .all(|(&l, &r)| previous[l] == previous[r])
}

/// Performs one round of Moore's refinement. States are scanned in ascending order, the
/// first state that is not yet assigned opens a new class and collects every later
/// unassigned state that [`stays_together`] with it. All lookups go to `previous`, which
/// is never modified, so the new partition only depends on the previous round.
pub fn refine(dfa: &Dfa, previous: &Partition) -> Partition {
    let size = dfa.size();
    let mut next = vec![UNASSIGNED; size];
    for p in 0..size {
        if next[p] != UNASSIGNED {
            continue;
        }
        next[p] = p;
        for q in (p + 1)..size {
            if next[q] == UNASSIGNED && stays_together(dfa, previous, p, q) {
                next[q] = p;
            }
        }
    }
    Partition::from_representatives(next)
}

/// Iterator over the rounds of Moore's partition refinement. Starting from some partition
/// (by default the [`initial_partition`]), every call to `next` computes one round with
/// [`refine`] and yields the resulting partition. The last partition that is yielded is
/// identical to its predecessor, after that the iterator is exhausted.
///
/// Every yielded partition refines the one before, the number of classes therefore grows
/// strictly until the fixed point is reached.
#[derive(Debug, Clone)]
pub struct MooreRounds<'a> {
    dfa: &'a Dfa,
    current: Partition,
    stable: bool,
}

impl<'a> MooreRounds<'a> {
    /// Starts refinement from the [`initial_partition`] of `dfa`.
    pub fn new(dfa: &'a Dfa) -> Self {
        Self::from_partition(dfa, initial_partition(dfa))
    }

    /// Starts refinement from an arbitrary partition of the states of `dfa`.
    ///
    /// # Panics
    /// If `partition` does not cover exactly the states of `dfa`.
    pub fn from_partition(dfa: &'a Dfa, partition: Partition) -> Self {
        assert_eq!(
            partition.len(),
            dfa.size(),
            "partition must cover all states of the automaton"
        );
        Self {
            dfa,
            current: partition,
            stable: false,
        }
    }

    /// The most recently computed partition.
    pub fn current(&self) -> &Partition {
        &self.current
    }

    /// Returns true once a round has reproduced its input.
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Consumes the iterator and returns the most recently computed partition.
    pub fn into_partition(self) -> Partition {
        self.current
    }
}

impl Iterator for MooreRounds<'_> {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stable {
            return None;
        }
        let next = refine(self.dfa, &self.current);
        self.stable = next == self.current;
        self.current = next.clone();
        Some(next)
    }
}

/// Computes the coarsest partition of the states of `dfa` in which two states share a class
/// if and only if no word distinguishes them, using Moore's algorithm. Rounds are repeated
/// until one of them does not change the partition anymore.
///
/// For a valid automaton with `n` states this happens after at most `n` rounds. Exceeding
/// that bound means the refinement is broken, which is reported as
/// [`DfaError::NoConvergence`] instead of looping on.
pub fn moore_partition_refinement(dfa: &Dfa) -> Result<Refinement, DfaError> {
    if dfa.is_empty() {
        return Ok(Refinement {
            partition: Partition::discrete(0),
            rounds: 0,
        });
    }

    run_to_fixed_point(MooreRounds::new(dfa), dfa.size())
}

/// Drives `rounds` until the partition is stable, performing at most `bound` rounds.
fn run_to_fixed_point(mut rounds: MooreRounds<'_>, bound: usize) -> Result<Refinement, DfaError> {
    let mut performed = 0;
    for partition in rounds.by_ref() {
        performed += 1;
        trace!("round {performed} yields {} classes", partition.size());
        if performed > bound {
            error!("partition refinement exceeded {bound} rounds without reaching a fixed point");
            return Err(DfaError::NoConvergence {
                rounds: performed,
                bound,
            });
        }
    }

    Ok(Refinement {
        partition: rounds.into_partition(),
        rounds: performed,
    })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{prelude::*, tests::textbook_dfa};

    #[test]
    fn initial_partition_splits_by_acceptance() {
        let dfa = textbook_dfa();
        assert_eq!(&*initial_partition(&dfa), &[0, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn single_round() {
        let dfa = textbook_dfa();
        let first = refine(&dfa, &initial_partition(&dfa));
        assert_eq!(
            first,
            Partition::new([vec![0, 3], vec![1, 2, 4], vec![5]])
        );
        assert_eq!(refine(&dfa, &first), first);
    }

    #[test_log::test]
    fn textbook_refinement() {
        let dfa = textbook_dfa();
        let refinement = moore_partition_refinement(&dfa).unwrap();
        assert_eq!(refinement.rounds(), 2);
        assert_eq!(
            refinement.partition().classes(),
            Partition::new([vec![0, 3], vec![1, 2, 4], vec![5]]).classes()
        );
    }

    #[test]
    fn rounds_refine_monotonically() {
        // a chain 0 -> 1 -> 2 -> 3 -> 4 -> 4 where only 4 accepts, every round splits off one state
        let dfa = Dfa::builder()
            .with_accepting([4])
            .with_rows([[1], [2], [3], [4], [4]])
            .build()
            .unwrap();
        let mut rounds = MooreRounds::new(&dfa);
        let partitions = rounds.by_ref().collect_vec();
        assert!(rounds.is_stable());
        assert_eq!(partitions.len(), 4);
        assert_eq!(
            partitions.iter().map(|p| p.size()).collect_vec(),
            vec![3, 4, 5, 5]
        );

        let mut previous = initial_partition(&dfa);
        for partition in partitions {
            assert!(partition.refines(&previous));
            previous = partition;
        }
        assert_eq!(rounds.into_partition(), Partition::discrete(5));
    }

    #[test]
    fn uniform_acceptance_collapses() {
        for accepting in [vec![], vec![0, 1, 2]] {
            let dfa = Dfa::builder()
                .with_accepting(accepting)
                .with_rows([[1, 2], [2, 0], [0, 0]])
                .build()
                .unwrap();
            let refinement = moore_partition_refinement(&dfa).unwrap();
            assert_eq!(refinement.partition().size(), 1);
            assert_eq!(refinement.rounds(), 1);
        }
    }

    #[test]
    fn refinement_from_custom_partition() {
        let dfa = textbook_dfa();
        let rounds = MooreRounds::from_partition(&dfa, Partition::discrete(6));
        assert_eq!(rounds.last(), Some(Partition::discrete(6)));
    }

    #[test_log::test]
    fn exceeding_the_round_bound_fails() {
        // the chain needs four rounds to become stable
        let dfa = Dfa::builder()
            .with_accepting([4])
            .with_rows([[1], [2], [3], [4], [4]])
            .build()
            .unwrap();
        assert_eq!(
            run_to_fixed_point(MooreRounds::new(&dfa), 2),
            Err(DfaError::NoConvergence {
                rounds: 3,
                bound: 2
            })
        );
        assert_eq!(
            run_to_fixed_point(MooreRounds::new(&dfa), 4).map(|r| r.rounds()),
            Ok(4)
        );
    }

    #[test]
    fn empty_automaton_needs_no_rounds() {
        let refinement = moore_partition_refinement(&Dfa::empty(Alphabet::of_size(2))).unwrap();
        assert_eq!(refinement.rounds(), 0);
        assert!(refinement.partition().is_empty());
    }
}
