use bit_set::BitSet;
use tracing::debug;

use crate::{math::Partition, Dfa, StateIndex};

impl Dfa {
    /// Builds the quotient of `self` with respect to `partition`, in which every class of the
    /// partition is collapsed into a single state. The classes are numbered in ascending
    /// order of their representatives, so the class of the initial state `0` is again `0`.
    ///
    /// The transitions of a class are taken from its representative and redirected to the
    /// classes of the targets, a class is accepting if it contains an accepting state. This
    /// only yields an automaton with the same language if `partition` is a congruence that
    /// respects acceptance, as is the case for the fixed point computed by
    /// [`crate::minimization::moore_partition_refinement`].
    ///
    /// # Panics
    /// If `partition` does not cover exactly the states of `self`.
    pub fn quotient(&self, partition: &Partition) -> Dfa {
        assert_eq!(
            partition.len(),
            self.size(),
            "partition must cover all states of the automaton"
        );

        let representatives: Vec<StateIndex> = partition.representatives().collect();
        let mut class_index = vec![StateIndex::MAX; self.size()];
        for (class, &representative) in representatives.iter().enumerate() {
            class_index[representative] = class;
        }
        let class_of = |q: StateIndex| class_index[partition[q]];

        let mut table = Vec::with_capacity(representatives.len() * self.alphabet().size());
        for &representative in &representatives {
            table.extend(self.row_unchecked(representative).iter().map(|&p| class_of(p)));
        }
        let accepting: BitSet = self.accepting_states().map(class_of).collect();

        debug!(
            "built quotient with {} classes from {} states",
            representatives.len(),
            self.size()
        );
        Dfa::from_table_unchecked(*self.alphabet(), representatives.len(), accepting, table)
    }
}
