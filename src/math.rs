use std::{collections::BTreeSet, hash::Hash};

use crate::StateIndex;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition of the states `0..n` of an automaton. It is stored as a mapping that
/// sends every state to the representative of its class, where the representative is
/// always the numerically smallest state of the class.
///
/// Two partitions are equal if and only if they group the states in the same way, which
/// is what makes the equality check usable as the termination criterion of partition
/// refinement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition(Vec<StateIndex>);

impl std::ops::Deref for Partition {
    type Target = [StateIndex];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Partition {
    /// Builds a partition from an iterator that yields the classes as iterators over the
    /// states they contain. The classes must be disjoint and cover `0..n` for some `n`.
    ///
    /// # Panics
    /// If some state in `0..n` is not covered by a class.
    pub fn new<X: IntoIterator<Item = StateIndex>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        let classes: Vec<BTreeSet<StateIndex>> = iter
            .into_iter()
            .map(|it| it.into_iter().collect())
            .collect();
        let size = classes.iter().map(|c| c.len()).sum();
        let mut mapping = vec![StateIndex::MAX; size];
        for class in &classes {
            let Some(&representative) = class.first() else {
                continue;
            };
            for &q in class {
                assert!(q < size, "state {q} is out of range for a partition of {size} states");
                mapping[q] = representative;
            }
        }
        assert!(
            mapping.iter().all(|&r| r != StateIndex::MAX),
            "classes must cover all states"
        );
        Self(mapping)
    }

    /// The partition of `0..size` which places every state in its own class.
    pub fn discrete(size: usize) -> Self {
        Self((0..size).collect())
    }

    /// Groups the states `0..size` by the value that `key` assigns to them.
    pub fn by_key<K, F>(size: usize, key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(StateIndex) -> K,
    {
        let mut seen: crate::math::Map<K, StateIndex> = Map::default();
        Self(
            (0..size)
                .map(|q| *seen.entry(key(q)).or_insert(q))
                .collect(),
        )
    }

    /// Creates a partition directly from a state to representative mapping. The caller
    /// guarantees that every representative is the smallest member of its class.
    pub(crate) fn from_representatives(mapping: Vec<StateIndex>) -> Self {
        debug_assert!(mapping.iter().enumerate().all(|(q, &r)| r <= q && mapping[r] == r));
        Self(mapping)
    }

    /// Returns the number of classes.
    pub fn size(&self) -> usize {
        self.representatives().count()
    }

    /// Returns the representative of the class that contains `state`, or `None` if the
    /// state is not covered.
    pub fn representative(&self, state: StateIndex) -> Option<StateIndex> {
        self.0.get(state).copied()
    }

    /// Checks whether `p` and `q` are in the same class.
    pub fn same_class(&self, p: StateIndex, q: StateIndex) -> bool {
        matches!((self.representative(p), self.representative(q)), (Some(l), Some(r)) if l == r)
    }

    /// Iterates over the representatives of all classes in ascending order.
    pub fn representatives(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(q, &r)| (q == r).then_some(q))
    }

    /// Returns the classes, ordered by their representative.
    pub fn classes(&self) -> Vec<BTreeSet<StateIndex>> {
        let index: Map<StateIndex, usize> = self
            .representatives()
            .enumerate()
            .map(|(i, r)| (r, i))
            .collect();
        let mut classes = vec![BTreeSet::new(); index.len()];
        for (q, r) in self.0.iter().enumerate() {
            classes[index[r]].insert(q);
        }
        classes
    }

    /// Returns true if every class of `self` is contained in some class of `coarser`.
    pub fn refines(&self, coarser: &Partition) -> bool {
        self.len() == coarser.len()
            && self
                .0
                .iter()
                .enumerate()
                .all(|(q, &r)| coarser.0[q] == coarser.0[r])
    }
}
