use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::DfaError,
    StateIndex,
};

mod builder;
pub use builder::DfaBuilder;

mod equivalence;

/// A complete deterministic finite automaton over an [`Alphabet`] of opaque symbols.
///
/// The states are always `0..size`, where state `0` is the initial state. Transitions are
/// stored in a dense table with one row of `alphabet.size()` targets per state, so
/// looking up a successor is a single index operation. Every target is guaranteed to be
/// a valid state, this is checked once when the automaton is built (see
/// [`Dfa::from_parts`] and [`Dfa::builder`]) and preserved by all operations that
/// restructure the automaton.
///
/// # Example
/// ```
/// use dfa_minimization::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_state_colors([false, true])
///     .with_rows([[1, 0], [1, 0]])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts([0]));
/// assert!(!dfa.accepts([0, 1]));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Dfa {
    alphabet: Alphabet,
    size: usize,
    accepting: BitSet,
    table: Vec<StateIndex>,
}

impl Dfa {
    /// Returns a [`DfaBuilder`] for assembling an automaton row by row.
    pub fn builder() -> DfaBuilder {
        DfaBuilder::default()
    }

    /// Builds an automaton with `size` states over an alphabet of `alphabet_size` symbols.
    /// The `i`-th element of `rows` lists the targets of state `i`, ordered by symbol.
    ///
    /// Fails if the table is not total (wrong number of rows, rows of the wrong length),
    /// if a target does not exist or if an accepting state does not exist. No automaton
    /// is returned in that case.
    pub fn from_parts<I, R, T>(
        size: usize,
        alphabet_size: usize,
        accepting: I,
        rows: R,
    ) -> Result<Self, DfaError>
    where
        I: IntoIterator<Item = StateIndex>,
        R: IntoIterator<Item = T>,
        T: IntoIterator<Item = StateIndex>,
    {
        let mut table = vec![];
        let mut found = 0;
        for (state, row) in rows.into_iter().enumerate() {
            found += 1;
            if state >= size {
                continue;
            }
            let start = table.len();
            table.extend(row);
            let length = table.len() - start;
            if length != alphabet_size {
                return Err(DfaError::RowLength {
                    state,
                    expected: alphabet_size,
                    found: length,
                });
            }
            if let Some((symbol, &target)) =
                table[start..].iter().find_position(|&&target| target >= size)
            {
                return Err(DfaError::TargetOutOfRange {
                    state,
                    symbol,
                    target,
                    size,
                });
            }
        }
        if found != size {
            return Err(DfaError::RowCount {
                expected: size,
                found,
            });
        }

        let mut accepting_states = BitSet::with_capacity(size);
        for state in accepting {
            if state >= size {
                return Err(DfaError::AcceptingOutOfRange { state, size });
            }
            accepting_states.insert(state);
        }

        Ok(Self::from_table_unchecked(
            Alphabet::of_size(alphabet_size),
            size,
            accepting_states,
            table,
        ))
    }

    /// Assembles an automaton from parts that are already known to be consistent.
    pub(crate) fn from_table_unchecked(
        alphabet: Alphabet,
        size: usize,
        accepting: BitSet,
        table: Vec<StateIndex>,
    ) -> Self {
        debug_assert_eq!(table.len(), size * alphabet.size());
        debug_assert!(table.iter().all(|&target| target < size));
        debug_assert!(accepting.iter().all(|state| state < size));
        Self {
            alphabet,
            size,
            accepting,
            table,
        }
    }

    /// The empty automaton without any states over the given alphabet. It accepts no word.
    pub fn empty(alphabet: Alphabet) -> Self {
        Self::from_table_unchecked(alphabet, 0, BitSet::new(), vec![])
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the automaton has no states at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The alphabet of the automaton.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The initial state, which is always `0`. Returns `None` for the empty automaton.
    pub fn initial(&self) -> Option<StateIndex> {
        (!self.is_empty()).then_some(0)
    }

    /// Iterates over all states in ascending order.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.size
    }

    /// Checks whether `state` is accepting. Returns false for states that do not exist.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting.contains(state)
    }

    /// Iterates over the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.accepting.iter()
    }

    /// Iterates over the rejecting states in ascending order.
    pub fn rejecting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|&q| !self.is_accepting(q))
    }

    /// Returns the row of the transition table belonging to `state`, or `None` if
    /// there is no such state.
    pub fn row(&self, state: StateIndex) -> Option<&[StateIndex]> {
        (state < self.size).then(|| self.row_unchecked(state))
    }

    /// Iterates over the rows of the transition table, ordered by state.
    pub fn rows(&self) -> impl Iterator<Item = &[StateIndex]> + '_ {
        self.state_indices().map(|q| self.row_unchecked(q))
    }

    pub(crate) fn row_unchecked(&self, state: StateIndex) -> &[StateIndex] {
        let stride = self.alphabet.size();
        &self.table[state * stride..(state + 1) * stride]
    }

    /// Returns the target of the transition from `state` on `symbol`, or `None` if either
    /// of them does not exist.
    pub fn successor<S: Into<Symbol>>(&self, state: StateIndex, symbol: S) -> Option<StateIndex> {
        let symbol = symbol.into();
        if !self.alphabet.contains(symbol) {
            return None;
        }
        self.row(state).map(|row| row[symbol.index()])
    }

    /// Runs `word` starting in `origin` and returns the state that is reached. If the
    /// origin does not exist or the word contains a symbol outside of the alphabet,
    /// `None` is returned.
    pub fn reached_state_from<W, S>(&self, origin: StateIndex, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        if origin >= self.size {
            return None;
        }
        word.into_iter()
            .try_fold(origin, |state, symbol| self.successor(state, symbol))
    }

    /// Runs `word` from the initial state and returns the reached state.
    pub fn reached_state<W, S>(&self, word: W) -> Option<StateIndex>
    where
        W: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.reached_state_from(self.initial()?, word)
    }

    /// Returns true if running `word` from the initial state ends in an accepting state.
    pub fn accepts<W, S>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.reached_state(word)
            .is_some_and(|state| self.is_accepting(state))
    }

    /// Returns a string representation of the transition table. Accepting states are
    /// marked with a `*` and highlighted.
    pub fn build_transition_table(&self) -> String {
        use owo_colors::OwoColorize;

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(|sym| sym.to_string())),
        );
        for q in self.state_indices() {
            let label = if self.is_accepting(q) {
                format!("*{q}").green().bold().to_string()
            } else {
                q.to_string()
            };
            builder.push_record(
                std::iter::once(label).chain(self.row_unchecked(q).iter().map(|p| p.to_string())),
            );
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Debug for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA with {} states over {} symbols, accepting {{{}}}",
            self.size,
            self.alphabet.size(),
            self.accepting.iter().join(", ")
        )?;
        write!(f, "{}", self.build_transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::textbook_dfa};

    #[test]
    fn construction_and_queries() {
        let dfa = textbook_dfa();
        assert_eq!(dfa.size(), 6);
        assert_eq!(dfa.alphabet().size(), 2);
        assert_eq!(dfa.initial(), Some(0));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(dfa.rejecting_states().collect::<Vec<_>>(), vec![0, 3, 5]);
        assert_eq!(dfa.row(3), Some(&[0, 4][..]));
        assert_eq!(dfa.row(6), None);
        assert_eq!(dfa.successor(0, 1), Some(1));
        assert_eq!(dfa.successor(0, 2), None);
        assert_eq!(dfa.rows().count(), 6);

        assert_eq!(dfa.reached_state([0, 1]), Some(4));
        assert_eq!(dfa.reached_state([0, 0, 1]), Some(1));
        assert!(dfa.accepts([0, 0, 1]));
        assert!(!dfa.accepts([0]));
        assert!(!dfa.accepts(std::iter::empty::<usize>()));
        assert!(!dfa.accepts([7]));
    }

    #[test]
    fn malformed_tables_are_rejected() {
        assert_eq!(
            Dfa::from_parts(2, 2, [], [vec![0, 1]]),
            Err(DfaError::RowCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Dfa::from_parts(2, 2, [], [vec![0, 1], vec![0, 1], vec![0, 0]]),
            Err(DfaError::RowCount {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            Dfa::from_parts(2, 2, [], [vec![0, 1], vec![0]]),
            Err(DfaError::RowLength {
                state: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Dfa::from_parts(2, 2, [], [vec![0, 1], vec![2, 0]]),
            Err(DfaError::TargetOutOfRange {
                state: 1,
                symbol: 0,
                target: 2,
                size: 2
            })
        );
        assert_eq!(
            Dfa::from_parts(1 << 60, 2, [], [vec![0, 0]]),
            Err(DfaError::RowCount {
                expected: 1 << 60,
                found: 1
            })
        );
        assert_eq!(
            Dfa::from_parts(2, 1, [0, 2], [[0], [1]]),
            Err(DfaError::AcceptingOutOfRange { state: 2, size: 2 })
        );
    }

    #[test]
    fn empty_automaton() {
        let dfa = Dfa::from_parts(0, 3, [], Vec::<Vec<usize>>::new()).unwrap();
        assert!(dfa.is_empty());
        assert_eq!(dfa.initial(), None);
        assert_eq!(dfa.rows().count(), 0);
        assert!(!dfa.accepts(std::iter::empty::<usize>()));
        assert_eq!(dfa, Dfa::empty(Alphabet::of_size(3)));
    }

    #[test]
    fn empty_alphabet() {
        let dfa = Dfa::from_parts(2, 0, [0], [vec![], vec![]]).unwrap();
        assert!(dfa.accepts(std::iter::empty::<usize>()));
        assert_eq!(dfa.row(1), Some(&[][..]));
    }

    #[test]
    fn transition_table_lists_every_state() {
        let table = textbook_dfa().build_transition_table();
        assert!(table.contains("State"));
        assert_eq!(table.lines().count(), 6 + 1 + 3);
    }
}
