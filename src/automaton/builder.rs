use crate::{error::DfaError, Dfa, StateIndex};

/// Helper struct for the construction of a [`Dfa`]. It collects the rows of the
/// transition table together with the accepting states and validates everything at once
/// when [`DfaBuilder::build`] is called.
///
/// If not given explicitly, the number of states is the number of rows and the alphabet
/// size is the length of the first row.
///
/// # Example
///
/// We want a DFA over two symbols with states 0 and 1, where state 1 is accepting and
/// symbol `1` toggles between the states.
/// ```
/// use dfa_minimization::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_accepting([1])
///     .with_rows([[0, 1], [1, 0]])
///     .build()
///     .unwrap();
/// assert!(dfa.accepts([1, 0, 0]));
/// assert!(!dfa.accepts([1, 1]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    size: Option<usize>,
    alphabet_size: Option<usize>,
    accepting: Vec<StateIndex>,
    rows: Vec<Vec<StateIndex>>,
}

impl DfaBuilder {
    /// Fixes the number of states. Building fails if the number of rows differs.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Fixes the size of the alphabet. This is necessary for automata without any rows.
    pub fn with_alphabet_size(mut self, alphabet_size: usize) -> Self {
        self.alphabet_size = Some(alphabet_size);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    /// Marks states as accepting based on a sequence of flags, where the `i`-th flag
    /// belongs to state `i`.
    pub fn with_state_colors<I: IntoIterator<Item = bool>>(self, colors: I) -> Self {
        let accepting = colors
            .into_iter()
            .enumerate()
            .filter_map(|(q, accepting)| accepting.then_some(q));
        self.with_accepting(accepting)
    }

    /// Appends a single row to the transition table.
    pub fn with_row<T: IntoIterator<Item = StateIndex>>(mut self, row: T) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }

    /// Appends the given rows to the transition table, in order.
    pub fn with_rows<R, T>(self, rows: R) -> Self
    where
        R: IntoIterator<Item = T>,
        T: IntoIterator<Item = StateIndex>,
    {
        rows.into_iter().fold(self, |acc, row| acc.with_row(row))
    }

    /// Validates the collected data and builds the [`Dfa`].
    pub fn build(self) -> Result<Dfa, DfaError> {
        let size = self.size.unwrap_or(self.rows.len());
        let alphabet_size = self
            .alphabet_size
            .or_else(|| self.rows.first().map(|row| row.len()))
            .unwrap_or(0);
        Dfa::from_parts(size, alphabet_size, self.accepting, self.rows)
    }
}
