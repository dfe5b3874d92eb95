use std::fmt::Display;

/// A symbol of an [`Alphabet`]. Symbols are opaque, they are identified by the column
/// they occupy in the transition table of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Symbol(pub usize);

impl Symbol {
    /// Returns the column of the transition table that belongs to this symbol.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Symbol {
    fn from(value: usize) -> Self {
        Symbol(value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite, totally ordered alphabet whose symbols are `Symbol(0)` up to
/// `Symbol(size - 1)`. Any mapping between human readable letters and symbols
/// happens outside of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alphabet {
    size: usize,
}

impl Alphabet {
    /// Creates an alphabet with `size` symbols.
    pub fn of_size(size: usize) -> Self {
        Self { size }
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the alphabet has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checks whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.0 < self.size
    }

    /// Iterates over all symbols in ascending order.
    pub fn universe(&self) -> impl DoubleEndedIterator<Item = Symbol> + ExactSizeIterator {
        (0..self.size).map(Symbol)
    }
}
