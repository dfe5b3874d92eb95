use std::collections::VecDeque;

use crate::{alphabet::Symbol, math::Set, Dfa, StateIndex};

impl Dfa {
    /// Checks whether `self` and `other` accept the same language. This is done through a
    /// breadth-first search over the product of the two automata, which fails as soon as
    /// it reaches a pair of states that disagree on acceptance. Automata over alphabets of
    /// different sizes are never equivalent.
    pub fn equivalent(&self, other: &Dfa) -> bool {
        if self.alphabet() != other.alphabet() {
            return false;
        }
        match (self.initial(), other.initial()) {
            (Some(p), Some(q)) => distinguishing_word(self, p, other, q).is_none(),
            (None, None) => true,
            (None, Some(_)) => other.is_empty_language(),
            (Some(_), None) => self.is_empty_language(),
        }
    }

    /// Attempts to separate the state `left` from the state `right` by finding a word that
    /// leads to an accepting state from one of them and to a rejecting state from the
    /// other. The returned word is length-lexicographically minimal. If the two states are
    /// equivalent (or one of them does not exist), `None` is returned.
    pub fn separate(&self, left: StateIndex, right: StateIndex) -> Option<Vec<Symbol>> {
        if left >= self.size() || right >= self.size() || left == right {
            return None;
        }
        distinguishing_word(self, left, self, right)
    }
}

fn distinguishing_word(
    left: &Dfa,
    p: StateIndex,
    right: &Dfa,
    q: StateIndex,
) -> Option<Vec<Symbol>> {
    let mut seen = Set::from_iter([(p, q)]);
    let mut queue = VecDeque::from([(vec![], p, q)]);

    while let Some((word, p, q)) = queue.pop_front() {
        if left.is_accepting(p) != right.is_accepting(q) {
            return Some(word);
        }
        for (sym, (&l, &r)) in left
            .alphabet()
            .universe()
            .zip(left.row_unchecked(p).iter().zip(right.row_unchecked(q)))
        {
            if seen.insert((l, r)) {
                let mut extended = word.clone();
                extended.push(sym);
                queue.push_back((extended, l, r));
            }
        }
    }
    None
}
