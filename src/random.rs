use bit_set::BitSet;
use tracing::debug;

use crate::{alphabet::Alphabet, Dfa};

/// Generate a random complete [`Dfa`] with `size` states over an alphabet of `alphabet_size`
/// symbols by drawing every transition target uniformly at random. Each state is accepting
/// with probability `accepting_probability`.
///
/// The random numbers are taken from `rng`, so seeding it makes the result reproducible.
/// Depending on the drawn transitions, some states may not be reachable from the initial
/// state.
pub fn generate_random_dfa(
    size: usize,
    alphabet_size: usize,
    accepting_probability: f64,
    rng: &mut fastrand::Rng,
) -> Dfa {
    if size == 0 {
        return Dfa::empty(Alphabet::of_size(alphabet_size));
    }

    let table = (0..size * alphabet_size)
        .map(|_| rng.usize(..size))
        .collect();
    let accepting: BitSet = (0..size)
        .filter(|_| rng.f64() < accepting_probability)
        .collect();

    debug!(
        "generated random automaton with {size} states, {} of which are accepting",
        accepting.len()
    );
    Dfa::from_table_unchecked(Alphabet::of_size(alphabet_size), size, accepting, table)
}
