//! Reading and writing automata in a simple line based text format:
//!
//! ```text
//! 6          number of states
//! 2          size of the alphabet
//! 1 2 4      accepting states, this line may be empty
//! 3 1        targets of state 0, one for each symbol
//! 2 5        targets of state 1
//! 2 5        ...
//! 0 4
//! 2 5
//! 5 5
//! ```
/// Parsing automata from text.
pub mod input;
/// Writing automata as text.
pub mod output;

pub use input::{parse_dfa, read_dfa, LoadError, ParseError, MAX_STATES_WITHOUT_SYMBOLS};
pub use output::{minimized_file_name, write_dfa};

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::{prelude::*, tests::textbook_dfa};

    use super::*;

    const TEXTBOOK: &str = "6\n2\n1 2 4\n3 1\n2 5\n2 5\n0 4\n2 5\n5 5\n";

    #[test]
    fn parse_textbook_dfa() {
        assert_eq!(parse_dfa(TEXTBOOK), Ok(textbook_dfa()));
        assert_eq!(TEXTBOOK.parse::<Dfa>(), Ok(textbook_dfa()));
    }

    #[test]
    fn write_textbook_dfa() {
        assert_eq!(textbook_dfa().to_string(), TEXTBOOK);

        let minimized = textbook_dfa().minimize().unwrap();
        assert_eq!(minimized.to_string(), "3\n2\n1\n0 1\n1 2\n2 2\n");
    }

    #[test]
    fn written_automata_are_read_back() {
        for dfa in [
            textbook_dfa(),
            Dfa::empty(Alphabet::of_size(2)),
            Dfa::builder().with_rows([[0, 0]]).build().unwrap(),
            Dfa::from_parts(2, 0, [1], [vec![], vec![]]).unwrap(),
        ] {
            assert_eq!(dfa.to_string().parse::<Dfa>(), Ok(dfa));
        }
    }

    #[test]
    fn lenient_whitespace() {
        let input = "\n  6\n2\n 1   2 4 \n3 1 2 5\n\n2 5 0 4\n2 5\n5\n5";
        assert_eq!(parse_dfa(input), Ok(textbook_dfa()));
        // the accepting line can be missing entirely if there are no targets
        assert_eq!(
            parse_dfa("0\n3"),
            Ok(Dfa::empty(Alphabet::of_size(3)))
        );
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse_dfa(""), Err(ParseError::MissingStateCount));
        assert_eq!(parse_dfa("2\n"), Err(ParseError::MissingAlphabetSize));
        assert_eq!(
            parse_dfa("2 1\n"),
            Err(ParseError::ExpectedSingleNumber { line: 1 })
        );
        assert_eq!(
            parse_dfa("-2\n1\n\n0\n0\n"),
            Err(ParseError::MalformedNumber {
                line: 1,
                token: "-2".into()
            })
        );
        assert_eq!(
            parse_dfa("2\n1\n0 x\n0\n0\n"),
            Err(ParseError::MalformedNumber {
                line: 3,
                token: "x".into()
            })
        );
        assert_eq!(
            parse_dfa("2\n2\n\n0 1\n1\n"),
            Err(ParseError::MissingTargets {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            parse_dfa("1\n1\n\n0\n0\n"),
            Err(ParseError::TrailingInput { line: 5 })
        );
        assert_eq!(
            parse_dfa("2\n1\n\n0\n2\n"),
            Err(ParseError::Invalid(DfaError::TargetOutOfRange {
                state: 1,
                symbol: 0,
                target: 2,
                size: 2
            }))
        );
        assert_eq!(
            parse_dfa("1\n1\n3\n0\n"),
            Err(ParseError::Invalid(DfaError::AcceptingOutOfRange {
                state: 3,
                size: 1
            }))
        );
    }

    #[test]
    fn oversized_automata_are_rejected() {
        assert_eq!(
            parse_dfa("100000000000000\n0\n\n"),
            Err(ParseError::TooLarge {
                states: 100_000_000_000_000,
                symbols: 0
            })
        );
        assert_eq!(
            parse_dfa(&format!("{}\n2\n", usize::MAX)),
            Err(ParseError::TooLarge {
                states: usize::MAX,
                symbols: 2
            })
        );

        let largest = parse_dfa(&format!("{MAX_STATES_WITHOUT_SYMBOLS}\n0\n0\n")).unwrap();
        assert_eq!(largest.size(), MAX_STATES_WITHOUT_SYMBOLS);
        assert!(largest.accepts(std::iter::empty::<usize>()));
    }

    #[test]
    fn minimized_file_names() {
        assert_eq!(
            minimized_file_name(Path::new("dfa1.txt")),
            PathBuf::from("dfa1-minimized.txt")
        );
        assert_eq!(
            minimized_file_name(Path::new("inputs/dfa.tar.gz")),
            PathBuf::from("inputs/dfa-minimized.tar.gz")
        );
        assert_eq!(
            minimized_file_name(Path::new("automaton")),
            PathBuf::from("automaton-minimized")
        );
        assert_eq!(
            minimized_file_name(Path::new(".hidden")),
            PathBuf::from(".hidden-minimized")
        );
    }

    #[cfg(feature = "graphviz")]
    #[test]
    fn files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("textbook.txt");
        write_dfa(&textbook_dfa(), &path).unwrap();
        assert_eq!(read_dfa(&path).unwrap(), textbook_dfa());

        assert!(matches!(
            read_dfa(dir.path().join("missing.txt")),
            Err(LoadError::Io(_))
        ));
    }
}
