use std::{path::Path, str::FromStr};

use thiserror::Error;
use tracing::trace;

use crate::{error::DfaError, Dfa, StateIndex};

/// Abstracts the types of errors that can occur when parsing a [`Dfa`] from a string.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("missing number of states")]
    MissingStateCount,
    #[error("missing size of the alphabet")]
    MissingAlphabetSize,
    #[error("line {line} should contain exactly one number")]
    ExpectedSingleNumber { line: usize },
    #[error("encountered malformed number `{token}` on line {line}")]
    MalformedNumber { line: usize, token: String },
    #[error("transition table with {states} states and {symbols} symbols is too large")]
    TooLarge { states: usize, symbols: usize },
    #[error("expected {expected} transition targets, but found only {found}")]
    MissingTargets { expected: usize, found: usize },
    #[error("unexpected input on line {line} after the last transition")]
    TrailingInput { line: usize },
    #[error("automaton is malformed: {0}")]
    Invalid(#[from] DfaError),
}

/// Errors that can occur when loading a [`Dfa`] from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read automaton: {0}")]
    Io(#[from] std::io::Error),
    /// The contents of the file are not a valid automaton.
    #[error("could not parse automaton: {0}")]
    Parse(#[from] ParseError),
}

/// Largest number of states accepted for an automaton over the empty alphabet. Such an
/// automaton has no transitions, so nothing in the input backs its state count.
pub const MAX_STATES_WITHOUT_SYMBOLS: usize = 1 << 20;

fn parse_number(line: usize, token: &str) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::MalformedNumber {
        line,
        token: token.to_string(),
    })
}

/// Reads the next non-blank line, which has to consist of a single number.
fn header_number<'a, I>(lines: &mut I, missing: ParseError) -> Result<usize, ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let (line, content) = lines
        .find(|(_, content)| !content.trim().is_empty())
        .ok_or(missing)?;
    let mut tokens = content.split_whitespace();
    let value = tokens
        .next()
        .map(|token| parse_number(line, token))
        .transpose()?
        .unwrap_or_default();
    if tokens.next().is_some() {
        return Err(ParseError::ExpectedSingleNumber { line });
    }
    Ok(value)
}

/// Parses a [`Dfa`] from its textual representation, see the [module level documentation](super).
///
/// The first two non-blank lines hold the number of states and the size of the alphabet.
/// The line right after them lists the accepting states and may be empty (or missing if
/// the input ends there). All remaining whitespace separated numbers are the transition
/// targets, read row by row, so line breaks within the table are not significant.
///
/// Over the empty alphabet at most [`MAX_STATES_WITHOUT_SYMBOLS`] states are accepted,
/// larger counts are rejected with [`ParseError::TooLarge`].
pub fn parse_dfa(input: &str) -> Result<Dfa, ParseError> {
    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    let size = header_number(&mut lines, ParseError::MissingStateCount)?;
    let alphabet_size = header_number(&mut lines, ParseError::MissingAlphabetSize)?;
    let expected = size
        .checked_mul(alphabet_size)
        .ok_or(ParseError::TooLarge {
            states: size,
            symbols: alphabet_size,
        })?;
    if alphabet_size == 0 && size > MAX_STATES_WITHOUT_SYMBOLS {
        return Err(ParseError::TooLarge {
            states: size,
            symbols: alphabet_size,
        });
    }
    trace!("parsing automaton with {size} states over {alphabet_size} symbols");

    let accepting = match lines.next() {
        Some((line, content)) => content
            .split_whitespace()
            .map(|token| parse_number(line, token))
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![],
    };

    let mut targets: Vec<StateIndex> = vec![];
    for (line, content) in lines {
        for token in content.split_whitespace() {
            if targets.len() == expected {
                return Err(ParseError::TrailingInput { line });
            }
            targets.push(parse_number(line, token)?);
        }
    }
    if targets.len() != expected {
        return Err(ParseError::MissingTargets {
            expected,
            found: targets.len(),
        });
    }

    let dfa = if alphabet_size == 0 {
        Dfa::from_parts(size, 0, accepting, (0..size).map(|_| [] as [StateIndex; 0]))?
    } else {
        Dfa::from_parts(
            size,
            alphabet_size,
            accepting,
            targets.chunks(alphabet_size).map(|row| row.iter().copied()),
        )?
    };
    Ok(dfa)
}

/// Reads and parses the file at `path`.
pub fn read_dfa<P: AsRef<Path>>(path: P) -> Result<Dfa, LoadError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    trace!("read {} bytes from {}", contents.len(), path.as_ref().display());
    Ok(parse_dfa(&contents)?)
}

impl FromStr for Dfa {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dfa(s)
    }
}
