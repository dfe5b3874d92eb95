use std::{
    fmt::{Display, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tracing::trace;

use crate::Dfa;

impl Display for Dfa {
    /// Writes `self` in the text format that [`super::parse_dfa`] reads.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.size())?;
        writeln!(f, "{}", self.alphabet().size())?;
        writeln!(f, "{}", self.accepting_states().join(" "))?;
        for row in self.rows() {
            f.write_str(&row.iter().join(" "))?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

/// Writes `dfa` to the file at `path`, replacing its previous contents.
pub fn write_dfa<P: AsRef<Path>>(dfa: &Dfa, path: P) -> std::io::Result<()> {
    trace!("writing automaton with {} states to {}", dfa.size(), path.as_ref().display());
    std::fs::write(path, dfa.to_string())
}

/// Derives the name of the file a minimized automaton is written to by inserting
/// `-minimized` in front of the first extension of the file name, so `dfa.txt` becomes
/// `dfa-minimized.txt`. A leading dot does not count as an extension.
pub fn minimized_file_name(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().map(|name| name.to_string_lossy()) else {
        return path.join("minimized");
    };
    let renamed = match name.char_indices().skip(1).find(|&(_, c)| c == '.') {
        Some((position, _)) => format!("{}-minimized{}", &name[..position], &name[position..]),
        None => format!("{name}-minimized"),
    };
    path.with_file_name(renamed)
}
