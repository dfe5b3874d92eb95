#![allow(missing_docs)]

use std::{collections::BTreeMap, fmt::Display};

use itertools::Itertools;

use crate::{alphabet::Symbol, Dfa, StateIndex};

/// Types that can be turned into a graphviz representation.
pub trait Dottable {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = std::iter::once(format!("digraph {} {{", self.dot_name()))
            .chain(self.dot_header_statements());

        let states = self.dot_states().into_iter().map(|q| {
            format!(
                "{} [{}]",
                self.dot_state_ident(q),
                self.dot_state_attributes(q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self
            .dot_transitions()
            .into_iter()
            .map(|(source, attributes, target)| {
                format!(
                    "{} -> {} [{}]",
                    self.dot_state_ident(source),
                    self.dot_state_ident(target),
                    attributes.into_iter().map(|attr| attr.to_string()).join(", ")
                )
            });

        header
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    fn dot_name(&self) -> String;

    fn dot_header_statements(&self) -> Vec<String> {
        vec![]
    }

    fn dot_states(&self) -> Vec<StateIndex>;

    fn dot_state_ident(&self, idx: StateIndex) -> String;

    fn dot_state_attributes(&self, _idx: StateIndex) -> Vec<DotStateAttribute> {
        vec![]
    }

    /// Returns the edges as triples of source, attributes and target.
    fn dot_transitions(&self) -> Vec<(StateIndex, Vec<DotTransitionAttribute>, StateIndex)>;

    /// Renders the object visually (as PNG) and returns a vec of bytes/u8s encoding
    /// the rendered image. This method is only available on the `graphviz` crate feature
    /// and requires the `dot` executable.
    #[cfg(feature = "graphviz")]
    fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        use std::io::Write;
        use std::process::Stdio;

        use tracing::trace;
        let dot = self.dot_representation();
        trace!("writing dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr_output = String::from_utf8_lossy(&output.stderr);
            tracing::error!("Could not render, dot reported\n{}", &stderr_output);
            return Err(std::io::Error::other(format!(
                "dot process exited with status {}: {stderr_output}",
                output.status
            )));
        }
        Ok(output.stdout)
    }

    /// Attempts to render the object to a PNG file with the given filename. This method
    /// is only available on the `graphviz` crate feature and makes use of temporary files.
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &std::path::Path) -> Result<(), std::io::Error> {
        use std::io::Write;
        use tracing::trace;

        trace!("Outputting dot and rendering to png");
        let dot = self.dot_representation();
        let mut tempfile = tempfile::NamedTempFile::new()?;
        tempfile.write_all(dot.as_bytes())?;

        let output = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(tempfile.path())
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ))
        }
    }
}

impl Dottable for Dfa {
    fn dot_name(&self) -> String {
        "DFA".into()
    }

    fn dot_header_statements(&self) -> Vec<String> {
        match self.initial() {
            Some(initial) => vec![
                "init [label=\"\", shape=none]".to_string(),
                format!("init -> {}", self.dot_state_ident(initial)),
            ],
            None => vec![],
        }
    }

    fn dot_states(&self) -> Vec<StateIndex> {
        self.state_indices().collect()
    }

    fn dot_state_ident(&self, idx: StateIndex) -> String {
        format!("q{idx}")
    }

    fn dot_state_attributes(&self, idx: StateIndex) -> Vec<DotStateAttribute> {
        let shape = if self.is_accepting(idx) {
            "doublecircle"
        } else {
            "circle"
        };
        vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(self.dot_state_ident(idx)),
        ]
    }

    /// Parallel edges are merged into one edge whose label lists all symbols.
    fn dot_transitions(&self) -> Vec<(StateIndex, Vec<DotTransitionAttribute>, StateIndex)> {
        self.state_indices()
            .flat_map(|q| {
                let mut by_target: BTreeMap<StateIndex, Vec<Symbol>> = BTreeMap::new();
                for (sym, &p) in self.alphabet().universe().zip(self.row_unchecked(q)) {
                    by_target.entry(p).or_default().push(sym);
                }
                by_target.into_iter().map(move |(p, symbols)| {
                    (
                        q,
                        vec![DotTransitionAttribute::Label(symbols.iter().join(","))],
                        p,
                    )
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotStateAttribute {
    Label(String),
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotTransitionAttribute {
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{lbl}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DotStateAttribute, Dottable};
    use crate::{prelude::*, tests::textbook_dfa};

    #[test]
    fn dot_of_minimized_textbook_dfa() {
        let dfa = textbook_dfa().minimize().unwrap();
        assert_eq!(
            dfa.dot_representation(),
            [
                "digraph DFA {",
                "init [label=\"\", shape=none]",
                "init -> q0",
                "q0 [shape=\"circle\", label=\"q0\"]",
                "q1 [shape=\"doublecircle\", label=\"q1\"]",
                "q2 [shape=\"circle\", label=\"q2\"]",
                "q0 -> q0 [label=\"0\"]",
                "q0 -> q1 [label=\"1\"]",
                "q1 -> q1 [label=\"0\"]",
                "q1 -> q2 [label=\"1\"]",
                "q2 -> q2 [label=\"0,1\"]",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn state_attributes_follow_acceptance() {
        let dfa = textbook_dfa();
        assert_eq!(
            dfa.dot_state_attributes(4),
            vec![
                DotStateAttribute::Shape("doublecircle".into()),
                DotStateAttribute::Label("q4".into())
            ]
        );
        assert_eq!(
            dfa.dot_state_attributes(5)
                .iter()
                .map(|attr| attr.to_string())
                .collect::<Vec<_>>(),
            vec!["shape=\"circle\"", "label=\"q5\""]
        );
    }

    #[test]
    fn dot_of_empty_automaton() {
        assert_eq!(
            Dfa::empty(Alphabet::of_size(1)).dot_representation(),
            "digraph DFA {\n}"
        );
    }

    #[cfg(feature = "graphviz")]
    #[test_log::test]
    #[ignore]
    fn render_dfa() {
        let dir = tempfile::tempdir().unwrap();
        textbook_dfa()
            .render_to_file_name(&dir.path().join("textbook.png"))
            .unwrap();
        assert!(!textbook_dfa().render().unwrap().is_empty());
    }
}
