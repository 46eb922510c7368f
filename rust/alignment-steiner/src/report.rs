use std::fmt::Display;

use serde::Serialize;

use crate::{Candidate, CoherenceItem, Node};

/// A snapshot of how a candidate's score came about.
///
/// Its [`Display`] form is the six-line diagnostic text:
///
/// ```text
/// Person1|name|
/// coherence list: (2,1)
/// coherence value: 0.01
/// size: 2.0
/// total number of patterns: 2
/// final score: 1.9100000000000001
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDetails {
    /// One label per member node, in the order the nodes joined.
    pub labels: Vec<String>,
    /// Coherence clusters, in encoding order.
    pub coherence_items: Vec<CoherenceItem>,
    /// Encoded coherence.
    pub coherence: f64,
    /// Number of member nodes.
    pub node_count: usize,
    /// Total number of provenance tags across member nodes.
    pub frequency: usize,
    /// The ranking score.
    pub score: f64,
}

impl Candidate {
    /// The label a member node is shown with: the source column aligned
    /// with it when it is a mapped target, otherwise its own label.
    pub fn label_of<'a>(&'a self, node: &'a Node) -> &'a str {
        match node {
            Node::Column(column) => self
                .source_of(column.id())
                .map(|source| source.column_name())
                .unwrap_or_else(|| column.column_name()),
            Node::Internal(internal) => internal.local_id(),
        }
    }

    /// Capture the current score breakdown.
    pub fn score_details(&self) -> ScoreDetails {
        ScoreDetails {
            labels: self
                .nodes()
                .map(|node| self.label_of(node).to_owned())
                .collect(),
            coherence_items: self.coherence_items().to_vec(),
            coherence: self.coherence(),
            node_count: self.node_count(),
            frequency: self.frequency(),
            score: self.score(),
        }
    }
}

impl Display for ScoreDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for label in &self.labels {
            write!(f, "{label}|")?;
        }
        writeln!(f)?;

        write!(f, "coherence list: ")?;
        for item in &self.coherence_items {
            write!(f, "({},{})", item.size(), item.depth())?;
        }
        writeln!(f)?;

        writeln!(f, "coherence value: {}", Double(self.coherence))?;
        writeln!(f, "size: {}", Double(self.node_count as f64))?;
        writeln!(f, "total number of patterns: {}", self.frequency)?;
        write!(f, "final score: {}", Double(self.score))
    }
}

/// Renders a double the way the diagnostic text expects: plain decimal with
/// at least one fractional digit inside `[1e-3, 1e7)`, otherwise scientific
/// with a fractional mantissa and an upper-case exponent (`1.0E-4`, `2.5E7`).
struct Double(f64);

impl Display for Double {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = value.abs();
        if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
            // Shortest round-trip form; always carries a fractional part here.
            return write!(f, "{value:?}");
        }

        let scientific = format!("{value:e}");
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
        if mantissa.contains('.') {
            write!(f, "{mantissa}E{exponent}")
        } else {
            write!(f, "{mantissa}.0E{exponent}")
        }
    }
}
