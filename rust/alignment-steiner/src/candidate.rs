use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::{
    AlignmentError, CoherenceItem, ColumnNode, ConfidenceAccumulator, InternalNode, Node, NodeId,
    ScoreWeights, coherence::Coherence,
};

/// A partial Steiner-tree solution under construction.
///
/// A candidate accumulates the nodes of a growing solution, one mapped edge
/// at a time, together with the mapping from the semantic model's target
/// columns to the source columns aligned with them. After every growth step
/// it holds three quality signals and the score that combines them:
///
/// - **confidence**: product of the (clamped) confidence of every edge
/// - **coherence**: how strongly the nodes cluster around shared provenance
///   tags (see [`crate::coherence`])
/// - **frequency**: total number of provenance tags on member nodes
///
/// Candidates are plain values. Branching searches either [`Clone`] a
/// candidate before growing it, or use [`Candidate::with_edge`] which leaves
/// the receiver untouched. Nodes are shared between copies, never copied.
#[derive(Debug, Clone)]
pub struct Candidate {
    nodes: IndexMap<NodeId, Node>,
    mapping: IndexMap<NodeId, Arc<ColumnNode>>,
    max_node_count: usize,
    weights: ScoreWeights,
    confidence: ConfidenceAccumulator,
    coherence: Coherence,
    frequency: usize,
    score: f64,
}

impl Candidate {
    /// An empty candidate scored against `max_node_count` with the default
    /// [`ScoreWeights`].
    pub fn new(max_node_count: usize) -> Self {
        Self::from_parts(max_node_count, ScoreWeights::default())
    }

    /// An empty candidate scored with custom weights.
    pub fn with_weights(
        max_node_count: usize,
        weights: ScoreWeights,
    ) -> Result<Self, AlignmentError> {
        Ok(Self::from_parts(max_node_count, weights.validated()?))
    }

    fn from_parts(max_node_count: usize, weights: ScoreWeights) -> Self {
        let mut candidate = Self {
            nodes: IndexMap::new(),
            mapping: IndexMap::new(),
            max_node_count,
            weights,
            confidence: ConfidenceAccumulator::default(),
            coherence: Coherence::default(),
            frequency: 0,
            score: 0.0,
        };
        candidate.compute_score();
        candidate
    }

    /// Add the edge `internal -> target`, aligning `source` with `target`.
    ///
    /// Returns `false` without touching anything when both `internal` and
    /// `target` are already members, since such an edge cannot make
    /// structural progress. Otherwise both nodes join the candidate, the
    /// mapping for `target` is (re)set to `source`, `confidence` is clamped
    /// into `(0, 1]` and folded in, and all derived metrics are recomputed.
    pub fn grow(
        &mut self,
        source: Arc<ColumnNode>,
        internal: Arc<InternalNode>,
        target: Arc<ColumnNode>,
        confidence: f64,
    ) -> bool {
        if self.contains(internal.id()) && self.contains(target.id()) {
            tracing::trace!(
                internal = %internal.id(),
                target = %target.id(),
                "Skipping edge between nodes already in candidate"
            );
            return false;
        }

        self.mapping.insert(target.id().clone(), source);

        for node in [Node::from(internal), Node::from(target)] {
            if let Entry::Vacant(entry) = self.nodes.entry(node.id().clone()) {
                self.frequency += node.tag_count();
                entry.insert(node);
            }
        }

        let sample = self.confidence.push(confidence);
        if sample != confidence {
            tracing::debug!(confidence, sample, "Edge confidence out of range; clamped");
        }

        self.coherence = Coherence::compute(self.nodes.values());
        self.compute_score();

        tracing::trace!(
            nodes = self.nodes.len(),
            score = self.score,
            "Grew candidate"
        );

        true
    }

    /// Like [`Candidate::grow`], but returns the grown candidate as a new
    /// value and leaves `self` as it was.
    ///
    /// Returns `None` where [`Candidate::grow`] would return `false`.
    pub fn with_edge(
        &self,
        source: Arc<ColumnNode>,
        internal: Arc<InternalNode>,
        target: Arc<ColumnNode>,
        confidence: f64,
    ) -> Option<Self> {
        if self.contains(internal.id()) && self.contains(target.id()) {
            return None;
        }
        let mut next = self.clone();
        next.grow(source, internal, target, confidence);
        Some(next)
    }

    fn compute_score(&mut self) {
        let size_slack = self.max_node_count as f64 - self.node_count() as f64;
        // The confidence term only counts once an edge has been accepted.
        let confidence = if self.confidence.samples().is_empty() {
            0.0
        } else {
            self.confidence.value()
        };
        self.score = self
            .weights
            .score(self.coherence.value(), size_slack, confidence);
    }

    /// True if a node with this id is a member.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Member nodes, in the order they joined.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    /// Target column id → source column aligned with it.
    pub fn mapping(&self) -> &IndexMap<NodeId, Arc<ColumnNode>> {
        &self.mapping
    }

    /// The source column aligned with the target column `target`, if any.
    pub fn source_of(&self, target: &NodeId) -> Option<&ColumnNode> {
        self.mapping.get(target).map(Arc::as_ref)
    }

    /// Clamped confidence of every accepted edge, in insertion order.
    pub fn confidence_samples(&self) -> &[f64] {
        self.confidence.samples()
    }

    /// Coherence clusters, in encoding order.
    pub fn coherence_items(&self) -> &[CoherenceItem] {
        self.coherence.items()
    }

    /// Product of all confidence samples.
    pub fn confidence(&self) -> f64 {
        self.confidence.value()
    }

    /// Encoded coherence of the member nodes.
    pub fn coherence(&self) -> f64 {
        self.coherence.value()
    }

    /// Total number of provenance tags across member nodes.
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// The ranking score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of member nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node count the size term of the score is measured against.
    pub fn max_node_count(&self) -> usize {
        self.max_node_count
    }

    /// The weights the score is computed with.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}
