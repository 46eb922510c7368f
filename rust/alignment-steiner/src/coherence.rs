//! Structural coherence of a node set.
//!
//! Nodes that were observed together in many historical models are more
//! likely to form a sensible semantic model. Coherence captures this by:
//!
//! 1. Tallying, for each provenance tag, how many member nodes carry it
//!    (see [`PatternIndex`]).
//! 2. Giving every node a *signature*: the labels of its tags that are shared
//!    by the largest number of nodes.
//! 3. Grouping nodes by signature into [`CoherenceItem`]s of
//!    `(size, depth)`: how many nodes share the signature, and how many tags
//!    the signature is made of.
//! 4. Sorting the items and folding them into a single scalar where the
//!    `k`-th item contributes `depth / 100^(k + 1)`.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{Node, PatternIndex, PatternLabel};

/// Positional base of the coherence encoding: each item is weighted two
/// decimal digits below the previous one.
const POSITION_BASE_DIGITS: u32 = 2;

/// One cluster of nodes sharing a coherence signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoherenceItem {
    size: usize,
    depth: usize,
}

impl CoherenceItem {
    /// A cluster of `size` nodes whose shared signature spans `depth` tags.
    pub fn new(size: usize, depth: usize) -> Self {
        Self { size, depth }
    }

    /// Number of nodes sharing the signature.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of tags that make up the signature.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Items are ordered largest cluster first, and among equally sized clusters
/// the deepest signature first. The encoded coherence value depends on this
/// order, so it must not change.
impl Ord for CoherenceItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| other.depth.cmp(&self.depth))
    }
}

impl PartialOrd for CoherenceItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The signature of a node: labels of the node's tags that reach the highest
/// tally among its tags, in sorted tag order.
///
/// Returns `None` for a node without tags.
pub fn signature(node: &Node, index: &PatternIndex<'_>) -> Option<Vec<PatternLabel>> {
    let top = node
        .provenance_tags()
        .map(|tag| index.count(tag))
        .max()
        .filter(|count| *count > 0)?;

    Some(
        node.provenance_tags()
            .filter(|tag| index.count(tag) == top)
            .filter_map(|tag| index.label(tag))
            .collect(),
    )
}

/// The coherence items and encoded value of a node set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coherence {
    items: Vec<CoherenceItem>,
    value: f64,
}

impl Coherence {
    /// Compute coherence over every node in `nodes`.
    pub fn compute<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
        I::IntoIter: Clone,
    {
        let nodes = nodes.into_iter();
        let index = PatternIndex::build(nodes.clone());

        let mut clusters: IndexMap<Vec<PatternLabel>, usize> = IndexMap::new();
        for node in nodes {
            if let Some(signature) = signature(node, &index) {
                *clusters.entry(signature).or_default() += 1;
            }
        }

        let mut items: Vec<CoherenceItem> = clusters
            .into_iter()
            .map(|(signature, size)| CoherenceItem::new(size, signature.len()))
            .collect();
        items.sort();

        let value = encode(&items);

        Self { items, value }
    }

    /// The sorted coherence items.
    pub fn items(&self) -> &[CoherenceItem] {
        &self.items
    }

    /// The encoded coherence scalar.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Split into items and value.
    pub fn into_parts(self) -> (Vec<CoherenceItem>, f64) {
        (self.items, self.value)
    }
}

/// Fold sorted items into one scalar: `Σ depth_k / 100^(k + 1)`.
///
/// The sum is accumulated exactly in [`Decimal`] and converted to `f64` only
/// at the end. Positions whose weight is finer than `Decimal` can represent
/// (28 fractional digits) are dropped; they lie far below `f64` resolution
/// of the leading terms.
pub fn encode(items: &[CoherenceItem]) -> f64 {
    let mut value = Decimal::ZERO;

    for (position, item) in items.iter().enumerate() {
        let scale = u32::try_from(position + 1)
            .ok()
            .and_then(|digits| digits.checked_mul(POSITION_BASE_DIGITS));
        let weighted = scale.zip(i64::try_from(item.depth).ok()).and_then(|(scale, depth)| {
            Decimal::try_new(depth, scale).ok()
        });
        let Some(weighted) = weighted else {
            break;
        };
        value += weighted;
    }

    value.to_f64().unwrap_or_default()
}
