use std::fmt::Display;

use indexmap::IndexMap;

use crate::Node;

/// A compact, fixed-width stand-in for a provenance tag.
///
/// Labels are handed out by a [`PatternIndex`] in the order tags are first
/// seen, so the same node set always yields the same labels. Only label
/// identity matters; the numeric value carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternLabel(usize);

impl Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    label: PatternLabel,
    count: usize,
}

/// Counts, for every provenance tag, how many nodes of a set reference it.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex<'a> {
    tallies: IndexMap<&'a str, Tally>,
}

impl<'a> PatternIndex<'a> {
    /// Tally the provenance tags of `nodes`.
    pub fn build<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut tallies: IndexMap<&'a str, Tally> = IndexMap::new();

        for node in nodes {
            for tag in node.provenance_tags() {
                let next = PatternLabel(tallies.len());
                tallies
                    .entry(tag)
                    .and_modify(|tally| tally.count += 1)
                    .or_insert(Tally {
                        label: next,
                        count: 1,
                    });
            }
        }

        Self { tallies }
    }

    /// Number of nodes referencing `tag` (zero for an unknown tag).
    pub fn count(&self, tag: &str) -> usize {
        self.tallies.get(tag).map_or(0, |tally| tally.count)
    }

    /// The label assigned to `tag`, if any node references it.
    pub fn label(&self, tag: &str) -> Option<PatternLabel> {
        self.tallies.get(tag).map(|tally| tally.label)
    }

    /// The largest tally observed, or zero when there are no tags at all.
    pub fn max_frequency(&self) -> usize {
        self.tallies
            .values()
            .map(|tally| tally.count)
            .max()
            .unwrap_or(0)
    }

    /// Iterate over `(tag, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.tallies.iter().map(|(tag, tally)| (*tag, tally.count))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// True when no node carries a tag.
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
