use std::cmp::Ordering;

use crate::Candidate;

/// Order two candidates best first: the higher score sorts before the lower.
///
/// Candidates with equal scores compare [`Ordering::Equal`]; breaking such
/// ties is up to whoever holds the candidates.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.score()
        .partial_cmp(&a.score())
        .unwrap_or(Ordering::Equal)
}

/// Sort candidates best first. Ties keep their relative order.
pub fn best_first(candidates: &mut [Candidate]) {
    candidates.sort_by(compare);
}

impl Candidate {
    /// Where this candidate ranks relative to `other`; see [`compare`].
    pub fn rank(&self, other: &Candidate) -> Ordering {
        compare(self, other)
    }
}

/// A candidate ordered by its rank, for use in ordered collections.
///
/// The best candidate is the *least* [`Ranked`] value, so it comes first in
/// a sorted `Vec` or a `BTreeSet`, and is popped first from a
/// `BinaryHeap<Reverse<Ranked>>`.
#[derive(Debug, Clone)]
pub struct Ranked(pub Candidate);

impl Ranked {
    /// Unwrap the candidate.
    pub fn into_inner(self) -> Candidate {
        self.0
    }
}

impl From<Candidate> for Ranked {
    fn from(value: Candidate) -> Self {
        Ranked(value)
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;
    use std::sync::Arc;

    use super::*;
    use crate::{ColumnNode, InternalNode};
    use pretty_assertions::assert_eq;

    fn grown(max_node_count: usize, confidence: f64) -> Candidate {
        let mut candidate = Candidate::new(max_node_count);
        candidate.grow(
            Arc::new(ColumnNode::new("s1", "s1")),
            Arc::new(InternalNode::new("i1", "i1")),
            Arc::new(ColumnNode::new("t1", "t1")),
            confidence,
        );
        candidate
    }

    #[test]
    fn it_ranks_higher_scores_first() {
        let strong = grown(5, 0.9);
        let weak = grown(5, 0.1);

        assert!(strong.score() > weak.score());
        assert_eq!(strong.rank(&weak), Ordering::Less);
        assert_eq!(weak.rank(&strong), Ordering::Greater);
    }

    #[test]
    fn it_treats_equal_scores_as_equal() {
        let left = grown(5, 0.5);
        let right = grown(5, 0.5);

        assert_eq!(compare(&left, &right), Ordering::Equal);
        assert_eq!(Ranked(left), Ranked(right));
    }

    #[test]
    fn it_sorts_candidates_best_first() {
        let mut candidates = vec![grown(5, 0.1), grown(5, 0.9), grown(7, 0.5)];
        best_first(&mut candidates);

        let scores: Vec<f64> = candidates.iter().map(Candidate::score).collect();
        let mut expected = scores.clone();
        expected.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(scores, expected);
        assert_eq!(candidates[0].max_node_count(), 7);
    }

    #[test]
    fn it_pops_the_best_candidate_from_a_heap() {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Ranked(grown(5, 0.2))));
        heap.push(Reverse(Ranked(grown(5, 0.8))));
        heap.push(Reverse(Ranked(grown(5, 0.4))));

        let Reverse(best) = heap.pop().unwrap();
        assert_eq!(best.into_inner().confidence_samples(), &[0.8]);
    }
}
