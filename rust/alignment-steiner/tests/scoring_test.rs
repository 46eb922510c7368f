use std::sync::Arc;

use alignment_steiner::{
    Candidate, CoherenceItem, ColumnNode, InternalNode, MIN_CONFIDENCE, NodeId, Ranked,
    best_first,
};
use pretty_assertions::assert_eq;

fn column(id: &str, name: &str, tags: &[&str]) -> Arc<ColumnNode> {
    Arc::new(ColumnNode::new(id, name).with_provenance(tags.iter().copied()))
}

fn internal(id: &str, tags: &[&str]) -> Arc<InternalNode> {
    Arc::new(InternalNode::new(id, id).with_provenance(tags.iter().copied()))
}

#[test]
fn test_empty_candidate_scores_only_its_size_slack() {
    let candidate = Candidate::new(5);

    assert_eq!(candidate.node_count(), 0);
    assert_eq!(candidate.confidence(), 1.0);
    assert_eq!(candidate.coherence(), 0.0);
    assert_eq!(candidate.frequency(), 0);
    assert_eq!(candidate.score(), 2.5);
}

#[test]
fn test_single_edge_with_one_shared_pattern() {
    let mut candidate = Candidate::new(5);
    assert!(candidate.grow(
        column("HN1", "name", &[]),
        internal("Person1", &["m1"]),
        column("HN2", "personName", &["m1"]),
        0.5,
    ));

    assert_eq!(candidate.node_count(), 2);
    assert_eq!(candidate.confidence(), 0.5);
    assert_eq!(candidate.frequency(), 2);
    assert_eq!(candidate.coherence_items(), &[CoherenceItem::new(2, 1)]);
    assert!((candidate.coherence() - 0.01).abs() < 1e-12);
    assert!((candidate.score() - 1.91).abs() < 1e-12);
}

#[test]
fn test_zero_and_overflowing_confidence_store_the_same_floor() {
    let mut low = Candidate::new(5);
    low.grow(column("s", "s", &[]), internal("i", &[]), column("t", "t", &[]), 0.0);

    let mut high = Candidate::new(5);
    high.grow(column("s", "s", &[]), internal("i", &[]), column("t", "t", &[]), 1.5);

    assert_eq!(low.confidence_samples(), &[MIN_CONFIDENCE]);
    assert_eq!(low.confidence_samples(), high.confidence_samples());
    assert_eq!(low.score(), high.score());
}

#[test]
fn test_clones_grow_independently() {
    let mut original = Candidate::new(8);
    original.grow(
        column("HN1", "name", &[]),
        internal("Person1", &["m1"]),
        column("HN2", "personName", &["m1"]),
        0.9,
    );
    let snapshot = original.score_details();

    let mut branch = original.clone();
    assert!(branch.grow(
        column("HN3", "city", &[]),
        internal("City1", &["m1", "m2"]),
        column("HN4", "cityName", &["m2"]),
        0.4,
    ));

    assert_eq!(original.score_details(), snapshot);
    assert_eq!(original.node_count(), 2);
    assert_eq!(branch.node_count(), 4);
    assert!(!original.contains(&NodeId::from("City1")));
    assert_eq!(original.confidence_samples(), &[0.9]);
    assert_eq!(branch.confidence_samples(), &[0.9, 0.4]);
}

#[test]
fn test_a_growing_model_tracks_its_coherence_clusters() {
    let mut candidate = Candidate::new(10);

    // Person1 and City1 both appear in model m1; City1 and its column in m2.
    candidate.grow(
        column("HN1", "name", &[]),
        internal("Person1", &["m1"]),
        column("HN2", "personName", &["m1"]),
        1.0,
    );
    candidate.grow(
        column("HN3", "city", &[]),
        internal("City1", &["m1", "m2"]),
        column("HN4", "cityName", &["m2"]),
        1.0,
    );

    // m1 is carried by three nodes, m2 by two. Person1, personName and City1
    // all sign with m1; cityName only carries m2.
    assert_eq!(
        candidate.coherence_items(),
        &[CoherenceItem::new(3, 1), CoherenceItem::new(1, 1)]
    );
    assert!((candidate.coherence() - 0.0101).abs() < 1e-12);
    assert_eq!(candidate.frequency(), 5);

    let details = candidate.score_details();
    assert_eq!(
        details.labels,
        vec!["Person1", "name", "City1", "city"]
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>()
    );
}

#[test]
fn test_ranking_prefers_coherent_and_confident_candidates() {
    let shared = |confidence| {
        let mut candidate = Candidate::new(6);
        candidate.grow(
            column("HN1", "name", &[]),
            internal("Person1", &["m1"]),
            column("HN2", "personName", &["m1"]),
            confidence,
        );
        candidate
    };
    let untagged = {
        let mut candidate = Candidate::new(6);
        candidate.grow(
            column("HN1", "name", &[]),
            internal("Person1", &[]),
            column("HN2", "personName", &[]),
            0.8,
        );
        candidate
    };

    let mut candidates = vec![shared(0.2), untagged, shared(0.8)];
    best_first(&mut candidates);

    let confidences: Vec<f64> = candidates.iter().map(Candidate::confidence).collect();
    assert_eq!(confidences, vec![0.8, 0.8, 0.2]);
    assert_eq!(candidates[0].coherence_items(), &[CoherenceItem::new(2, 1)]);

    let mut ranked: Vec<Ranked> = candidates.into_iter().rev().map(Ranked::from).collect();
    ranked.sort();
    assert_eq!(ranked[0].0.coherence_items(), &[CoherenceItem::new(2, 1)]);
}

#[test]
fn test_long_runs_of_floored_confidence_stay_positive() {
    let mut candidate = Candidate::new(200);
    for index in 0..70 {
        assert!(candidate.grow(
            column(&format!("s{index}"), "source", &[]),
            internal(&format!("i{index}"), &[]),
            column(&format!("t{index}"), "target", &[]),
            0.0,
        ));
    }

    assert_eq!(candidate.confidence_samples().len(), 70);
    assert!(candidate.confidence() > 0.0);
    assert!(candidate.confidence() <= 1.0);
}
