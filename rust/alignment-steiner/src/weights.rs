use serde::{Deserialize, Serialize};

use crate::AlignmentError;

/// Weights of the three quality signals in a candidate's score:
///
/// ```text
/// score = coherence_weight * coherence
///       + size_weight * (max_node_count - node_count)
///       + confidence_weight * confidence
/// ```
///
/// The default weights (`1.0`, `0.5`, `0.8`) are the ranking contract the
/// search is tuned against. Missing fields deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the coherence scalar (α).
    pub coherence: f64,
    /// Weight of the distance between node count and the bound (β).
    pub size: f64,
    /// Weight of the accumulated confidence (γ).
    pub confidence: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coherence: 1.0,
            size: 0.5,
            confidence: 0.8,
        }
    }
}

impl ScoreWeights {
    /// Build a validated set of weights.
    pub fn new(coherence: f64, size: f64, confidence: f64) -> Result<Self, AlignmentError> {
        Self {
            coherence,
            size,
            confidence,
        }
        .validated()
    }

    /// Check that every weight is finite, returning `self` if so.
    ///
    /// Use this after deserializing weights from configuration.
    pub fn validated(self) -> Result<Self, AlignmentError> {
        for (name, value) in [
            ("coherence", self.coherence),
            ("size", self.size),
            ("confidence", self.confidence),
        ] {
            if !value.is_finite() {
                return Err(AlignmentError::InvalidWeight { name, value });
            }
        }
        Ok(self)
    }

    /// Combine the three signals into a score.
    pub fn score(&self, coherence: f64, size_slack: f64, confidence: f64) -> f64 {
        self.coherence * coherence + self.size * size_slack + self.confidence * confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_defaults_to_the_ranking_contract() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.coherence, 1.0);
        assert_eq!(weights.size, 0.5);
        assert_eq!(weights.confidence, 0.8);
        assert_eq!(weights.score(0.0, 5.0, 1.0), 0.5 * 5.0 + 0.8);
    }

    #[test]
    fn it_fills_missing_fields_from_defaults() {
        let weights: ScoreWeights = serde_json::from_str(r#"{ "size": 0.25 }"#).unwrap();
        assert_eq!(
            weights,
            ScoreWeights {
                size: 0.25,
                ..ScoreWeights::default()
            }
        );

        let weights: ScoreWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(weights, ScoreWeights::default());
    }

    #[test]
    fn it_rejects_non_finite_weights() {
        assert_eq!(
            ScoreWeights::new(1.0, f64::INFINITY, 0.8),
            Err(AlignmentError::InvalidWeight {
                name: "size",
                value: f64::INFINITY,
            })
        );
        assert!(ScoreWeights::new(f64::NAN, 0.5, 0.8).is_err());
        assert!(ScoreWeights::new(2.0, 0.0, -1.0).is_ok());
    }
}
