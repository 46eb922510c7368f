/// The value an out-of-range edge confidence is replaced with.
///
/// Small enough to push a candidate down the ranking, large enough that the
/// running product never collapses to zero.
pub const MIN_CONFIDENCE: f64 = 1e-6;

/// Bring an edge confidence into `(0, 1]`.
///
/// Anything at or below zero, above one, or not a number becomes
/// [`MIN_CONFIDENCE`].
pub fn clamp(confidence: f64) -> f64 {
    if confidence > 0.0 && confidence <= 1.0 {
        confidence
    } else {
        MIN_CONFIDENCE
    }
}

/// Multiplicative combination of per-edge confidences.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceAccumulator {
    samples: Vec<f64>,
    product: f64,
}

impl Default for ConfidenceAccumulator {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            product: 1.0,
        }
    }
}

impl ConfidenceAccumulator {
    /// Clamp `confidence`, record it and fold it into the product. Returns
    /// the value that was recorded.
    ///
    /// The product never drops below [`f64::MIN_POSITIVE`], so it stays in
    /// `(0, 1]` however many floored samples are folded in.
    pub fn push(&mut self, confidence: f64) -> f64 {
        let sample = clamp(confidence);
        self.samples.push(sample);
        self.product = (self.product * sample).max(f64::MIN_POSITIVE);
        sample
    }

    /// The recorded samples, in insertion order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// The product of all recorded samples, floored at [`f64::MIN_POSITIVE`];
    /// `1.0` when none were recorded.
    pub fn value(&self) -> f64 {
        self.product
    }
}
