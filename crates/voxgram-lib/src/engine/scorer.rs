//! Span scoring for model-backed wildcards.

/// Scores a candidate wildcard span under a named model.
///
/// Higher is better. Scores are compared against the configured floor, so the
/// scale only has to agree with that floor (log-probabilities work well).
pub trait Scorer: Send + Sync {
    fn score(&self, model: &str, span: &str) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn score(&self, model: &str, span: &str) -> f64 {
        self(model, span)
    }
}

/// Scorer that gives every span the same score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformScorer(pub f64);

impl UniformScorer {
    pub const DEFAULT: Self = Self(-5.5);
}

impl Default for UniformScorer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Scorer for UniformScorer {
    fn score(&self, _model: &str, _span: &str) -> f64 {
        self.0
    }
}
