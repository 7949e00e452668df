//! Character Error Rate derived from edit distance.

use crate::metrics::edit_distance::{default_backend, DistanceBackend};

/// Scores hypothesis text against ground truth. The backend is picked
/// once at construction and reused for every pair in a run.
pub struct CerCalculator {
    backend: Box<dyn DistanceBackend>,
}

impl CerCalculator {
    pub fn new() -> Self {
        Self {
            backend: default_backend(),
        }
    }

    pub fn with_backend(backend: Box<dyn DistanceBackend>) -> Self {
        Self { backend }
    }

    /// Edit distance normalized by ground-truth character count.
    ///
    /// Empty ground truth is a policy case, not a division: 0.0 when
    /// the hypothesis is also empty, 1.0 otherwise. The value is
    /// unbounded above and must not be clamped; a hypothesis much
    /// longer than the ground truth legitimately scores past 1.0.
    pub fn cer(&self, ground_truth: &str, hypothesis: &str) -> f64 {
        let gt_chars = ground_truth.chars().count();
        if gt_chars == 0 {
            return if hypothesis.is_empty() { 0.0 } else { 1.0 };
        }
        self.backend.distance(ground_truth, hypothesis) as f64 / gt_chars as f64
    }
}

impl Default for CerCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Length-weighted CER accumulator. Each pair contributes
/// `cer * gt_char_count` to the error sum, so the average is a true
/// per-character error rate rather than a mean of per-pair ratios.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedCer {
    error_sum: f64,
    char_count: usize,
}

impl WeightedCer {
    pub fn add(&mut self, cer: f64, gt_chars: usize) {
        self.error_sum += cer * gt_chars as f64;
        self.char_count += gt_chars;
    }

    pub fn merge(&mut self, other: WeightedCer) {
        self.error_sum += other.error_sum;
        self.char_count += other.char_count;
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// `None` when no ground-truth characters were accumulated.
    pub fn average(&self) -> Option<f64> {
        if self.char_count == 0 {
            None
        } else {
            Some(self.error_sum / self.char_count as f64)
        }
    }
}
