use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// One detected or annotated text region on a page. Immutable once
/// loaded; the evaluation run owns every region it reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextRegion {
    pub page: u32,
    pub bbox: BBox,
    pub text: String,
    /// OCR engine confidence in [0, 1]. Ground-truth regions carry
    /// `None`. Informational only; the evaluator never branches on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TextRegion {
    /// Logical character count, not byte length. CER weighting for
    /// CJK and other multi-byte scripts depends on this.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Regions grouped by page number. BTreeMap keeps report output in
/// ascending page order; within a page, insertion order from the
/// input is preserved.
pub type PageSet = BTreeMap<u32, Vec<TextRegion>>;

/// A ground-truth region paired with the prediction that won it.
/// Produced by a match strategy, consumed during scoring, then
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub ground_truth: TextRegion,
    pub predicted: TextRegion,
    pub iou: f64,
}
