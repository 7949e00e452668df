//! Pairing of ground-truth regions with OCR predictions on one page.

use crate::core::model::{MatchedPair, TextRegion};

/// Strategy seam for box matching. The default greedy strategy makes
/// no global-optimum claim; an optimal-assignment strategy (e.g.
/// Hungarian) can be slotted in here without touching callers.
pub trait MatchStrategy {
    /// Pairs regions from a single page. Boxes from different pages
    /// never compete; callers invoke this once per page.
    fn match_page(
        &self,
        ground_truth: &[TextRegion],
        predicted: &[TextRegion],
        iou_threshold: f64,
    ) -> Vec<MatchedPair>;
}

/// Ground-truth-first greedy matcher.
///
/// Each ground-truth region, in input order, claims the not-yet-
/// consumed prediction with the strictly highest IoU; on ties the
/// first-seen prediction wins. A claim only stands when the best IoU
/// reaches the threshold. Known limitation: a greedy claim can steal
/// a prediction that a later ground-truth region would have overlapped
/// better.
#[derive(Debug, Default)]
pub struct GreedyMatcher;

impl GreedyMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for GreedyMatcher {
    fn match_page(
        &self,
        ground_truth: &[TextRegion],
        predicted: &[TextRegion],
        iou_threshold: f64,
    ) -> Vec<MatchedPair> {
        let mut pairs = Vec::new();
        // Consumed predictions are tracked per call only; nothing
        // leaks across pages or runs.
        let mut consumed = vec![false; predicted.len()];

        for gt in ground_truth {
            let mut best_iou = -1.0_f64;
            let mut best_idx = None;

            for (idx, pred) in predicted.iter().enumerate() {
                if consumed[idx] {
                    continue;
                }
                let iou = gt.bbox.iou(&pred.bbox);
                if iou > best_iou {
                    best_iou = iou;
                    best_idx = Some(idx);
                }
            }

            if let Some(idx) = best_idx {
                if best_iou >= iou_threshold {
                    consumed[idx] = true;
                    pairs.push(MatchedPair {
                        ground_truth: gt.clone(),
                        predicted: predicted[idx].clone(),
                        iou: best_iou,
                    });
                }
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    fn region(page: u32, bbox: BBox, text: &str) -> TextRegion {
        TextRegion {
            page,
            bbox,
            text: text.to_string(),
            confidence: None,
        }
    }

    #[test]
    fn matches_overlapping_regions() {
        let gt = vec![region(1, BBox::new(0.0, 0.0, 10.0, 10.0), "hello")];
        let pred = vec![region(1, BBox::new(1.0, 1.0, 11.0, 11.0), "hella")];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ground_truth.text, "hello");
        assert_eq!(pairs[0].predicted.text, "hella");
    }

    #[test]
    fn threshold_rejects_weak_overlap() {
        let gt = vec![region(1, BBox::new(0.0, 0.0, 10.0, 10.0), "hello")];
        let pred = vec![region(1, BBox::new(8.0, 8.0, 18.0, 18.0), "hello")];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.5);
        assert!(pairs.is_empty());
    }

    #[test]
    fn prediction_is_consumed_at_most_once() {
        let shared = BBox::new(0.0, 0.0, 10.0, 10.0);
        let gt = vec![region(1, shared, "first"), region(1, shared, "second")];
        let pred = vec![region(1, shared, "only")];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].ground_truth.text, "first");
    }

    #[test]
    fn tie_goes_to_first_seen_prediction() {
        let gt = vec![region(1, BBox::new(0.0, 0.0, 10.0, 10.0), "gt")];
        let same = BBox::new(0.0, 0.0, 10.0, 10.0);
        let pred = vec![region(1, same, "first"), region(1, same, "second")];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].predicted.text, "first");
    }

    #[test]
    fn never_more_pairs_than_smaller_side() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let gt: Vec<_> = (0..5).map(|i| region(1, bbox, &format!("g{i}"))).collect();
        let pred: Vec<_> = (0..2).map(|i| region(1, bbox, &format!("p{i}"))).collect();
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.0);
        assert!(pairs.len() <= gt.len().min(pred.len()));
    }

    #[test]
    fn ground_truth_picks_its_best_overlap() {
        let gt = vec![region(1, BBox::new(0.0, 0.0, 10.0, 10.0), "gt")];
        let pred = vec![
            region(1, BBox::new(4.0, 4.0, 14.0, 14.0), "weak"),
            region(1, BBox::new(1.0, 1.0, 11.0, 11.0), "strong"),
        ];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.1);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].predicted.text, "strong");
    }

    #[test]
    fn zero_threshold_still_requires_nonnegative_best() {
        // Disjoint boxes give IoU 0.0, which passes a 0.0 threshold;
        // the greedy scan must still terminate with one pair each.
        let gt = vec![region(1, BBox::new(0.0, 0.0, 1.0, 1.0), "a")];
        let pred = vec![region(1, BBox::new(5.0, 5.0, 6.0, 6.0), "b")];
        let pairs = GreedyMatcher::new().match_page(&gt, &pred, 0.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].iou, 0.0);
    }
}
