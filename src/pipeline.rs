//! Evaluation orchestration: load both inputs, match per page, and
//! aggregate CER/IoU into a [`Report`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::core::model::PageSet;
use crate::input::{load_ground_truth, load_ocr_results};
use crate::matching::{GreedyMatcher, MatchStrategy};
use crate::metrics::{CerCalculator, WeightedCer};
use crate::report::{PageOutcome, PageReport, Report};

pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub ocr_csv: PathBuf,
    pub ground_truth: PathBuf,
    pub iou_threshold: f64,
    /// Apply NFC normalization to all text before scoring, so
    /// decomposed and precomposed forms of the same character do not
    /// count as errors.
    pub normalize: bool,
}

impl EvalConfig {
    pub fn new(ocr_csv: PathBuf, ground_truth: PathBuf) -> Self {
        Self {
            ocr_csv,
            ground_truth,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            normalize: false,
        }
    }
}

/// Runs a full evaluation: one-shot synchronous load of both inputs,
/// then pure computation. Any load error aborts before any metric is
/// computed.
pub fn evaluate(config: &EvalConfig) -> Result<Report> {
    let mut ocr = load_ocr_results(&config.ocr_csv)
        .with_context(|| format!("failed to load OCR results: {}", config.ocr_csv.display()))?;
    let mut ground_truth = load_ground_truth(&config.ground_truth).with_context(|| {
        format!(
            "failed to load ground truth: {}",
            config.ground_truth.display()
        )
    })?;

    if config.normalize {
        normalize_pages(&mut ocr);
        normalize_pages(&mut ground_truth);
    }

    Ok(score(&ground_truth, &ocr, config.iou_threshold))
}

/// Scores already-loaded page sets with the default greedy matcher
/// and distance backend.
pub fn score(ground_truth: &PageSet, ocr: &PageSet, iou_threshold: f64) -> Report {
    score_with(
        ground_truth,
        ocr,
        iou_threshold,
        &CerCalculator::new(),
        &GreedyMatcher::new(),
    )
}

/// Scores already-loaded page sets. Pages are visited in ascending
/// ground-truth page order; OCR output on pages without ground truth
/// contributes nothing.
///
/// Per-page policy:
/// - no annotations on the page: skipped, reported as such.
/// - annotations but no OCR output: every annotation is scored against
///   the empty hypothesis, weighted by its character count.
/// - both present: matched pairs contribute weighted CER and IoU.
///   Ground-truth regions that fail to match are not penalized in this
///   path, while the no-OCR path penalizes everything. The asymmetry
///   is deliberate; see DESIGN.md.
pub fn score_with(
    ground_truth: &PageSet,
    ocr: &PageSet,
    iou_threshold: f64,
    cer: &CerCalculator,
    matcher: &dyn MatchStrategy,
) -> Report {
    let mut pages = Vec::with_capacity(ground_truth.len());
    let mut total_cer = WeightedCer::default();
    let mut total_iou_sum = 0.0;
    let mut total_matched = 0usize;

    for (&page, annotations) in ground_truth {
        if annotations.is_empty() {
            pages.push(PageReport {
                page,
                outcome: PageOutcome::NoGroundTruth,
            });
            continue;
        }

        let predictions = ocr.get(&page).map(Vec::as_slice).unwrap_or(&[]);
        if predictions.is_empty() {
            // The empty hypothesis is maximally wrong for every
            // annotation on the page.
            for annotation in annotations {
                total_cer.add(cer.cer(&annotation.text, ""), annotation.char_count());
            }
            pages.push(PageReport {
                page,
                outcome: PageOutcome::NoOcrResults,
            });
            continue;
        }

        let matched = matcher.match_page(annotations, predictions, iou_threshold);

        let mut page_cer = WeightedCer::default();
        let mut page_iou_sum = 0.0;
        for pair in &matched {
            page_cer.add(
                cer.cer(&pair.ground_truth.text, &pair.predicted.text),
                pair.ground_truth.char_count(),
            );
            page_iou_sum += pair.iou;
        }
        debug!(page, matched = matched.len(), "scored page");

        total_cer.merge(page_cer);
        total_iou_sum += page_iou_sum;
        total_matched += matched.len();

        let average_iou = if matched.is_empty() {
            None
        } else {
            Some(page_iou_sum / matched.len() as f64)
        };
        pages.push(PageReport {
            page,
            outcome: PageOutcome::Evaluated {
                average_cer: page_cer.average(),
                matched_count: matched.len(),
                average_iou,
            },
        });
    }

    let overall_iou = if total_matched == 0 {
        None
    } else {
        Some(total_iou_sum / total_matched as f64)
    };

    Report {
        pages,
        matched_pairs: total_matched,
        overall_cer: total_cer.average(),
        overall_iou,
    }
}

fn normalize_pages(pages: &mut PageSet) {
    for regions in pages.values_mut() {
        for region in regions.iter_mut() {
            region.text = region.text.nfc().collect();
        }
    }
}
