//! Report model and text rendering.
//!
//! The rendered format is line-oriented and stable: four decimal
//! places for every metric, an `N/A` literal wherever a denominator
//! was zero. Downstream diffing of report runs relies on this.

use serde::Serialize;

/// What the evaluator found on one ground-truth page.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The page key exists but carries no annotations.
    NoGroundTruth,
    /// Ground truth exists but no OCR output was produced for the
    /// page. Every annotation was scored against the empty hypothesis.
    NoOcrResults,
    Evaluated {
        /// Length-weighted average over matched pairs; `None` when no
        /// pair contributed ground-truth characters.
        #[serde(skip_serializing_if = "Option::is_none")]
        average_cer: Option<f64>,
        matched_count: usize,
        /// Simple mean over matched pairs; `None` when nothing
        /// matched.
        #[serde(skip_serializing_if = "Option::is_none")]
        average_iou: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageReport {
    pub page: u32,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub pages: Vec<PageReport>,
    pub matched_pairs: usize,
    /// Length-weighted across all ground-truth characters in the run,
    /// not a mean of per-page averages.
    pub overall_cer: Option<f64>,
    /// Simple mean across all matched pairs in the run.
    pub overall_iou: Option<f64>,
}

pub fn render(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("--- OCR Accuracy Report ---\n");

    for page in &report.pages {
        match &page.outcome {
            PageOutcome::NoGroundTruth => {
                out.push_str(&format!("Page {}: No ground truth data found.\n", page.page));
            }
            PageOutcome::NoOcrResults => {
                out.push_str(&format!("Page {}: No OCR results found.\n", page.page));
            }
            PageOutcome::Evaluated {
                average_cer,
                matched_count,
                average_iou,
            } => {
                match average_cer {
                    Some(cer) => out.push_str(&format!(
                        "Page {}: Average CER = {:.4}, Matched Boxes = {}\n",
                        page.page, cer, matched_count
                    )),
                    None => out.push_str(&format!(
                        "Page {}: No ground truth characters for CER calculation.\n",
                        page.page
                    )),
                }
                if let Some(iou) = average_iou {
                    out.push_str(&format!("Page {}: Average IoU = {:.4}\n", page.page, iou));
                }
            }
        }
    }

    out.push_str("\n--- Overall Metrics ---\n");
    match report.overall_cer {
        Some(cer) => out.push_str(&format!("Overall Average CER: {:.4}\n", cer)),
        None => out.push_str("Overall Average CER: N/A (No ground truth text found)\n"),
    }
    match report.overall_iou {
        Some(iou) => out.push_str(&format!("Overall Average IoU: {:.4}\n", iou)),
        None => out.push_str("Overall Average IoU: N/A (No matched bounding boxes found)\n"),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_all_page_outcomes() {
        let report = Report {
            pages: vec![
                PageReport {
                    page: 1,
                    outcome: PageOutcome::NoGroundTruth,
                },
                PageReport {
                    page: 2,
                    outcome: PageOutcome::NoOcrResults,
                },
                PageReport {
                    page: 3,
                    outcome: PageOutcome::Evaluated {
                        average_cer: Some(0.25),
                        matched_count: 2,
                        average_iou: Some(0.875),
                    },
                },
            ],
            matched_pairs: 2,
            overall_cer: Some(0.25),
            overall_iou: Some(0.875),
        };

        let text = render(&report);
        assert_eq!(
            text,
            "--- OCR Accuracy Report ---\n\
             Page 1: No ground truth data found.\n\
             Page 2: No OCR results found.\n\
             Page 3: Average CER = 0.2500, Matched Boxes = 2\n\
             Page 3: Average IoU = 0.8750\n\
             \n\
             --- Overall Metrics ---\n\
             Overall Average CER: 0.2500\n\
             Overall Average IoU: 0.8750\n"
        );
    }

    #[test]
    fn renders_na_for_zero_denominators() {
        let report = Report {
            pages: vec![],
            matched_pairs: 0,
            overall_cer: None,
            overall_iou: None,
        };
        let text = render(&report);
        assert!(text.contains("Overall Average CER: N/A (No ground truth text found)"));
        assert!(text.contains("Overall Average IoU: N/A (No matched bounding boxes found)"));
    }

    #[test]
    fn renders_page_without_matchable_characters() {
        let report = Report {
            pages: vec![PageReport {
                page: 5,
                outcome: PageOutcome::Evaluated {
                    average_cer: None,
                    matched_count: 0,
                    average_iou: None,
                },
            }],
            matched_pairs: 0,
            overall_cer: None,
            overall_iou: None,
        };
        let text = render(&report);
        assert!(text.contains("Page 5: No ground truth characters for CER calculation."));
        assert!(!text.contains("Page 5: Average IoU"));
    }

    #[test]
    fn serializes_to_json() {
        let report = Report {
            pages: vec![PageReport {
                page: 1,
                outcome: PageOutcome::Evaluated {
                    average_cer: Some(0.0),
                    matched_count: 1,
                    average_iou: Some(1.0),
                },
            }],
            matched_pairs: 1,
            overall_cer: Some(0.0),
            overall_iou: Some(1.0),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"status\":\"evaluated\""));
        assert!(json.contains("\"matched_count\":1"));
    }
}
