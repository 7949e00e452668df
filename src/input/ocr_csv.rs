//! Loader for OCR result tables.
//!
//! Expected columns: `page,block_id,x0,y0,x1,y1,text,confidence`.
//! Extra columns are ignored; column order does not matter.

use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::core::geometry::BBox;
use crate::core::model::{PageSet, TextRegion};
use crate::input::InputError;

const PAGE: usize = 0;
const BLOCK_ID: usize = 1;
const X0: usize = 2;
const Y0: usize = 3;
const X1: usize = 4;
const Y1: usize = 5;
const TEXT: usize = 6;
const CONFIDENCE: usize = 7;

const REQUIRED_COLUMNS: [&str; 8] = [
    "page",
    "block_id",
    "x0",
    "y0",
    "x1",
    "y1",
    "text",
    "confidence",
];

pub fn load_ocr_results(path: &Path) -> Result<PageSet, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    // Header is validated in full before the first row is parsed, so
    // a missing column is reported by name rather than as a row error.
    let headers = reader
        .headers()
        .map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut columns = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *column) {
            Some(idx) => columns[slot] = idx,
            None => {
                return Err(InputError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
            }
        }
    }

    let mut pages = PageSet::new();
    for (record_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // 1-based file row, counting the header line.
        let row = record_idx + 2;

        let field = |slot: usize| record.get(columns[slot]).unwrap_or_default();

        let page: u32 = parse_number(path, row, "page", field(PAGE))?;
        let _block_id: u64 = parse_number(path, row, "block_id", field(BLOCK_ID))?;
        let x0: f64 = parse_number(path, row, "x0", field(X0))?;
        let y0: f64 = parse_number(path, row, "y0", field(Y0))?;
        let x1: f64 = parse_number(path, row, "x1", field(X1))?;
        let y1: f64 = parse_number(path, row, "y1", field(Y1))?;
        let confidence: f64 = parse_number(path, row, "confidence", field(CONFIDENCE))?;

        pages.entry(page).or_default().push(TextRegion {
            page,
            bbox: BBox::new(x0, y0, x1, y1),
            text: field(TEXT).to_string(),
            confidence: Some(confidence),
        });
    }

    debug!(
        pages = pages.len(),
        regions = pages.values().map(Vec::len).sum::<usize>(),
        "loaded OCR results"
    );
    Ok(pages)
}

fn parse_number<T: FromStr>(
    path: &Path,
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<T, InputError> {
    value.trim().parse().map_err(|_| InputError::InvalidNumber {
        path: path.to_path_buf(),
        row,
        field,
        value: value.to_string(),
    })
}
