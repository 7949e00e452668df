//! Loader for ground-truth annotations.
//!
//! Expected shape: an object keyed by page number (string keys like
//! `"1"` are accepted), each page mapping to a list of
//! `{ "bbox": [x0, y0, x1, y1], "text": "..." }` entries.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::geometry::BBox;
use crate::core::model::{PageSet, TextRegion};
use crate::input::InputError;

pub fn load_ground_truth(path: &Path) -> Result<PageSet, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let data = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&data).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(map) = root else {
        return Err(structure(path, "root must be an object keyed by page number"));
    };

    let mut pages = PageSet::new();
    for (key, value) in map {
        let page: u32 = key.trim().parse().map_err(|_| {
            structure(
                path,
                &format!("page key `{key}` is not a non-negative integer"),
            )
        })?;

        let Value::Array(entries) = value else {
            return Err(structure(
                path,
                &format!("page {page}: value must be a list of annotations"),
            ));
        };

        let mut regions = Vec::with_capacity(entries.len());
        for (entry_idx, entry) in entries.iter().enumerate() {
            regions.push(parse_entry(path, page, entry_idx, entry)?);
        }
        pages.insert(page, regions);
    }

    debug!(
        pages = pages.len(),
        regions = pages.values().map(Vec::len).sum::<usize>(),
        "loaded ground truth"
    );
    Ok(pages)
}

fn parse_entry(
    path: &Path,
    page: u32,
    entry_idx: usize,
    entry: &Value,
) -> Result<TextRegion, InputError> {
    let Value::Object(obj) = entry else {
        return Err(structure(
            path,
            &format!("page {page}, entry {entry_idx}: must be an object"),
        ));
    };

    let bbox = obj.get("bbox").ok_or_else(|| {
        structure(
            path,
            &format!("page {page}, entry {entry_idx}: missing `bbox`"),
        )
    })?;
    let text = obj
        .get("text")
        .ok_or_else(|| {
            structure(
                path,
                &format!("page {page}, entry {entry_idx}: missing `text`"),
            )
        })?
        .as_str()
        .ok_or_else(|| {
            structure(
                path,
                &format!("page {page}, entry {entry_idx}: `text` must be a string"),
            )
        })?;

    let coords = bbox.as_array().filter(|a| a.len() == 4).ok_or_else(|| {
        structure(
            path,
            &format!("page {page}, entry {entry_idx}: `bbox` must be an array of 4 numbers"),
        )
    })?;
    let mut parsed = [0.0_f64; 4];
    for (i, coord) in coords.iter().enumerate() {
        parsed[i] = coord.as_f64().ok_or_else(|| {
            structure(
                path,
                &format!("page {page}, entry {entry_idx}: `bbox[{i}]` is not a number"),
            )
        })?;
    }

    Ok(TextRegion {
        page,
        bbox: BBox::new(parsed[0], parsed[1], parsed[2], parsed[3]),
        text: text.to_string(),
        confidence: None,
    })
}

fn structure(path: &Path, detail: &str) -> InputError {
    InputError::InvalidStructure {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}
