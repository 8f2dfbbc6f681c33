//! Pull a footprint result out of the model's free-text reply.
//!
//! The model is asked for bare JSON but routinely wraps it in prose or a
//! Markdown fence. Extraction takes the first balanced top-level object
//! (braces inside JSON strings do not count), parses it and decodes it
//! strictly into a [`FootprintResult`].

use serde_json::Value;

use crate::error::{EstimateError, Result};
use crate::footprint::FootprintResult;

/// A reply that has been located, parsed and checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// The object exactly as the model wrote it
    pub raw: Value,
    pub result: FootprintResult,
}

/// Byte range of the first balanced `{...}` span in `text`.
///
/// Returns `None` when there is no opening brace or the object never closes.
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Locate, parse and validate the footprint result in a model reply.
pub fn extract_result(content: &str) -> Result<Extracted> {
    let span = find_json_object(content).ok_or(EstimateError::NoJsonObject)?;
    let raw: Value = serde_json::from_str(span)?;
    let result: FootprintResult = serde_json::from_value(raw.clone())
        .map_err(|e| EstimateError::Schema(e.to_string()))?;
    result.validate()?;
    log::info!(
        "Parsed result: {:.2} tons, {} breakdown entries, {} recommendations",
        result.carbon_footprint,
        result.breakdown.len(),
        result.recommendations.len()
    );
    Ok(Extracted { raw, result })
}
