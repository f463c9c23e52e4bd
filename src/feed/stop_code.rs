use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::split::SplitError;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// agency-specific rules for turning raw stop codes into stable numeric
/// ids. some feeds publish codes like "Sta&Tho" or "NOTL CC" that carry
/// no digits at all; those get hand-assigned ids from `letter_codes`.
/// codes that mix a textual prefix with digits map into a reserved block
/// via `prefix_offsets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StopCodeMap {
    /// prefixes stripped from codes before they are used as identifiers
    #[serde(default)]
    pub strip_prefixes: Vec<String>,
    /// fully textual codes with hand-assigned numeric ids
    #[serde(default)]
    pub letter_codes: HashMap<String, u32>,
    /// prefixed numeric codes, offset into a reserved id block
    #[serde(default)]
    pub prefix_offsets: Vec<PrefixOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PrefixOffset {
    pub prefix: String,
    pub offset: u32,
}

impl StopCodeMap {
    /// normalizes a raw stop code for display. empty and placeholder "0"
    /// codes fall back to the stop id; configured prefixes are stripped.
    pub fn normalize<'a>(&self, raw_code: &'a str, fallback_id: &'a str) -> &'a str {
        let code = raw_code.trim();
        if code.is_empty() || code == "0" {
            return fallback_id;
        }
        for prefix in &self.strip_prefixes {
            if let Some(stripped) = code.strip_prefix(prefix.as_str()) {
                return stripped;
            }
        }
        code
    }

    /// resolves a normalized code to its numeric id. plain digit codes
    /// parse directly; everything else must match a letter code or a
    /// configured prefix block.
    pub fn numeric_id(&self, code: &str) -> Result<u32, SplitError> {
        if let Ok(id) = code.parse::<u32>() {
            return Ok(id);
        }
        if let Some(id) = self.letter_codes.get(code) {
            return Ok(*id);
        }
        if let Some(digits) = DIGITS.find(code) {
            let numeric: u32 = digits
                .as_str()
                .parse()
                .map_err(|_| SplitError::UnknownStopCode(code.to_string()))?;
            // longest configured prefix wins when blocks nest
            let block = self
                .prefix_offsets
                .iter()
                .filter(|p| code.starts_with(p.prefix.as_str()))
                .max_by_key(|p| p.prefix.len());
            if let Some(block) = block {
                return Ok(block.offset + numeric);
            }
        }
        Err(SplitError::UnknownStopCode(code.to_string()))
    }
}
