//! Judicial case-number parsing.
//!
//! Canonical layout (CNJ numbering): `NNNNNNN-DD.AAAA.J.TT.OOOO`
//! - `NNNNNNN` sequential number, `DD` check digits, `AAAA` filing year,
//! - `J` justice segment, `TT` court code, `OOOO` originating unit.
//!
//! Numbers arrive from spreadsheets with inconsistent punctuation, so the
//! primary path works on the digit-only form, where `TT` sits at a fixed
//! offset. Shortened punctuated numbers fall back to a pattern match.
//!
//! Every accessor re-runs extraction and lookup and returns `None` on a miss;
//! nothing here panics or errors on arbitrary input.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::courts::{lookup_court, Court};

/// Minimum digit count for positional extraction.
const MIN_POSITIONAL_DIGITS: usize = 18;
/// Digit offset of the `TT` segment in the 20-digit layout.
const COURT_CODE_OFFSET: usize = 14;

static PUNCTUATED: OnceLock<Option<Regex>> = OnceLock::new();

fn punctuated_pattern() -> Option<&'static Regex> {
    PUNCTUATED
        .get_or_init(|| Regex::new(r"\d+-\d{2}\.\d{4}\.\d\.(\d{2})\.\d+").ok())
        .as_ref()
}

/// Court resolution for one case number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtInfo {
    pub court_code: String,
    pub court_name: &'static str,
    pub state: &'static str,
    pub state_abbrev: &'static str,
    pub region: &'static str,
}

impl From<&Court> for CourtInfo {
    fn from(c: &Court) -> Self {
        Self {
            court_code: c.code.to_string(),
            court_name: c.name,
            state: c.state,
            state_abbrev: c.state_abbrev,
            region: c.region,
        }
    }
}

/// Extract the 2-digit court code, or `None` if it cannot be determined.
pub fn extract_court_code(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() >= MIN_POSITIONAL_DIGITS {
        return digits
            .get(COURT_CODE_OFFSET..COURT_CODE_OFFSET + 2)
            .map(str::to_string);
    }

    punctuated_pattern()?
        .captures(number)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn court_for(number: &str) -> Option<&'static Court> {
    extract_court_code(number).and_then(|code| lookup_court(&code))
}

/// Full resolution; `None` when the code is missing or not in the table.
pub fn resolve(number: &str) -> Option<CourtInfo> {
    court_for(number).map(CourtInfo::from)
}

pub fn court_name(number: &str) -> Option<&'static str> {
    court_for(number).map(|c| c.name)
}

pub fn state(number: &str) -> Option<&'static str> {
    court_for(number).map(|c| c.state)
}

pub fn state_abbrev(number: &str) -> Option<&'static str> {
    court_for(number).map(|c| c.state_abbrev)
}

pub fn region(number: &str) -> Option<&'static str> {
    court_for(number).map(|c| c.region)
}
