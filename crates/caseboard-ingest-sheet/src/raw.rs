//! Positional raw rows and cell coercion.

/// One spreadsheet cell as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    /// Blank or whitespace-only text becomes `Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s)
        }
    }

    /// Trimmed text view; numbers render without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            RawCell::Number(n) => n.to_string(),
        }
    }
}

/// Positional fields of one row.
pub type RawRow = Vec<RawCell>;

/// Column positions of the case export.
pub mod columns {
    pub const CASE_NUMBER: usize = 0;
    pub const ORIGIN: usize = 1;
    pub const COMPANY: usize = 2;
    pub const STATUS: usize = 3;
    pub const PHASE: usize = 4;
    pub const VALUE: usize = 5;
    pub const RISK: usize = 6;
    /// Rows with fewer fields are skipped.
    pub const MIN_FIELDS: usize = 7;
}

/// Outcome of coercing a monetary cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    /// Non-negative, rounded to the nearest integer unit.
    pub units: u64,
    /// True when a present value could not be used and 0 was substituted.
    pub coerced: bool,
}

/// Numbers are used as-is; text is parsed as a float; anything unusable is 0.
pub fn coerce_money(cell: &RawCell) -> Money {
    let parsed = match cell {
        RawCell::Empty => {
            return Money {
                units: 0,
                coerced: false,
            }
        }
        RawCell::Number(n) => Some(*n),
        RawCell::Text(s) => parse_money_text(s),
    };

    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => Money {
            units: v.round() as u64,
            coerced: false,
        },
        _ => Money {
            units: 0,
            coerced: true,
        },
    }
}

/// Parse a monetary string. Accepts an optional `R$` prefix, spaces, plain
/// floats (`1500.50`) and Brazilian notation (`1.500,50`): when the last
/// separator is a comma, dots are thousands separators. Without a comma, dots
/// are still thousands separators when they split the digits into groups of
/// three (`10.000`, `1.234.567`).
pub fn parse_money_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let without_symbol = trimmed
        .strip_prefix("R$")
        .or_else(|| trimmed.strip_prefix("r$"))
        .unwrap_or(trimmed);
    let compact: String = without_symbol.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        (None, Some(_)) if is_dot_grouped(&compact) => compact.replace('.', ""),
        _ => compact,
    };

    normalized.parse::<f64>().ok()
}

/// `d{1,3}(.ddd)+` with no leading zero, optionally signed.
fn is_dot_grouped(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let mut groups = digits.split('.');
    let head_ok = groups.next().is_some_and(|head| {
        (1..=3).contains(&head.len())
            && !head.starts_with('0')
            && head.bytes().all(|b| b.is_ascii_digit())
    });
    head_ok && groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}
