//! pt-BR rendering helpers for view figures.

/// `12.345` → `"12,3%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value).replace('.', ",")
}

/// Whole reais with `.` thousands separators: `1234568` → `"R$ 1.234.568"`.
pub fn format_currency(value: u64) -> String {
    format!("R$ {}", group_thousands(value))
}

/// Rounded to whole reais before grouping.
pub fn format_currency_f64(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let whole = value.abs().round();
    let whole = if whole.is_finite() && whole < u64::MAX as f64 {
        whole as u64
    } else {
        0
    };
    format!("{sign}R$ {}", group_thousands(whole))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
