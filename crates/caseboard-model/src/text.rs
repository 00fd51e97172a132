//! Label folding shared by every classifier.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a free-text label for comparison: lowercase, NFD-decompose, drop
/// combining marks, and collapse whitespace to single spaces.
///
/// `"  EXECUÇÃO  Provisória "` folds to `"execucao provisoria"`.
pub fn fold_label(s: &str) -> String {
    // Lowercasing can emit combining marks (`İ` → `i̇`), so it runs first.
    let lowered: String = s.chars().flat_map(char::to_lowercase).collect();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when the folded `haystack` contains any of the (already folded) `needles`.
pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|n| !n.is_empty() && haystack.contains(n.as_str()))
}

/// True when the folded `value` equals any of the (already folded) `codes`.
pub(crate) fn equals_any(value: &str, codes: &[String]) -> bool {
    !value.is_empty() && codes.iter().any(|c| c == value)
}
