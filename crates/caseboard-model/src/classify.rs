//! Row normalizer: free-text spreadsheet labels → closed enumerations.
//!
//! Matching is case-insensitive, whitespace-trimmed and accent-insensitive
//! (see [`fold_label`]). Markers and company tokens come from a
//! [`ClassifierConfig`]; the defaults cover the Portuguese labels found in
//! litigation exports plus the English wire names, so every enum's `label()`
//! and `as_str()` classify back to the same variant.
//!
//! Precedence is fixed and first-match-wins:
//! - company: own origin / main-tenant token → partner A (origin code or
//!   token) → partner B token → partner C token → `Other`
//! - phase: knowledge → appellate → execution (word prefix) → `Knowledge`
//! - risk: remote → possible → probable → `Remote`
//!
//! Phase and risk fallbacks are reported through [`Classified::matched`] so
//! ingestion can count labels that landed in the default bucket.

use serde::{Deserialize, Serialize};

use crate::case::{Company, Phase, RiskLevel};
use crate::text::{contains_any, equals_any, fold_label};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid classifier config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tokens and codes used to resolve the responsible company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyRules {
    /// Origin-type values meaning "own/proprietary" (exact match).
    pub own_origin: Vec<String>,
    /// Substrings of the company label naming the main tenant.
    pub main_tenant_tokens: Vec<String>,
    /// Origin-type values assigning the case to partner A (exact match).
    pub partner_a_origin: Vec<String>,
    pub partner_a_tokens: Vec<String>,
    pub partner_b_tokens: Vec<String>,
    pub partner_c_tokens: Vec<String>,
}

impl Default for CompanyRules {
    fn default() -> Self {
        Self {
            own_origin: strings(&["proprio", "propria", "own"]),
            main_tenant_tokens: strings(&["matriz", "propria", "maintenant"]),
            partner_a_origin: strings(&["parceira a"]),
            partner_a_tokens: strings(&["serede", "parceira a", "partnera"]),
            partner_b_tokens: strings(&["parceira b", "partnerb"]),
            partner_c_tokens: strings(&["parceira c", "partnerc"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhaseMarkers {
    pub knowledge: Vec<String>,
    pub appellate: Vec<String>,
    /// Word prefixes (`execu` covers execução/execucao/execution).
    pub execution: Vec<String>,
}

impl Default for PhaseMarkers {
    fn default() -> Self {
        Self {
            knowledge: strings(&["conhecimento", "knowledge"]),
            appellate: strings(&["recurs", "appellate"]),
            execution: strings(&["execu"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskMarkers {
    pub remote: Vec<String>,
    pub possible: Vec<String>,
    pub probable: Vec<String>,
}

impl Default for RiskMarkers {
    fn default() -> Self {
        Self {
            remote: strings(&["remot"]),
            possible: strings(&["possiv", "possib"]),
            probable: strings(&["provav", "probab"]),
        }
    }
}

/// Classifier configuration, loadable from JSON. Missing sections keep their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    pub company: CompanyRules,
    pub phase: PhaseMarkers,
    pub risk: RiskMarkers,
}

impl ClassifierConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A classification result plus whether a marker actually matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<T> {
    pub value: T,
    /// `false` when the label matched nothing and the default bucket was used.
    pub matched: bool,
}

impl<T> Classified<T> {
    fn hit(value: T) -> Self {
        Self {
            value,
            matched: true,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            matched: false,
        }
    }
}

/// The three normalized dimensions of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub company: Company,
    pub phase: Classified<Phase>,
    pub risk: Classified<RiskLevel>,
}

/// Free-text classifier fields of one raw row.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelFields<'a> {
    pub origin: &'a str,
    pub company: &'a str,
    pub phase: &'a str,
    pub risk: &'a str,
}

/// Pre-folded form of a [`ClassifierConfig`]. Cheap to share; pure to call.
#[derive(Debug, Clone)]
pub struct Classifier {
    company: CompanyRules,
    phase: PhaseMarkers,
    risk: RiskMarkers,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let c = &config.company;
        let p = &config.phase;
        let r = &config.risk;
        Self {
            company: CompanyRules {
                own_origin: fold_all(&c.own_origin),
                main_tenant_tokens: fold_all(&c.main_tenant_tokens),
                partner_a_origin: fold_all(&c.partner_a_origin),
                partner_a_tokens: fold_all(&c.partner_a_tokens),
                partner_b_tokens: fold_all(&c.partner_b_tokens),
                partner_c_tokens: fold_all(&c.partner_c_tokens),
            },
            phase: PhaseMarkers {
                knowledge: fold_all(&p.knowledge),
                appellate: fold_all(&p.appellate),
                execution: fold_all(&p.execution),
            },
            risk: RiskMarkers {
                remote: fold_all(&r.remote),
                possible: fold_all(&r.possible),
                probable: fold_all(&r.probable),
            },
        }
    }

    pub fn classify(&self, fields: &LabelFields<'_>) -> Classification {
        Classification {
            company: self.company(fields.origin, fields.company),
            phase: self.phase(fields.phase),
            risk: self.risk(fields.risk),
        }
    }

    /// The origin-type flag only dominates for the main tenant: an "own"
    /// origin wins over any partner token in the label.
    pub fn company(&self, origin: &str, label: &str) -> Company {
        let origin = fold_label(origin);
        let label = fold_label(label);
        let rules = &self.company;

        if equals_any(&origin, &rules.own_origin) || contains_any(&label, &rules.main_tenant_tokens) {
            Company::MainTenant
        } else if equals_any(&origin, &rules.partner_a_origin)
            || contains_any(&label, &rules.partner_a_tokens)
        {
            Company::PartnerA
        } else if contains_any(&label, &rules.partner_b_tokens) {
            Company::PartnerB
        } else if contains_any(&label, &rules.partner_c_tokens) {
            Company::PartnerC
        } else {
            Company::Other
        }
    }

    pub fn phase(&self, label: &str) -> Classified<Phase> {
        let label = fold_label(label);
        let markers = &self.phase;

        if contains_any(&label, &markers.knowledge) {
            Classified::hit(Phase::Knowledge)
        } else if contains_any(&label, &markers.appellate) {
            Classified::hit(Phase::Appellate)
        } else if has_word_prefix(&label, &markers.execution) {
            Classified::hit(Phase::Execution)
        } else {
            Classified::fallback(Phase::Knowledge)
        }
    }

    pub fn risk(&self, label: &str) -> Classified<RiskLevel> {
        let label = fold_label(label);
        let markers = &self.risk;

        if contains_any(&label, &markers.remote) {
            Classified::hit(RiskLevel::Remote)
        } else if contains_any(&label, &markers.possible) {
            Classified::hit(RiskLevel::Possible)
        } else if contains_any(&label, &markers.probable) {
            Classified::hit(RiskLevel::Probable)
        } else {
            Classified::fallback(RiskLevel::Remote)
        }
    }
}

fn has_word_prefix(label: &str, prefixes: &[String]) -> bool {
    label
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| prefixes.iter().any(|p| !p.is_empty() && word.starts_with(p.as_str())))
}

fn fold_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| fold_label(v))
        .filter(|v| !v.is_empty())
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
