//! Caseboard domain model
//!
//! Leaf crate of the workspace:
//! - `case`: closed enumerations (company, phase, risk) and `NormalizedCase`
//! - `classify`: the row normalizer mapping free-text labels to enumerations
//! - `case_number`: court-code extraction from judicial case numbers
//! - `courts`: the static court → state/region table
//! - `period`: reference months keying dataset snapshots
//! - `ruling`: judge rulings feeding the favorability view
//!
//! Everything here is pure: no I/O, no logging, no global mutable state.

pub mod case;
pub mod case_number;
pub mod classify;
pub mod courts;
pub mod period;
pub mod ruling;
pub mod text;

pub use case::{CaseId, Company, NormalizedCase, Phase, RiskLevel};
pub use case_number::CourtInfo;
pub use classify::{
    Classification, Classified, Classifier, ClassifierConfig, ConfigError, LabelFields,
};
pub use courts::Court;
pub use period::{ReferenceMonth, ReferenceMonthError};
pub use ruling::{JudgeRuling, RulingOutcome};
pub use text::fold_label;
