//! Dashboard aggregation for Caseboard.
//!
//! * [`aggregate`] turns one snapshot's normalized cases into the
//!   `fases` / `riscos` / `empresas` / `summary` view.
//! * [`compare`] diffs two independently aggregated views.
//! * [`favorability`] tallies judge rulings per court and per judge.
//!
//! Everything here is pure and deterministic: identical input yields
//! identical output, and empty input is a valid, fully populated view.

pub mod compare;
pub mod display;
pub mod engine;
pub mod favorability;
pub mod views;

pub use compare::{compare, BucketDelta, DashboardDelta, SummaryDelta};
pub use engine::{aggregate, average, percent};
pub use favorability::{
    favorability, favorability_rate, CourtFavorability, FavorabilityView, JudgeFavorability,
    OutcomeTally,
};
pub use views::{
    CompanyPhaseSummary, CompanyTotal, DashboardSummary, DashboardView, PhaseBreakdown,
    PhaseSummary, RiskSummary,
};
