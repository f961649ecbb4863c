//! # IA Planner Core Library
//!
//! Pure scheduling, estimation, and warning engine for an academic
//! coursework deadline planner. The UI, persistence, calendar sync, and
//! AI milestone generation are external collaborators: they hand this
//! crate a [`PlannerState`] snapshot and get reports or updated
//! collections back. Nothing here performs I/O, reads the clock, or
//! mutates its input.
//!
//! ## Key components
//!
//! - **Phase classifier**: keyword-based inference of a milestone's work
//!   phase from its name
//! - **Learning engine**: actual-vs-estimated multipliers with
//!   confidence-gated estimate adjustment
//! - **Deep-work analyzer**: daily session layouts, context switches,
//!   schedule-quality violations, 0-100 productivity scores
//! - **Energy analyzer**: cognitive load vs the user's weekly energy
//!   calendar
//! - **Warning engine**: severity-ordered warnings, each with concrete
//!   fixes, plus whole-schedule optimization scenarios
//! - **Rescheduler**: downstream date cascades after completions and
//!   deadline edits, and draft-overlap distribution across IAs
//! - **Risks and blockers**: proactive risk scores and reactively logged
//!   blockers with automatic escalation

pub mod blocker;
pub mod deepwork;
pub mod energy;
pub mod error;
pub mod learning;
pub mod model;
pub mod phase;
pub mod reschedule;
pub mod risk;
pub mod warnings;

pub use blocker::{
    process_auto_escalation, resolve_blocker, Blocker, BlockerCategory, BlockerResolution,
    BlockerSettings, BlockerSeverity, BlockerStatus, BlockerUpdate,
};
pub use deepwork::{
    analyze_daily_schedule, analyze_full_schedule, detect_fragmented_milestones,
    detect_minimum_session_violations, DailyScheduleAnalysis, DeepWorkSettings,
    FullScheduleAnalysis, ScheduleViolation, ViolationKind, ViolationSeverity,
};
pub use energy::{
    analyze_weekly_energy, cognitive_load, detect_energy_mismatches, CognitiveLoad,
    EnergyLevel, EnergyMismatch, EnergySettings, WeeklyEnergyReport,
};
pub use error::{CoreError, Result, ValidationError};
pub use learning::{
    adjust_estimate, compute_multipliers, AdjustedEstimate, Confidence, LearnedMultipliers,
    MultiplierSource, MultiplierStats,
};
pub use model::{
    Milestone, PlannerState, Project, ProjectStatus, Subject, WorkSession,
};
pub use phase::{classify_phase, Phase};
pub use reschedule::{
    optimize_ia_distribution, reschedule_after_completion, reschedule_after_deadline_change,
    DistributionOutcome, RescheduleOutcome,
};
pub use risk::{
    avoid_risk, dismiss_risk, materialize_risk, set_mitigation_progress, Risk, RiskCategory,
    RiskStatus, RiskUpdate,
};
pub use warnings::{
    apply_fix, check_feasibility, generate_optimization_scenarios, generate_warnings,
    FixAction, FixApplication, FixResult, GenerationFeasibility, OptimizationScenario,
    ScheduleFix, ScheduleWarning, WarningKind, WarningSeverity,
};
