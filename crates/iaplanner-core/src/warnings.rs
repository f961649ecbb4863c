//! Warning aggregation, fixes, and whole-schedule optimization scenarios.
//!
//! Pulls feasibility checks, deep-work violations, energy mismatches, and
//! blocker/risk alerts into one severity-ordered list of user-facing
//! warnings. Every warning carries two or three concrete fixes; applying a
//! fix is a pure function that returns a modified copy of the state and a
//! success flag, never an error, so the caller can surface failures as
//! non-fatal messages.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::blocker::BlockerStatus;
use crate::deepwork::{
    analyze_full_schedule, AutoFix, ScheduleViolation, ViolationKind, ViolationSeverity,
};
use crate::energy::{detect_energy_mismatches, EnergyMismatch, MismatchKind};
use crate::model::PlannerState;
use crate::reschedule::optimize_ia_distribution;

/// Weekly-hours suggestions above this are considered unrealistic and not
/// surfaced.
const MAX_SUGGESTED_WEEKLY_HOURS: f64 = 20.0;

/// Severity of a user-facing warning; ordering is display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Critical,
    Warning,
    Info,
}

/// What a warning is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ImpossibleSchedule,
    ScheduleQuality,
    EnergyMismatch,
    BlockerAlert,
    RiskAlert,
}

/// How risky applying a fix is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixRisk {
    Low,
    Medium,
    High,
}

/// State mutation a fix performs when applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum FixAction {
    /// Push the master deadline out
    ExtendMasterDeadline { new_deadline: NaiveDate },
    /// Raise the weekly hours budget
    IncreaseWeeklyHours { hours: f64 },
    /// Grow a milestone's scheduled hours (e.g. to a phase minimum)
    ExtendSessionHours { milestone_id: String, hours: f64 },
    /// Collapse a milestone onto a single day
    ConsolidateMilestone {
        milestone_id: String,
        date: NaiveDate,
    },
    /// Move a milestone's deadline (and start, keeping its span)
    ShiftMilestone { milestone_id: String, days: i64 },
    /// Move a milestone's start to the next date on a given weekday
    /// (0=Sunday), keeping its span
    MoveToWeekday { milestone_id: String, day_of_week: u8 },
    /// Scale every incomplete milestone's buffer multiplier down toward 1
    ReduceBuffers { factor: f64 },
    /// Begin mitigating a risk
    StartRiskMitigation { risk_id: String },
    /// Dismiss a risk
    DismissRisk { risk_id: String },
}

/// One concrete remediation offered by a warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleFix {
    pub id: String,
    pub action: FixAction,
    pub label: String,
    pub description: String,
    pub expected_impact: String,
    pub risk: FixRisk,
    pub recommended: bool,
}

impl ScheduleFix {
    fn new(action: FixAction, label: &str, description: String, impact: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            action,
            label: label.to_string(),
            description,
            expected_impact: impact,
            risk: FixRisk::Low,
            recommended: false,
        }
    }

    fn risk(mut self, risk: FixRisk) -> Self {
        self.risk = risk;
        self
    }

    fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }
}

/// A user-facing schedule warning with remediation options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleWarning {
    pub id: String,
    pub kind: WarningKind,
    pub severity: WarningSeverity,
    pub title: String,
    /// One-line human impact summary
    pub impact: String,
    pub description: String,
    pub fixes: Vec<ScheduleFix>,
}

impl ScheduleWarning {
    fn new(
        kind: WarningKind,
        severity: WarningSeverity,
        title: String,
        impact: String,
        description: String,
        fixes: Vec<ScheduleFix>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            severity,
            title,
            impact,
            description,
            fixes,
        }
    }
}

/// Whether the remaining work fits between now and the master deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationFeasibility {
    pub feasible: bool,
    pub hours_needed: f64,
    pub hours_available: f64,
    /// Needed minus available, 0 when feasible
    pub shortfall_hours: f64,
    /// Earliest deadline that would make the schedule work at the current
    /// weekly budget
    pub minimum_feasible_deadline: Option<NaiveDate>,
    /// Weekly budget that would make the current deadline work; omitted
    /// when it would exceed a realistic ceiling
    pub suggested_weekly_hours: Option<f64>,
}

/// Check whether all incomplete work fits before the master deadline.
///
/// Infeasibility is a first-class result for the caller to act on, never
/// an error.
pub fn check_feasibility(state: &PlannerState, today: NaiveDate) -> GenerationFeasibility {
    let hours_needed: f64 = state.projects.iter().map(|p| p.remaining_hours()).sum();
    let days_left = (state.master_deadline - today).num_days().max(0);
    let weeks_left = days_left as f64 / 7.0;
    let hours_available = state.weekly_hours_budget * weeks_left;

    if hours_needed <= hours_available {
        return GenerationFeasibility {
            feasible: true,
            hours_needed,
            hours_available,
            shortfall_hours: 0.0,
            minimum_feasible_deadline: None,
            suggested_weekly_hours: None,
        };
    }

    let minimum_feasible_deadline = if state.weekly_hours_budget > 0.0 {
        let weeks_needed = hours_needed / state.weekly_hours_budget;
        let days_needed = (weeks_needed * 7.0).ceil() as i64;
        Some(today + Duration::days(days_needed))
    } else {
        None
    };
    let suggested_weekly_hours = if weeks_left > 0.0 {
        let suggestion = (hours_needed / weeks_left).ceil();
        (suggestion <= MAX_SUGGESTED_WEEKLY_HOURS).then_some(suggestion)
    } else {
        None
    };

    GenerationFeasibility {
        feasible: false,
        hours_needed,
        hours_available,
        shortfall_hours: hours_needed - hours_available,
        minimum_feasible_deadline,
        suggested_weekly_hours,
    }
}

/// Build the full severity-ordered warning list for a state snapshot.
pub fn generate_warnings(state: &PlannerState, today: NaiveDate) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();

    let feasibility = check_feasibility(state, today);
    if !feasibility.feasible {
        warnings.push(feasibility_warning(state, &feasibility));
    }

    let schedule = analyze_full_schedule(&state.projects, &state.deep_work);
    if state.deep_work.enforce {
        for violation in &schedule.violations {
            warnings.push(violation_warning(violation));
        }
    }

    for mismatch in detect_energy_mismatches(&state.projects, &state.energy, today) {
        warnings.push(mismatch_warning(&mismatch));
    }

    for blocker in &state.blockers {
        if matches!(blocker.status, BlockerStatus::Stale | BlockerStatus::Escalated) {
            warnings.push(blocker_warning(blocker));
        }
    }

    for risk in &state.risks {
        if risk.is_alerting() {
            warnings.push(risk_warning(risk));
        }
    }

    warnings.sort_by_key(|w| w.severity);
    warnings
}

fn feasibility_warning(
    state: &PlannerState,
    feasibility: &GenerationFeasibility,
) -> ScheduleWarning {
    let mut fixes = Vec::new();
    if let Some(deadline) = feasibility.minimum_feasible_deadline {
        fixes.push(
            ScheduleFix::new(
                FixAction::ExtendMasterDeadline { new_deadline: deadline },
                "Extend the deadline",
                format!("Move the master deadline to {deadline}, the earliest date the remaining work fits."),
                format!("Clears the {:.0}h shortfall without working more per week.", feasibility.shortfall_hours),
            )
            .recommended(),
        );
    }
    if let Some(hours) = feasibility.suggested_weekly_hours {
        fixes.push(
            ScheduleFix::new(
                FixAction::IncreaseWeeklyHours { hours },
                "Work more each week",
                format!(
                    "Raise the weekly budget from {:.0}h to {hours:.0}h.",
                    state.weekly_hours_budget
                ),
                "Keeps the current deadline at the cost of heavier weeks.".to_string(),
            )
            .risk(FixRisk::Medium),
        );
    }
    fixes.push(
        ScheduleFix::new(
            FixAction::ReduceBuffers { factor: 0.8 },
            "Trim safety buffers",
            "Scale every remaining milestone's buffer multiplier down by 20%.".to_string(),
            "Reduces planned hours, but leaves less room for overruns.".to_string(),
        )
        .risk(FixRisk::High),
    );

    ScheduleWarning::new(
        WarningKind::ImpossibleSchedule,
        WarningSeverity::Critical,
        "The remaining work does not fit before the deadline".to_string(),
        format!(
            "You need {:.0}h but only have {:.0}h available.",
            feasibility.hours_needed, feasibility.hours_available
        ),
        format!(
            "At {:.0}h per week, {:.0}h of the remaining {:.0}h will not fit before {}.",
            state.weekly_hours_budget,
            feasibility.shortfall_hours,
            feasibility.hours_needed,
            state.master_deadline,
        ),
        fixes,
    )
}

fn violation_warning(violation: &ScheduleViolation) -> ScheduleWarning {
    let severity = match violation.severity {
        ViolationSeverity::Error => WarningSeverity::Warning,
        ViolationSeverity::Warning => WarningSeverity::Info,
    };
    let title = match violation.kind {
        ViolationKind::MinimumSession => "A work session is too short to reach deep focus",
        ViolationKind::ContextSwitch => "Frequent switching between IAs",
        ViolationKind::MaxIasPerDay => "Too many IAs share one day",
        ViolationKind::FragmentedWork => "Work is fragmented",
        ViolationKind::DeepWorkConflict => "Deep work scheduled outside its windows",
    };

    let mut fixes = Vec::new();
    match &violation.auto_fix {
        Some(AutoFix::ExtendSession {
            milestone_id,
            suggested_hours,
        }) => {
            fixes.push(
                ScheduleFix::new(
                    FixAction::ExtendSessionHours {
                        milestone_id: milestone_id.clone(),
                        hours: *suggested_hours,
                    },
                    "Extend the session",
                    format!("Schedule {suggested_hours:.1}h so the session clears the phase minimum."),
                    format!(
                        "Removes a {:.0}% productivity penalty.",
                        violation.productivity_penalty_percent
                    ),
                )
                .recommended(),
            );
        }
        Some(AutoFix::ConsolidateToSingleDay {
            milestone_id,
            suggested_date,
        }) => {
            fixes.push(
                ScheduleFix::new(
                    FixAction::ConsolidateMilestone {
                        milestone_id: milestone_id.clone(),
                        date: *suggested_date,
                    },
                    "Consolidate into one day",
                    format!("Do the whole milestone on {suggested_date} in a single block."),
                    "One uninterrupted block instead of scattered short sessions.".to_string(),
                )
                .recommended(),
            );
        }
        None => {}
    }
    if let Some(milestone_id) = violation.milestone_ids.first() {
        fixes.push(
            ScheduleFix::new(
                FixAction::ShiftMilestone {
                    milestone_id: milestone_id.clone(),
                    days: 1,
                },
                "Move it a day later",
                "Shift the milestone one day to a less crowded slot.".to_string(),
                "May relieve the conflict; downstream dates are unaffected.".to_string(),
            )
            .risk(FixRisk::Medium),
        );
    }

    ScheduleWarning::new(
        WarningKind::ScheduleQuality,
        severity,
        title.to_string(),
        format!(
            "Costs about {:.0}% of the affected day's productivity.",
            violation.productivity_penalty_percent
        ),
        violation.message.clone(),
        fixes,
    )
}

fn mismatch_warning(mismatch: &EnergyMismatch) -> ScheduleWarning {
    let title = match mismatch.kind {
        MismatchKind::OverloadedWindow => "Demanding work lands in a low-energy slot",
        MismatchKind::WastedPeak => "Light work occupies a high-energy slot",
    };
    let mut fixes: Vec<ScheduleFix> = mismatch
        .suggestions
        .iter()
        .take(2)
        .map(|slot| {
            ScheduleFix::new(
                FixAction::MoveToWeekday {
                    milestone_id: mismatch.milestone_id.clone(),
                    day_of_week: slot.day_of_week,
                },
                "Move to a better slot",
                format!(
                    "Reschedule '{}' to a {} energy window ({:02}:00-{:02}:00).",
                    mismatch.milestone_name, slot.level, slot.start_hour, slot.end_hour
                ),
                format!("Recovers up to {:.0}% productivity.", mismatch.impact_percent),
            )
        })
        .collect();
    if let Some(first) = fixes.first_mut() {
        first.recommended = true;
    } else {
        // No matching windows configured; offer pulling the work earlier
        // instead.
        fixes.push(
            ScheduleFix::new(
                FixAction::ShiftMilestone {
                    milestone_id: mismatch.milestone_id.clone(),
                    days: -1,
                },
                "Pull it a day earlier",
                "Move the milestone one day earlier.".to_string(),
                "An earlier weekday may have a better energy profile.".to_string(),
            )
            .risk(FixRisk::Medium)
            .recommended(),
        );
    }
    fixes.push(
        ScheduleFix::new(
            FixAction::ShiftMilestone {
                milestone_id: mismatch.milestone_id.clone(),
                days: 1,
            },
            "Push it back a day",
            "Move the milestone one day later.".to_string(),
            "A different weekday may have a better energy profile.".to_string(),
        )
        .risk(FixRisk::Medium),
    );

    ScheduleWarning::new(
        WarningKind::EnergyMismatch,
        WarningSeverity::Info,
        title.to_string(),
        format!("Estimated {:.0}% productivity impact.", mismatch.impact_percent),
        format!(
            "'{}' is {}-load work scheduled into a {}-energy window.",
            mismatch.milestone_name, mismatch.load, mismatch.window_level
        ),
        fixes,
    )
}

fn blocker_warning(blocker: &crate::blocker::Blocker) -> ScheduleWarning {
    let severity = match blocker.status {
        BlockerStatus::Escalated => WarningSeverity::Critical,
        _ => WarningSeverity::Warning,
    };
    let fixes = vec![
        ScheduleFix::new(
            FixAction::ShiftMilestone {
                milestone_id: blocker.milestone_id.clone(),
                days: blocker.estimated_delay_days as i64,
            },
            "Absorb the delay",
            format!(
                "Push the blocked milestone out by the estimated {} day(s).",
                blocker.estimated_delay_days
            ),
            "The plan reflects reality instead of silently slipping.".to_string(),
        )
        .recommended(),
        ScheduleFix::new(
            FixAction::ReduceBuffers { factor: 0.9 },
            "Claw back buffer time",
            "Trim 10% off remaining buffers to absorb the delay elsewhere.".to_string(),
            "Keeps dates, spends contingency.".to_string(),
        )
        .risk(FixRisk::High),
    ];

    ScheduleWarning::new(
        WarningKind::BlockerAlert,
        severity,
        format!("Blocker needs attention: {}", blocker.title),
        format!("Estimated {} day(s) of delay while unresolved.", blocker.estimated_delay_days),
        blocker
            .waiting_on
            .as_ref()
            .map(|who| format!("Waiting on {who} since {}.", blocker.created_at.date_naive()))
            .unwrap_or_else(|| format!("Unresolved since {}.", blocker.created_at.date_naive())),
        fixes,
    )
}

fn risk_warning(risk: &crate::risk::Risk) -> ScheduleWarning {
    let fixes = vec![
        ScheduleFix::new(
            FixAction::StartRiskMitigation {
                risk_id: risk.id.clone(),
            },
            "Start mitigating",
            format!("Begin working the risk down before it bites: {}.", risk.title),
            "Turns a passive worry into an active plan.".to_string(),
        )
        .recommended(),
        ScheduleFix::new(
            FixAction::DismissRisk {
                risk_id: risk.id.clone(),
            },
            "Dismiss",
            "Accept the risk and stop alerting about it.".to_string(),
            "Less noise, no protection.".to_string(),
        )
        .risk(FixRisk::Medium),
    ];

    ScheduleWarning::new(
        WarningKind::RiskAlert,
        WarningSeverity::Warning,
        format!("High risk: {}", risk.title),
        format!(
            "Score {} of 16 (probability {} x impact {}).",
            risk.risk_score(),
            risk.probability,
            risk.impact
        ),
        risk.description.clone(),
        fixes,
    )
}

/// Result of applying a fix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixResult {
    pub success: bool,
    pub message: String,
}

/// New state plus the per-fix result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixApplication {
    pub state: PlannerState,
    pub result: FixResult,
}

fn failure(state: &PlannerState, message: String) -> FixApplication {
    FixApplication {
        state: state.clone(),
        result: FixResult {
            success: false,
            message,
        },
    }
}

fn success(state: PlannerState, message: String) -> FixApplication {
    FixApplication {
        state,
        result: FixResult {
            success: true,
            message,
        },
    }
}

/// Apply a fix to a state snapshot.
///
/// Pure: returns a modified copy and a result. Expected failures (missing
/// ids, inapplicable actions) come back as `success == false` with the
/// input state unchanged; nothing here panics for domain inputs.
pub fn apply_fix(state: &PlannerState, fix: &ScheduleFix) -> FixApplication {
    match &fix.action {
        FixAction::ExtendMasterDeadline { new_deadline } => {
            if *new_deadline <= state.master_deadline {
                return failure(
                    state,
                    format!(
                        "New deadline {new_deadline} is not after the current {}.",
                        state.master_deadline
                    ),
                );
            }
            let mut next = state.clone();
            next.master_deadline = *new_deadline;
            success(next, format!("Master deadline moved to {new_deadline}."))
        }
        FixAction::IncreaseWeeklyHours { hours } => {
            if !hours.is_finite() || *hours <= state.weekly_hours_budget {
                return failure(
                    state,
                    format!(
                        "{hours:.0}h/week is not an increase over {:.0}h/week.",
                        state.weekly_hours_budget
                    ),
                );
            }
            let mut next = state.clone();
            next.weekly_hours_budget = *hours;
            success(next, format!("Weekly budget raised to {hours:.0}h."))
        }
        FixAction::ExtendSessionHours {
            milestone_id,
            hours,
        } => with_milestone(state, milestone_id, |m| {
            if *hours <= m.planned_hours() {
                return Err(format!(
                    "'{}' already has {:.1}h scheduled.",
                    m.name,
                    m.planned_hours()
                ));
            }
            m.estimated_hours = *hours / m.buffer_multiplier;
            Ok(format!("'{}' extended to {hours:.1}h.", m.name))
        }),
        FixAction::ConsolidateMilestone { milestone_id, date } => {
            with_milestone(state, milestone_id, |m| {
                m.start_date = *date;
                m.deadline = *date;
                Ok(format!("'{}' consolidated onto {date}.", m.name))
            })
        }
        FixAction::ShiftMilestone { milestone_id, days } => {
            with_milestone(state, milestone_id, |m| {
                m.start_date += Duration::days(*days);
                m.deadline += Duration::days(*days);
                Ok(format!("'{}' moved by {days} day(s).", m.name))
            })
        }
        FixAction::MoveToWeekday {
            milestone_id,
            day_of_week,
        } => with_milestone(state, milestone_id, |m| {
            let current = m.start_date.weekday().num_days_from_sunday() as i64;
            let target = (*day_of_week % 7) as i64;
            let mut ahead = (target - current).rem_euclid(7);
            if ahead == 0 {
                ahead = 7;
            }
            m.start_date += Duration::days(ahead);
            m.deadline += Duration::days(ahead);
            Ok(format!("'{}' moved to the next matching weekday.", m.name))
        }),
        FixAction::ReduceBuffers { factor } => {
            if !factor.is_finite() || *factor <= 0.0 || *factor >= 1.0 {
                return failure(state, format!("Buffer factor {factor} must be between 0 and 1."));
            }
            let mut next = state.clone();
            let mut touched = 0;
            for project in &mut next.projects {
                for milestone in &mut project.milestones {
                    if !milestone.completed && milestone.buffer_multiplier > 1.0 {
                        milestone.buffer_multiplier =
                            (milestone.buffer_multiplier * factor).max(1.0);
                        touched += 1;
                    }
                }
            }
            if touched == 0 {
                return failure(state, "No remaining milestones have buffer to trim.".to_string());
            }
            success(next, format!("Trimmed buffers on {touched} milestone(s)."))
        }
        FixAction::StartRiskMitigation { risk_id } => {
            let update = crate::risk::set_mitigation_progress(&state.risks, risk_id, 0);
            if !update.changed {
                return failure(state, update.message);
            }
            let mut next = state.clone();
            next.risks = update.risks;
            success(next, update.message)
        }
        FixAction::DismissRisk { risk_id } => {
            let update = crate::risk::dismiss_risk(&state.risks, risk_id);
            if !update.changed {
                return failure(state, update.message);
            }
            let mut next = state.clone();
            next.risks = update.risks;
            success(next, update.message)
        }
    }
}

/// Clone the state, apply `edit` to the named milestone, and package the
/// outcome. Missing ids and rejected edits fail without changing state.
fn with_milestone(
    state: &PlannerState,
    milestone_id: &str,
    edit: impl Fn(&mut crate::model::Milestone) -> Result<String, String>,
) -> FixApplication {
    let mut next = state.clone();
    for project in &mut next.projects {
        if let Some(milestone) = project.milestones.iter_mut().find(|m| m.id == milestone_id) {
            return match edit(milestone) {
                Ok(message) => success(next, message),
                Err(message) => failure(state, message),
            };
        }
    }
    failure(
        state,
        format!("Milestone {milestone_id} not found; nothing changed."),
    )
}

/// Kind of whole-schedule optimization scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    ExtendDeadline,
    IncreaseWeeklyHours,
    RedistributeDrafts,
}

/// A suggested whole-schedule strategy with its trade-offs. Never applied
/// automatically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationScenario {
    pub id: String,
    pub kind: ScenarioKind,
    pub title: String,
    pub description: String,
    pub trade_offs: Vec<String>,
}

/// Propose whole-schedule strategies for the current state.
pub fn generate_optimization_scenarios(
    state: &PlannerState,
    today: NaiveDate,
) -> Vec<OptimizationScenario> {
    let mut scenarios = Vec::new();
    let feasibility = check_feasibility(state, today);

    if let (false, Some(deadline)) = (
        feasibility.feasible,
        feasibility.minimum_feasible_deadline,
    ) {
        scenarios.push(OptimizationScenario {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ScenarioKind::ExtendDeadline,
            title: format!("Extend the master deadline to {deadline}"),
            description: format!(
                "The earliest date the remaining {:.0}h fits at {:.0}h per week.",
                feasibility.hours_needed, state.weekly_hours_budget
            ),
            trade_offs: vec![
                "Later submission, same weekly workload.".to_string(),
                format!(
                    "Every IA's timeline stretches by up to {} day(s).",
                    (deadline - state.master_deadline).num_days().max(0)
                ),
            ],
        });
    }

    if let (false, Some(hours)) = (feasibility.feasible, feasibility.suggested_weekly_hours) {
        scenarios.push(OptimizationScenario {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ScenarioKind::IncreaseWeeklyHours,
            title: format!("Increase the weekly budget to {hours:.0}h"),
            description: format!(
                "Keeps the {} deadline by working {:.0}h more each week.",
                state.master_deadline,
                hours - state.weekly_hours_budget
            ),
            trade_offs: vec![
                "Current deadline holds.".to_string(),
                "Heavier weeks risk burnout and crowd out coursework.".to_string(),
            ],
        });
    }

    let distribution = optimize_ia_distribution(&state.projects, state.master_deadline);
    if distribution.changed {
        scenarios.push(OptimizationScenario {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ScenarioKind::RedistributeDrafts,
            title: "Spread out overlapping drafts".to_string(),
            description: format!(
                "{} shift(s) would separate drafts currently competing for the same days.",
                distribution.moves.len()
            ),
            trade_offs: {
                let mut t = vec!["One draft at a time instead of parallel drafting.".to_string()];
                if distribution.deadline_at_risk {
                    t.push("Pushes some work past the master deadline.".to_string());
                } else {
                    t.push("All work still finishes before the master deadline.".to_string());
                }
                t
            },
        });
    }

    scenarios
}
