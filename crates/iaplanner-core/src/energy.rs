//! Energy and cognitive-load alignment.
//!
//! Classifies how demanding each (subject, phase) pairing is, compares that
//! against the user's weekly energy-level calendar, flags milestones
//! scheduled into windows that do not match their demand, and suggests
//! better slots.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Project, Subject};
use crate::phase::Phase;

/// Hour used as the nominal start of a milestone's scheduled work, matching
/// the deep-work analyzer's synthetic layout.
const SCHEDULED_ANCHOR_HOUR: u8 = 9;

/// Maximum alternative slots suggested per mismatch.
const MAX_SUGGESTIONS: usize = 3;

/// Energy level of a time window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Cognitive demand of a (subject, phase) pairing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

impl fmt::Display for CognitiveLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CognitiveLoad::Low => "low",
            CognitiveLoad::Medium => "medium",
            CognitiveLoad::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Cognitive load for a (subject, phase) pairing.
///
/// Fixed classification table, not learned from data: analytically heavy
/// subjects make research and drafting high-load; polish work is low-load
/// everywhere.
pub fn cognitive_load(subject: Subject, phase: Phase) -> CognitiveLoad {
    use CognitiveLoad::*;
    let analytical = matches!(
        subject,
        Subject::Math | Subject::Physics | Subject::Chemistry
    );
    match phase {
        Phase::Polish => Low,
        Phase::Research | Phase::Draft if analytical => High,
        Phase::Revision if matches!(subject, Subject::Math | Subject::Physics) => High,
        Phase::Outline if matches!(subject, Subject::English | Subject::Biology) => Low,
        _ => Medium,
    }
}

/// One energy-tagged window on one weekday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnergyWindow {
    /// Day of week (0=Sunday .. 6=Saturday)
    pub day_of_week: u8,
    pub start_hour: u8,
    pub end_hour: u8,
    pub level: EnergyLevel,
}

/// The user's weekly energy-level calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergySettings {
    pub windows: Vec<EnergyWindow>,
}

impl Default for EnergySettings {
    fn default() -> Self {
        let mut windows = Vec::with_capacity(7 * 5);
        for day in 0..7 {
            windows.push(window(day, 6, 9, EnergyLevel::Medium));
            windows.push(window(day, 9, 12, EnergyLevel::High));
            windows.push(window(day, 12, 14, EnergyLevel::Low));
            windows.push(window(day, 14, 18, EnergyLevel::Medium));
            windows.push(window(day, 18, 21, EnergyLevel::Low));
        }
        Self { windows }
    }
}

fn window(day_of_week: u8, start_hour: u8, end_hour: u8, level: EnergyLevel) -> EnergyWindow {
    EnergyWindow {
        day_of_week,
        start_hour,
        end_hour,
        level,
    }
}

impl EnergySettings {
    /// Energy level at a given weekday and hour. Hours outside every
    /// configured window count as low energy.
    pub fn level_at(&self, day_of_week: u8, hour: u8) -> EnergyLevel {
        self.windows
            .iter()
            .find(|w| w.day_of_week == day_of_week && w.start_hour <= hour && hour < w.end_hour)
            .map(|w| w.level)
            .unwrap_or(EnergyLevel::Low)
    }

    /// All windows of a given level, in weekly order.
    pub fn windows_at_level(&self, level: EnergyLevel) -> Vec<EnergyWindow> {
        self.windows
            .iter()
            .filter(|w| w.level == level)
            .copied()
            .collect()
    }
}

/// Direction of an energy mismatch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// High-load work scheduled into a window without the energy for it
    OverloadedWindow,
    /// Low-load work occupying a high-energy window
    WastedPeak,
}

/// A milestone scheduled into an unsuitable energy window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyMismatch {
    pub milestone_id: String,
    pub milestone_name: String,
    pub kind: MismatchKind,
    pub load: CognitiveLoad,
    pub window_level: EnergyLevel,
    /// Estimated productivity impact, percent
    pub impact_percent: f64,
    /// Better slots whose energy level matches the task's demand
    pub suggestions: Vec<EnergyWindow>,
}

/// Weekly aggregate of energy alignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyEnergyReport {
    pub matched_count: usize,
    pub mismatched_count: usize,
    /// 0-100; 100 when nothing is scheduled
    pub alignment_score: f64,
    /// Low-load tasks sitting in high-energy windows
    pub wasted_high_energy_count: usize,
    pub mismatches: Vec<EnergyMismatch>,
}

/// Detect milestones whose cognitive load does not fit the energy level of
/// their scheduled window.
///
/// A milestone's scheduled window is the one containing the 09:00 anchor on
/// its start-date weekday. Only incomplete milestones that have not already
/// passed their deadline (relative to `today`) are considered.
pub fn detect_energy_mismatches(
    projects: &[Project],
    settings: &EnergySettings,
    today: NaiveDate,
) -> Vec<EnergyMismatch> {
    let mut mismatches = Vec::new();
    for project in projects {
        for milestone in &project.milestones {
            if milestone.completed || milestone.deadline < today {
                continue;
            }
            let load = cognitive_load(project.subject, milestone.effective_phase());
            let day_of_week = milestone.start_date.weekday().num_days_from_sunday() as u8;
            let level = settings.level_at(day_of_week, SCHEDULED_ANCHOR_HOUR);

            let (kind, impact) = match (load, level) {
                (CognitiveLoad::High, EnergyLevel::Low) => (MismatchKind::OverloadedWindow, 30.0),
                (CognitiveLoad::High, EnergyLevel::Medium) => {
                    (MismatchKind::OverloadedWindow, 15.0)
                }
                (CognitiveLoad::Low, EnergyLevel::High) => (MismatchKind::WastedPeak, 10.0),
                _ => continue,
            };

            let desired = match kind {
                MismatchKind::OverloadedWindow => EnergyLevel::High,
                MismatchKind::WastedPeak => EnergyLevel::Low,
            };
            let suggestions = settings
                .windows_at_level(desired)
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .collect();

            mismatches.push(EnergyMismatch {
                milestone_id: milestone.id.clone(),
                milestone_name: milestone.name.clone(),
                kind,
                load,
                window_level: level,
                impact_percent: impact,
                suggestions,
            });
        }
    }
    mismatches
}

/// Aggregate weekly energy alignment across all upcoming milestones.
pub fn analyze_weekly_energy(
    projects: &[Project],
    settings: &EnergySettings,
    today: NaiveDate,
) -> WeeklyEnergyReport {
    let mismatches = detect_energy_mismatches(projects, settings, today);
    let total: usize = projects
        .iter()
        .flat_map(|p| p.milestones.iter())
        .filter(|m| !m.completed && m.deadline >= today)
        .count();
    let mismatched_count = mismatches.len();
    let matched_count = total - mismatched_count;
    let alignment_score = if total == 0 {
        100.0
    } else {
        (matched_count as f64 / total as f64 * 100.0).round()
    };
    let wasted_high_energy_count = mismatches
        .iter()
        .filter(|m| m.kind == MismatchKind::WastedPeak)
        .count();

    WeeklyEnergyReport {
        matched_count,
        mismatched_count,
        alignment_score,
        wasted_high_energy_count,
        mismatches,
    }
}
