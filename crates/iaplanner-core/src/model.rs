//! Core data model: projects (IAs), milestones, work sessions, and the
//! planner-state snapshot.
//!
//! All entities are owned by a single [`PlannerState`] snapshot passed by
//! value into every engine function. The engine never mutates input in
//! place; operations return new collections and leave persistence and
//! identity management to the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::blocker::{Blocker, BlockerSettings};
use crate::deepwork::DeepWorkSettings;
use crate::energy::EnergySettings;
use crate::error::ValidationError;
use crate::phase::{classify_phase, Phase};
use crate::risk::Risk;

/// Academic subject an IA belongs to. Fixed set of five.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Physics,
    Chemistry,
    Biology,
    English,
}

/// All subjects, for bucket iteration.
pub const ALL_SUBJECTS: [Subject; 5] = [
    Subject::Math,
    Subject::Physics,
    Subject::Chemistry,
    Subject::Biology,
    Subject::English,
];

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Subject::Math => "Math",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::English => "English",
        };
        write!(f, "{name}")
    }
}

/// Derived project status. Recomputed from milestones, never stored
/// authoritatively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

/// A single logged block of work on a milestone. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkSession {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub duration_minutes: f64,
    pub note: Option<String>,
}

impl WorkSession {
    /// Create a work session, validating the duration.
    ///
    /// Durations must be finite and strictly positive; anything else is
    /// rejected before the session can enter the model.
    pub fn new(
        started_at: DateTime<Utc>,
        duration_minutes: f64,
        note: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
            return Err(ValidationError::invalid_value(
                "duration_minutes",
                "must be a positive number of minutes",
            ));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at,
            duration_minutes,
            note,
        })
    }

    /// Session duration in hours.
    pub fn hours(&self) -> f64 {
        self.duration_minutes / 60.0
    }
}

/// A milestone within a project.
///
/// Milestones within a project are ordered; "downstream" means later in
/// that order. Invariant: `start_date <= deadline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    /// Explicit phase override; when absent the phase is inferred from
    /// the milestone name.
    pub phase: Option<Phase>,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    /// Base effort estimate in hours (user- or AI-supplied)
    pub estimated_hours: f64,
    /// Inflates the base estimate; always >= 1
    pub buffer_multiplier: f64,
    pub completed: bool,
    /// Set only on completion
    pub completed_at: Option<DateTime<Utc>>,
    /// Sum of logged work hours; `None` until any work is logged
    pub actual_hours: Option<f64>,
    pub work_sessions: Vec<WorkSession>,
}

impl Milestone {
    /// Create a new milestone, validating the date range and estimate.
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        deadline: NaiveDate,
        estimated_hours: f64,
    ) -> Result<Self, ValidationError> {
        if deadline < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                deadline,
            });
        }
        if !estimated_hours.is_finite() || estimated_hours <= 0.0 {
            return Err(ValidationError::invalid_value(
                "estimated_hours",
                "must be a positive number of hours",
            ));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            name: name.into(),
            description: String::new(),
            phase: None,
            start_date,
            deadline,
            estimated_hours,
            buffer_multiplier: 1.0,
            completed: false,
            completed_at: None,
            actual_hours: None,
            work_sessions: Vec::new(),
        })
    }

    /// Effective phase: the explicit override when present, otherwise
    /// inferred from the milestone name.
    pub fn effective_phase(&self) -> Phase {
        self.phase.unwrap_or_else(|| classify_phase(&self.name))
    }

    /// Scheduled effort in hours (base estimate inflated by the buffer).
    pub fn planned_hours(&self) -> f64 {
        self.estimated_hours * self.buffer_multiplier
    }

    /// Whether the milestone's [start_date, deadline] interval contains
    /// the given date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.deadline
    }

    /// Number of calendar days the milestone spans (inclusive).
    pub fn span_days(&self) -> i64 {
        (self.deadline - self.start_date).num_days() + 1
    }
}

/// A project ("IA"): an ordered sequence of milestones under one subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Kind of assessment (e.g. "exploration", "lab report")
    pub project_type: String,
    pub subject: Subject,
    pub word_count: u32,
    pub milestones: Vec<Milestone>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(name: impl Into<String>, subject: Subject) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            project_type: String::new(),
            subject,
            word_count: 0,
            milestones: Vec::new(),
        }
    }

    /// Derive the project status as of `today`.
    pub fn status(&self, today: NaiveDate) -> ProjectStatus {
        if self.milestones.is_empty() {
            return ProjectStatus::NotStarted;
        }
        if self.milestones.iter().all(|m| m.completed) {
            return ProjectStatus::Completed;
        }
        if self
            .milestones
            .iter()
            .any(|m| !m.completed && m.deadline < today)
        {
            return ProjectStatus::Overdue;
        }
        let started = self
            .milestones
            .iter()
            .any(|m| m.completed || m.actual_hours.unwrap_or(0.0) > 0.0);
        if started {
            ProjectStatus::InProgress
        } else {
            ProjectStatus::NotStarted
        }
    }

    /// Earliest deadline among incomplete milestones, if any remain.
    pub fn next_deadline(&self) -> Option<NaiveDate> {
        self.milestones
            .iter()
            .filter(|m| !m.completed)
            .map(|m| m.deadline)
            .min()
    }

    /// Total planned hours across incomplete milestones.
    pub fn remaining_hours(&self) -> f64 {
        self.milestones
            .iter()
            .filter(|m| !m.completed)
            .map(|m| m.planned_hours())
            .sum()
    }
}

/// The single in-memory snapshot the engine operates on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerState {
    pub projects: Vec<Project>,
    /// Final submission deadline across all IAs
    pub master_deadline: NaiveDate,
    /// Hours per week the user plans to spend
    pub weekly_hours_budget: f64,
    pub deep_work: DeepWorkSettings,
    pub energy: EnergySettings,
    pub risks: Vec<Risk>,
    pub blockers: Vec<Blocker>,
    pub blocker_settings: BlockerSettings,
}

impl PlannerState {
    /// Create a state with default settings and no projects.
    pub fn new(master_deadline: NaiveDate, weekly_hours_budget: f64) -> Self {
        Self {
            projects: Vec::new(),
            master_deadline,
            weekly_hours_budget,
            deep_work: DeepWorkSettings::default(),
            energy: EnergySettings::default(),
            risks: Vec::new(),
            blockers: Vec::new(),
            blocker_settings: BlockerSettings::default(),
        }
    }

    /// All milestones across all projects, in project order.
    pub fn all_milestones(&self) -> Vec<&Milestone> {
        self.projects
            .iter()
            .flat_map(|p| p.milestones.iter())
            .collect()
    }

    /// Look up a project by id.
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Look up a milestone by id across all projects.
    pub fn milestone(&self, milestone_id: &str) -> Option<&Milestone> {
        self.projects
            .iter()
            .flat_map(|p| p.milestones.iter())
            .find(|m| m.id == milestone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn milestone(name: &str, start: NaiveDate, deadline: NaiveDate) -> Milestone {
        Milestone::new("p1", name, start, deadline, 2.0).unwrap()
    }

    #[test]
    fn test_work_session_rejects_bad_duration() {
        assert!(WorkSession::new(Utc::now(), 0.0, None).is_err());
        assert!(WorkSession::new(Utc::now(), -5.0, None).is_err());
        assert!(WorkSession::new(Utc::now(), f64::NAN, None).is_err());
        assert!(WorkSession::new(Utc::now(), 25.0, None).is_ok());
    }

    #[test]
    fn test_milestone_rejects_inverted_dates() {
        let err = Milestone::new("p1", "Draft", date(2025, 1, 10), date(2025, 1, 5), 2.0);
        assert!(err.is_err());
    }

    #[test]
    fn test_milestone_planned_hours() {
        let mut m = milestone("Write draft", date(2025, 1, 1), date(2025, 1, 3));
        m.buffer_multiplier = 1.5;
        assert!((m.planned_hours() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_phase_override_wins() {
        let mut m = milestone("Write draft", date(2025, 1, 1), date(2025, 1, 3));
        assert_eq!(m.effective_phase(), Phase::Draft);
        m.phase = Some(Phase::Polish);
        assert_eq!(m.effective_phase(), Phase::Polish);
    }

    #[test]
    fn test_is_active_on_inclusive_bounds() {
        let m = milestone("Draft", date(2025, 1, 2), date(2025, 1, 4));
        assert!(!m.is_active_on(date(2025, 1, 1)));
        assert!(m.is_active_on(date(2025, 1, 2)));
        assert!(m.is_active_on(date(2025, 1, 4)));
        assert!(!m.is_active_on(date(2025, 1, 5)));
    }

    #[test]
    fn test_span_days_single_day_is_one() {
        let m = milestone("Draft", date(2025, 1, 2), date(2025, 1, 2));
        assert_eq!(m.span_days(), 1);
    }

    #[test]
    fn test_project_status_derivation() {
        let today = date(2025, 2, 1);
        let mut project = Project::new("Math IA", Subject::Math);
        assert_eq!(project.status(today), ProjectStatus::NotStarted);

        let mut m1 = milestone("Research", date(2025, 2, 1), date(2025, 2, 5));
        m1.project_id = project.id.clone();
        project.milestones.push(m1);
        assert_eq!(project.status(today), ProjectStatus::NotStarted);

        project.milestones[0].actual_hours = Some(1.5);
        assert_eq!(project.status(today), ProjectStatus::InProgress);

        project.milestones[0].completed = true;
        assert_eq!(project.status(today), ProjectStatus::Completed);

        let mut late = milestone("Draft", date(2025, 1, 1), date(2025, 1, 15));
        late.project_id = project.id.clone();
        project.milestones.push(late);
        assert_eq!(project.status(today), ProjectStatus::Overdue);
    }

    #[test]
    fn test_next_deadline_skips_completed() {
        let mut project = Project::new("Physics IA", Subject::Physics);
        let mut done = milestone("Research", date(2025, 1, 1), date(2025, 1, 5));
        done.completed = true;
        project.milestones.push(done);
        project
            .milestones
            .push(milestone("Draft", date(2025, 1, 6), date(2025, 1, 12)));
        assert_eq!(project.next_deadline(), Some(date(2025, 1, 12)));
    }
}
