//! Timeline rescheduling.
//!
//! Recomputes downstream milestone dates within one project after a
//! completion lands early or late, or after a deadline is edited by hand,
//! and resolves draft-phase overlaps between projects. All operations are
//! map-and-replace over immutable milestone records; the caller's input is
//! never mutated.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{Milestone, Project};

/// Result of a within-project reschedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RescheduleOutcome {
    /// The project's new milestone list (unchanged on no-op)
    pub milestones: Vec<Milestone>,
    pub changed: bool,
    /// Milestones whose dates moved
    pub shifted_count: usize,
    /// Signed shift applied, in days (positive = moved earlier)
    pub day_delta: i64,
    /// True when the last remaining milestone now lands past the master
    /// deadline
    pub deadline_at_risk: bool,
    pub message: String,
}

impl RescheduleOutcome {
    fn noop(project: &Project, message: String) -> Self {
        Self {
            milestones: project.milestones.clone(),
            changed: false,
            shifted_count: 0,
            day_delta: 0,
            deadline_at_risk: false,
            message,
        }
    }
}

/// Shift a milestone's dates by a signed number of days, returning a new
/// record.
fn shift_milestone(milestone: &Milestone, days: i64) -> Milestone {
    let mut shifted = milestone.clone();
    shifted.start_date += Duration::days(days);
    shifted.deadline += Duration::days(days);
    shifted
}

fn last_remaining_deadline(milestones: &[Milestone]) -> Option<NaiveDate> {
    milestones
        .iter()
        .filter(|m| !m.completed)
        .map(|m| m.deadline)
        .max()
}

fn at_risk(milestones: &[Milestone], master_deadline: NaiveDate) -> bool {
    last_remaining_deadline(milestones)
        .map(|d| d > master_deadline)
        .unwrap_or(false)
}

/// Reschedule downstream milestones after one completes early or late.
///
/// The signed delta is the completed milestone's original deadline minus
/// `today`. Early completion (positive delta) pulls every later incomplete
/// milestone earlier by that many days; late completion pushes them later.
/// On-time completion changes nothing. The chain is strictly linear within
/// the project; other projects are never touched.
pub fn reschedule_after_completion(
    project: &Project,
    milestone_id: &str,
    master_deadline: NaiveDate,
    today: NaiveDate,
) -> RescheduleOutcome {
    let Some(index) = project.milestones.iter().position(|m| m.id == milestone_id) else {
        return RescheduleOutcome::noop(
            project,
            format!("Milestone {milestone_id} not found in '{}'; nothing changed.", project.name),
        );
    };

    let completed = &project.milestones[index];
    let delta = (completed.deadline - today).num_days();
    if delta == 0 {
        return RescheduleOutcome::noop(
            project,
            format!("'{}' finished right on schedule; no dates moved.", completed.name),
        );
    }

    let mut shifted_count = 0;
    let milestones: Vec<Milestone> = project
        .milestones
        .iter()
        .enumerate()
        .map(|(i, m)| {
            if i > index && !m.completed {
                shifted_count += 1;
                // Early finish (delta > 0) moves dates earlier
                shift_milestone(m, -delta)
            } else {
                m.clone()
            }
        })
        .collect();

    let deadline_at_risk = at_risk(&milestones, master_deadline);
    let direction = if delta > 0 { "earlier" } else { "later" };
    let message = format!(
        "'{}' finished {} day(s) {}; moved {shifted_count} milestone(s) {direction}.",
        completed.name,
        delta.abs(),
        if delta > 0 { "early" } else { "late" },
    );

    RescheduleOutcome {
        milestones,
        changed: shifted_count > 0,
        shifted_count,
        day_delta: delta,
        deadline_at_risk,
        message,
    }
}

/// Reschedule after a milestone's deadline is manually edited.
///
/// Milestones before the target are never touched. The target and every
/// milestone after it (in list order) shift by the edit's day delta.
pub fn reschedule_after_deadline_change(
    project: &Project,
    milestone_id: &str,
    new_deadline: NaiveDate,
    master_deadline: NaiveDate,
) -> RescheduleOutcome {
    let Some(index) = project.milestones.iter().position(|m| m.id == milestone_id) else {
        return RescheduleOutcome::noop(
            project,
            format!("Milestone {milestone_id} not found in '{}'; nothing changed.", project.name),
        );
    };

    let target = &project.milestones[index];
    let delta = (new_deadline - target.deadline).num_days();
    if delta == 0 {
        return RescheduleOutcome::noop(
            project,
            format!("'{}' already ends on {new_deadline}; no dates moved.", target.name),
        );
    }

    let mut shifted_count = 0;
    let milestones: Vec<Milestone> = project
        .milestones
        .iter()
        .enumerate()
        .map(|(i, m)| {
            if i >= index {
                shifted_count += 1;
                shift_milestone(m, delta)
            } else {
                m.clone()
            }
        })
        .collect();

    let deadline_at_risk = at_risk(&milestones, master_deadline);
    let message = format!(
        "Moved '{}' and {} downstream milestone(s) by {} day(s).",
        target.name,
        shifted_count - 1,
        delta,
    );

    RescheduleOutcome {
        milestones,
        changed: true,
        shifted_count,
        day_delta: delta,
        deadline_at_risk,
        message,
    }
}

/// Result of the cross-project draft distribution pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionOutcome {
    pub projects: Vec<Project>,
    pub changed: bool,
    /// Human-readable description of each shift applied
    pub moves: Vec<String>,
    /// True when any milestone now lands past the master deadline
    pub deadline_at_risk: bool,
}

/// Spread draft-phase work out so drafts of different IAs do not overlap.
///
/// Greedy, order-dependent heuristic and explicitly not a solver: drafts
/// are visited in start-date order and each overlap with the immediately
/// preceding draft is pushed out by the overlap plus a one-day buffer,
/// shifting the whole owning project. Earlier shifts are only reflected in
/// the immediate neighbor comparison; the pass is best-effort, not a
/// correctness guarantee.
pub fn optimize_ia_distribution(
    projects: &[Project],
    master_deadline: NaiveDate,
) -> DistributionOutcome {
    // Urgency ordering: projects by next incomplete deadline.
    let mut ordered: Vec<Project> = projects.to_vec();
    ordered.sort_by_key(|p| p.next_deadline().unwrap_or(NaiveDate::MAX));

    // Draft milestones across all projects, by start date.
    let mut draft_refs: Vec<(String, String, NaiveDate)> = ordered
        .iter()
        .flat_map(|p| {
            p.milestones
                .iter()
                .filter(|m| !m.completed && m.name.to_lowercase().contains("draft"))
                .map(|m| (p.id.clone(), m.id.clone(), m.start_date))
        })
        .collect();
    draft_refs.sort_by_key(|(_, _, start)| *start);

    let mut moves = Vec::new();
    for pair_index in 1..draft_refs.len() {
        let (prior_project_id, prior_id, _) = draft_refs[pair_index - 1].clone();
        let (later_project_id, later_id, _) = draft_refs[pair_index].clone();
        if prior_project_id == later_project_id {
            continue;
        }

        let prior_deadline = match find_milestone(&ordered, &prior_id) {
            Some(m) => m.deadline,
            None => continue,
        };
        let later_start = match find_milestone(&ordered, &later_id) {
            Some(m) => m.start_date,
            None => continue,
        };
        if later_start > prior_deadline {
            continue;
        }

        // Push the later project out past the prior draft with a one-day
        // buffer.
        let shift_days = (prior_deadline - later_start).num_days() + 1;
        let (project_name, draft_name) = {
            let project = ordered
                .iter()
                .find(|p| p.id == later_project_id)
                .expect("project id came from this list");
            let draft = project
                .milestones
                .iter()
                .find(|m| m.id == later_id)
                .expect("milestone id came from this list");
            (project.name.clone(), draft.name.clone())
        };
        for project in ordered.iter_mut().filter(|p| p.id == later_project_id) {
            project.milestones = project
                .milestones
                .iter()
                .map(|m| shift_milestone(m, shift_days))
                .collect();
        }
        moves.push(format!(
            "Shifted '{project_name}' by {shift_days} day(s) so '{draft_name}' no longer overlaps another draft.",
        ));
    }

    let deadline_at_risk = ordered.iter().any(|p| {
        p.milestones
            .iter()
            .any(|m| !m.completed && m.deadline > master_deadline)
    });

    DistributionOutcome {
        changed: !moves.is_empty(),
        projects: ordered,
        moves,
        deadline_at_risk,
    }
}

fn find_milestone<'a>(projects: &'a [Project], milestone_id: &str) -> Option<&'a Milestone> {
    projects
        .iter()
        .flat_map(|p| p.milestones.iter())
        .find(|m| m.id == milestone_id)
}
