//! End-to-end flow: learn multipliers, surface warnings, apply a fix, then
//! cascade a reschedule -- the loop the application shell drives.

use chrono::{Duration, NaiveDate};

use iaplanner_core::{
    adjust_estimate, apply_fix, check_feasibility, compute_multipliers, generate_warnings,
    reschedule_after_completion, Milestone, MultiplierSource, PlannerState, Project, Subject,
    WarningKind, WarningSeverity,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn completed(project_id: &str, name: &str, estimated: f64, actual: f64) -> Milestone {
    let mut m = Milestone::new(
        project_id,
        name,
        date(2024, 11, 1),
        date(2024, 11, 10),
        estimated,
    )
    .unwrap();
    m.completed = true;
    m.actual_hours = Some(actual);
    m
}

fn build_state() -> PlannerState {
    let today = date(2025, 1, 6);
    let mut state = PlannerState::new(today + Duration::days(14), 5.0);

    // Math IA: a history of drafts running 50% over, plus remaining work.
    let mut math = Project::new("Math IA", Subject::Math);
    let id = math.id.clone();
    math.milestones.push(completed(&id, "Draft section 1", 4.0, 6.0));
    math.milestones.push(completed(&id, "Draft section 2", 4.0, 6.0));
    math.milestones.push(completed(&id, "Draft section 3", 4.0, 6.0));
    math.milestones.push(
        Milestone::new(&id, "Write conclusion draft", today, date(2025, 1, 12), 40.0).unwrap(),
    );
    math.milestones.push(
        Milestone::new(&id, "Revise full paper", date(2025, 1, 13), date(2025, 1, 18), 40.0)
            .unwrap(),
    );
    state.projects.push(math);

    // Physics IA: untouched, far out.
    let mut physics = Project::new("Physics IA", Subject::Physics);
    let pid = physics.id.clone();
    physics.milestones.push(
        Milestone::new(&pid, "Research data", date(2025, 1, 8), date(2025, 1, 14), 20.0).unwrap(),
    );
    state.projects.push(physics);

    state
}

#[test]
fn learned_multipliers_flow_into_estimates() {
    let state = build_state();
    let multipliers = compute_multipliers(&state.projects);

    // Three draft samples at ratio 1.5 clear the confidence gate.
    let target = &state.projects[0].milestones[3];
    let adjusted = adjust_estimate(target, Subject::Math, &multipliers);
    assert!(matches!(adjusted.source, MultiplierSource::Phase(_)));
    assert!((adjusted.applied_multiplier - 1.5).abs() < 1e-9);
    assert!((adjusted.adjusted_hours - 60.0).abs() < 1e-9);
}

#[test]
fn infeasible_schedule_warns_and_fix_resolves_it() {
    let state = build_state();
    let today = date(2025, 1, 6);

    // 100h remaining vs 5h/week over 2 weeks.
    let feasibility = check_feasibility(&state, today);
    assert!(!feasibility.feasible);
    assert_eq!(feasibility.shortfall_hours, 90.0);

    let warnings = generate_warnings(&state, today);
    let critical = warnings
        .iter()
        .find(|w| w.kind == WarningKind::ImpossibleSchedule)
        .expect("infeasible schedule must warn");
    assert_eq!(critical.severity, WarningSeverity::Critical);

    // Apply the recommended fix (extend the master deadline).
    let fix = critical
        .fixes
        .iter()
        .find(|f| f.recommended)
        .expect("a recommended fix is always offered");
    let applied = apply_fix(&state, fix);
    assert!(applied.result.success);

    // The original snapshot is untouched, the new one is feasible.
    assert!(!check_feasibility(&state, today).feasible);
    assert!(check_feasibility(&applied.state, today).feasible);
}

#[test]
fn early_completion_cascades_through_the_project() {
    let state = build_state();
    let math = &state.projects[0];
    let draft_id = math.milestones[3].id.clone();

    // The conclusion draft (due Jan 12) finishes on Jan 9, 3 days early.
    let outcome =
        reschedule_after_completion(math, &draft_id, state.master_deadline, date(2025, 1, 9));
    assert!(outcome.changed);
    assert_eq!(outcome.day_delta, 3);
    assert_eq!(outcome.shifted_count, 1);

    // The revision milestone moves 3 days forward; history is untouched.
    assert_eq!(outcome.milestones[4].start_date, date(2025, 1, 10));
    assert_eq!(outcome.milestones[4].deadline, date(2025, 1, 15));
    assert_eq!(outcome.milestones[0], math.milestones[0]);
    assert!(!outcome.deadline_at_risk);
}
