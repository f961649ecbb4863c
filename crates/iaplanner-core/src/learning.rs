//! Estimate learning engine.
//!
//! Tracks the ratio of actual to estimated hours across completed milestones,
//! grouped by phase, subject, and overall, and uses the learned multipliers
//! to adjust future estimates with a confidence gate.
//!
//! Multipliers are a pure projection of the full milestone set: they are
//! recomputed on demand rather than maintained incrementally, so there is no
//! cache to invalidate and no drift.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Milestone, Project, Subject, ALL_SUBJECTS};
use crate::phase::{Phase, ALL_PHASES};

/// Samples required before a bucket's multiplier is trusted on its own.
pub const MIN_SAMPLES: u32 = 3;

/// Learned multiplier for one bucket (phase, subject, or overall).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MultiplierStats {
    /// Mean of actual/planned ratios; 1.0 when no samples exist
    pub multiplier: f64,
    pub sample_count: u32,
}

impl Default for MultiplierStats {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            sample_count: 0,
        }
    }
}

/// Learned effort multipliers across all buckets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LearnedMultipliers {
    pub by_phase: HashMap<Phase, MultiplierStats>,
    pub by_subject: HashMap<Subject, MultiplierStats>,
    pub overall: MultiplierStats,
}

impl LearnedMultipliers {
    /// Stats for a phase bucket (default stats when never sampled).
    pub fn phase(&self, phase: Phase) -> MultiplierStats {
        self.by_phase.get(&phase).copied().unwrap_or_default()
    }

    /// Stats for a subject bucket (default stats when never sampled).
    pub fn subject(&self, subject: Subject) -> MultiplierStats {
        self.by_subject.get(&subject).copied().unwrap_or_default()
    }
}

/// Where an applied multiplier came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum MultiplierSource {
    /// Phase bucket had enough samples
    Phase(Phase),
    /// Subject bucket had enough samples
    Subject(Subject),
    /// Overall bucket had enough samples
    Overall,
    /// Overall bucket below the sample threshold; multiplier blended
    /// toward 1.0 in proportion to the sample count
    PartialOverall,
    /// No completed milestones with logged hours anywhere
    NoHistory,
}

impl fmt::Display for MultiplierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiplierSource::Phase(phase) => write!(f, "{phase} phase history"),
            MultiplierSource::Subject(subject) => write!(f, "{subject} history"),
            MultiplierSource::Overall => write!(f, "overall history"),
            MultiplierSource::PartialOverall => write!(f, "overall history (partial confidence)"),
            MultiplierSource::NoHistory => write!(f, "no historical data"),
        }
    }
}

/// Confidence in an adjusted estimate, from the bucket's sample count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    fn from_samples(sample_count: u32) -> Self {
        if sample_count >= 2 * MIN_SAMPLES {
            Confidence::High
        } else if sample_count >= MIN_SAMPLES {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Result of adjusting a milestone's estimate with learned multipliers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdjustedEstimate {
    /// estimated_hours * buffer_multiplier, before learning
    pub original_hours: f64,
    pub adjusted_hours: f64,
    pub applied_multiplier: f64,
    pub source: MultiplierSource,
    pub confidence: Confidence,
    pub sample_count: u32,
}

/// Compute learned multipliers from every completed milestone with logged
/// hours across all projects.
///
/// A milestone contributes only when it is completed, has `actual_hours`
/// set, and its planned hours are positive. Each contributing milestone
/// adds the ratio `actual / planned` to its phase bucket, its subject
/// bucket, and the overall bucket; a bucket's multiplier is the arithmetic
/// mean of its ratios.
pub fn compute_multipliers(projects: &[Project]) -> LearnedMultipliers {
    let mut phase_sums: HashMap<Phase, (f64, u32)> = HashMap::new();
    let mut subject_sums: HashMap<Subject, (f64, u32)> = HashMap::new();
    let mut overall_sum = 0.0_f64;
    let mut overall_count = 0_u32;

    for project in projects {
        for milestone in &project.milestones {
            let Some(ratio) = completion_ratio(milestone) else {
                continue;
            };
            let phase_entry = phase_sums.entry(milestone.effective_phase()).or_default();
            phase_entry.0 += ratio;
            phase_entry.1 += 1;
            let subject_entry = subject_sums.entry(project.subject).or_default();
            subject_entry.0 += ratio;
            subject_entry.1 += 1;
            overall_sum += ratio;
            overall_count += 1;
        }
    }

    let mut multipliers = LearnedMultipliers::default();
    for phase in ALL_PHASES {
        multipliers.by_phase.insert(phase, stats_from(phase_sums.get(&phase)));
    }
    for subject in ALL_SUBJECTS {
        multipliers
            .by_subject
            .insert(subject, stats_from(subject_sums.get(&subject)));
    }
    multipliers.overall = if overall_count > 0 {
        MultiplierStats {
            multiplier: overall_sum / overall_count as f64,
            sample_count: overall_count,
        }
    } else {
        MultiplierStats::default()
    };
    multipliers
}

/// The actual/planned ratio for a milestone, when it qualifies as a sample.
fn completion_ratio(milestone: &Milestone) -> Option<f64> {
    if !milestone.completed {
        return None;
    }
    let actual = milestone.actual_hours?;
    if actual <= 0.0 {
        return None;
    }
    let planned = milestone.planned_hours();
    if planned <= 0.0 {
        return None;
    }
    Some(actual / planned)
}

fn stats_from(sum_count: Option<&(f64, u32)>) -> MultiplierStats {
    match sum_count {
        Some((sum, count)) if *count > 0 => MultiplierStats {
            multiplier: sum / *count as f64,
            sample_count: *count,
        },
        _ => MultiplierStats::default(),
    }
}

/// Adjust a milestone's estimate using learned multipliers.
///
/// Bucket selection priority, each gated by [`MIN_SAMPLES`]: the
/// milestone's phase bucket, then the project's subject bucket, then the
/// overall bucket. When even the overall bucket is below the threshold but
/// has at least one sample, the overall multiplier is blended linearly
/// toward 1.0 by `count / MIN_SAMPLES`. With no history at all the
/// estimate passes through unchanged.
///
/// Pure and deterministic: never mutates `multipliers`, identical inputs
/// give identical output.
pub fn adjust_estimate(
    milestone: &Milestone,
    subject: Subject,
    multipliers: &LearnedMultipliers,
) -> AdjustedEstimate {
    let original_hours = milestone.planned_hours();
    let phase = milestone.effective_phase();

    let phase_stats = multipliers.phase(phase);
    let subject_stats = multipliers.subject(subject);
    let overall = multipliers.overall;

    let (applied_multiplier, source, sample_count) = if phase_stats.sample_count >= MIN_SAMPLES {
        (
            phase_stats.multiplier,
            MultiplierSource::Phase(phase),
            phase_stats.sample_count,
        )
    } else if subject_stats.sample_count >= MIN_SAMPLES {
        (
            subject_stats.multiplier,
            MultiplierSource::Subject(subject),
            subject_stats.sample_count,
        )
    } else if overall.sample_count >= MIN_SAMPLES {
        (overall.multiplier, MultiplierSource::Overall, overall.sample_count)
    } else if overall.sample_count > 0 {
        let weight = overall.sample_count as f64 / MIN_SAMPLES as f64;
        let blended = 1.0 + (overall.multiplier - 1.0) * weight;
        (blended, MultiplierSource::PartialOverall, overall.sample_count)
    } else {
        (1.0, MultiplierSource::NoHistory, 0)
    };

    AdjustedEstimate {
        original_hours,
        adjusted_hours: original_hours * applied_multiplier,
        applied_multiplier,
        source,
        confidence: Confidence::from_samples(sample_count),
        sample_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Project;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed_milestone(name: &str, estimated: f64, actual: f64) -> Milestone {
        let mut m =
            Milestone::new("p", name, date(2025, 1, 1), date(2025, 1, 5), estimated).unwrap();
        m.completed = true;
        m.actual_hours = Some(actual);
        m
    }

    fn project_with(subject: Subject, milestones: Vec<Milestone>) -> Project {
        let mut p = Project::new("IA", subject);
        p.milestones = milestones;
        p
    }

    #[test]
    fn test_no_history_gives_unit_multipliers() {
        let multipliers = compute_multipliers(&[]);
        assert_eq!(multipliers.overall.multiplier, 1.0);
        assert_eq!(multipliers.overall.sample_count, 0);
        for phase in ALL_PHASES {
            assert_eq!(multipliers.phase(phase).multiplier, 1.0);
        }
    }

    #[test]
    fn test_multiplier_is_mean_of_ratios() {
        // Ratios 2.0 and 1.0 -> mean 1.5
        let project = project_with(
            Subject::Math,
            vec![
                completed_milestone("Write draft", 2.0, 4.0),
                completed_milestone("Write draft two", 3.0, 3.0),
            ],
        );
        let multipliers = compute_multipliers(&[project]);
        let draft = multipliers.phase(Phase::Draft);
        assert_eq!(draft.sample_count, 2);
        assert!((draft.multiplier - 1.5).abs() < 1e-9);
        assert!((multipliers.subject(Subject::Math).multiplier - 1.5).abs() < 1e-9);
        assert!((multipliers.overall.multiplier - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_incomplete_and_zero_actual_are_skipped() {
        let mut unfinished = completed_milestone("Write draft", 2.0, 4.0);
        unfinished.completed = false;
        let mut no_hours = completed_milestone("Write draft", 2.0, 4.0);
        no_hours.actual_hours = None;
        let project = project_with(Subject::Math, vec![unfinished, no_hours]);
        let multipliers = compute_multipliers(&[project]);
        assert_eq!(multipliers.overall.sample_count, 0);
    }

    #[test]
    fn test_buffer_multiplier_included_in_planned() {
        let mut m = completed_milestone("Write draft", 2.0, 6.0);
        m.buffer_multiplier = 1.5; // planned = 3.0, ratio = 2.0
        let project = project_with(Subject::Physics, vec![m]);
        let multipliers = compute_multipliers(&[project]);
        assert!((multipliers.overall.multiplier - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_prefers_phase_bucket() {
        let project = project_with(
            Subject::Math,
            vec![
                completed_milestone("Write draft", 2.0, 4.0),
                completed_milestone("Draft body", 2.0, 4.0),
                completed_milestone("Draft conclusion", 2.0, 4.0),
            ],
        );
        let multipliers = compute_multipliers(&[project]);
        let mut target =
            Milestone::new("p", "Draft introduction", date(2025, 2, 1), date(2025, 2, 3), 5.0)
                .unwrap();
        target.phase = Some(Phase::Draft);
        let adjusted = adjust_estimate(&target, Subject::Biology, &multipliers);
        assert_eq!(adjusted.source, MultiplierSource::Phase(Phase::Draft));
        assert_eq!(adjusted.confidence, Confidence::Medium);
        assert!((adjusted.applied_multiplier - 2.0).abs() < 1e-9);
        assert!((adjusted.adjusted_hours - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjust_falls_back_to_subject_then_overall() {
        // Three research samples under Math; a draft milestone in Math
        // should fall through phase (0 draft samples) to subject.
        let project = project_with(
            Subject::Math,
            vec![
                completed_milestone("Research sources", 2.0, 3.0),
                completed_milestone("Research data", 2.0, 3.0),
                completed_milestone("Research reading", 2.0, 3.0),
            ],
        );
        let multipliers = compute_multipliers(&[project]);
        let mut target =
            Milestone::new("p", "Compose section", date(2025, 2, 1), date(2025, 2, 3), 4.0).unwrap();
        target.phase = Some(Phase::Draft);
        let adjusted = adjust_estimate(&target, Subject::Math, &multipliers);
        assert_eq!(adjusted.source, MultiplierSource::Subject(Subject::Math));

        // Same milestone in English falls through to the overall bucket.
        let adjusted = adjust_estimate(&target, Subject::English, &multipliers);
        assert_eq!(adjusted.source, MultiplierSource::Overall);
    }

    #[test]
    fn test_partial_overall_blend() {
        // One completed sample with ratio 2.0; blend weight 1/3:
        // multiplier = 1 + (2 - 1) * 1/3 = 1.333...
        let project = project_with(
            Subject::Math,
            vec![completed_milestone("Research sources", 2.0, 4.0)],
        );
        let multipliers = compute_multipliers(&[project]);
        let mut target =
            Milestone::new("p", "Compose section", date(2025, 2, 1), date(2025, 2, 3), 3.0).unwrap();
        target.phase = Some(Phase::Draft);
        let adjusted = adjust_estimate(&target, Subject::English, &multipliers);
        assert_eq!(adjusted.source, MultiplierSource::PartialOverall);
        assert_eq!(adjusted.confidence, Confidence::Low);
        assert!((adjusted.applied_multiplier - (1.0 + 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_no_history_passes_estimate_through() {
        let multipliers = compute_multipliers(&[]);
        let target =
            Milestone::new("p", "Write draft", date(2025, 2, 1), date(2025, 2, 3), 4.0).unwrap();
        let adjusted = adjust_estimate(&target, Subject::Math, &multipliers);
        assert_eq!(adjusted.source, MultiplierSource::NoHistory);
        assert_eq!(adjusted.adjusted_hours, adjusted.original_hours);
        assert_eq!(adjusted.applied_multiplier, 1.0);
    }

    #[test]
    fn test_high_confidence_at_double_threshold() {
        let milestones: Vec<Milestone> = (0..6)
            .map(|_| completed_milestone("Write draft", 2.0, 3.0))
            .collect();
        let project = project_with(Subject::Math, milestones);
        let multipliers = compute_multipliers(&[project]);
        let mut target =
            Milestone::new("p", "Another one", date(2025, 2, 1), date(2025, 2, 3), 4.0).unwrap();
        target.phase = Some(Phase::Draft);
        let adjusted = adjust_estimate(&target, Subject::Math, &multipliers);
        assert_eq!(adjusted.confidence, Confidence::High);
    }

    proptest! {
        #[test]
        fn prop_overall_multiplier_is_mean(ratios in proptest::collection::vec(0.1_f64..5.0, 1..20)) {
            let milestones: Vec<Milestone> = ratios
                .iter()
                .map(|r| completed_milestone("Write draft", 2.0, 2.0 * r))
                .collect();
            let project = project_with(Subject::Math, milestones);
            let multipliers = compute_multipliers(&[project]);
            let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
            prop_assert!((multipliers.overall.multiplier - mean).abs() < 1e-6);
            prop_assert_eq!(multipliers.overall.sample_count, ratios.len() as u32);
        }

        #[test]
        fn prop_adjust_estimate_is_deterministic(estimated in 0.5_f64..40.0, actual in 0.5_f64..40.0) {
            let project = project_with(
                Subject::Math,
                vec![completed_milestone("Write draft", estimated, actual)],
            );
            let multipliers = compute_multipliers(&[project]);
            let target =
                Milestone::new("p", "Write draft", date(2025, 2, 1), date(2025, 2, 3), estimated)
                    .unwrap();
            let first = adjust_estimate(&target, Subject::Math, &multipliers);
            let second = adjust_estimate(&target, Subject::Math, &multipliers);
            prop_assert_eq!(first, second);
        }
    }
}
