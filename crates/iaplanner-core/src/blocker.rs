//! Reactive blocker log with automatic escalation.
//!
//! Blockers are logged when progress is actually stuck. Time-based rules
//! move them from active to stale and on to escalated; resolution is the
//! terminal state and records the real delay plus lessons learned.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of a blocker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockerCategory {
    /// Waiting on another person or institution
    Waiting,
    Technical,
    Resource,
    Knowledge,
    External,
}

/// Severity of a blocker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum BlockerSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// Lifecycle status of a blocker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockerStatus {
    Active,
    /// No movement past the staleness threshold
    Stale,
    /// Old enough (or severe enough) to demand attention
    Escalated,
    /// Terminal
    Resolved,
}

/// Time thresholds for automatic blocker transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockerSettings {
    pub stale_after_days: i64,
    pub escalate_after_days: i64,
    /// Critical blockers escalate on this shorter fuse
    pub critical_escalate_after_days: i64,
}

impl Default for BlockerSettings {
    fn default() -> Self {
        Self {
            stale_after_days: 3,
            escalate_after_days: 7,
            critical_escalate_after_days: 2,
        }
    }
}

/// A logged obstacle blocking progress on a milestone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blocker {
    pub id: String,
    pub project_id: String,
    pub milestone_id: String,
    pub title: String,
    pub description: String,
    pub category: BlockerCategory,
    pub severity: BlockerSeverity,
    pub status: BlockerStatus,
    pub created_at: DateTime<Utc>,
    /// Expected schedule slip while blocked
    pub estimated_delay_days: u32,
    /// Real slip, set on resolution and authoritative from then on
    pub actual_delay_days: Option<u32>,
    pub expected_resolution_date: Option<NaiveDate>,
    /// Who or what the blocker is waiting on
    pub waiting_on: Option<String>,
    pub resolution_notes: Option<String>,
    pub lessons_learned: Option<String>,
    pub workaround: Option<String>,
}

impl Blocker {
    /// Log a new active blocker.
    pub fn log(
        project_id: impl Into<String>,
        milestone_id: impl Into<String>,
        title: impl Into<String>,
        category: BlockerCategory,
        severity: BlockerSeverity,
        estimated_delay_days: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title".to_string()));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            project_id: project_id.into(),
            milestone_id: milestone_id.into(),
            title,
            description: String::new(),
            category,
            severity,
            status: BlockerStatus::Active,
            created_at,
            estimated_delay_days,
            actual_delay_days: None,
            expected_resolution_date: None,
            waiting_on: None,
            resolution_notes: None,
            lessons_learned: None,
            workaround: None,
        })
    }

    /// Age of the blocker in whole days at `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }
}

/// Details recorded when a blocker is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlockerResolution {
    pub actual_delay_days: u32,
    pub resolution_notes: Option<String>,
    pub lessons_learned: Option<String>,
    pub workaround: Option<String>,
}

/// Outcome of a blocker operation: new collection plus a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockerUpdate {
    pub blockers: Vec<Blocker>,
    pub changed: bool,
    pub message: String,
}

/// Resolve a blocker, recording the actual delay and any notes.
///
/// A missing id or an already-resolved blocker leaves the collection
/// unchanged and says so in the message.
pub fn resolve_blocker(
    blockers: &[Blocker],
    blocker_id: &str,
    resolution: BlockerResolution,
) -> BlockerUpdate {
    let Some(index) = blockers.iter().position(|b| b.id == blocker_id) else {
        return BlockerUpdate {
            blockers: blockers.to_vec(),
            changed: false,
            message: format!("Blocker {blocker_id} not found; nothing changed."),
        };
    };
    if blockers[index].status == BlockerStatus::Resolved {
        return BlockerUpdate {
            blockers: blockers.to_vec(),
            changed: false,
            message: format!("Blocker '{}' is already resolved.", blockers[index].title),
        };
    }
    let mut updated = blockers.to_vec();
    let blocker = &mut updated[index];
    blocker.status = BlockerStatus::Resolved;
    blocker.actual_delay_days = Some(resolution.actual_delay_days);
    blocker.resolution_notes = resolution.resolution_notes;
    blocker.lessons_learned = resolution.lessons_learned;
    blocker.workaround = resolution.workaround;
    let title = blocker.title.clone();
    BlockerUpdate {
        blockers: updated,
        changed: true,
        message: format!(
            "Resolved '{title}' after {} day(s) of delay.",
            resolution.actual_delay_days
        ),
    }
}

/// Apply the time-based staleness and escalation rules.
///
/// Active blockers go stale after `stale_after_days`; active or stale
/// blockers escalate after `escalate_after_days` (critical ones after the
/// shorter `critical_escalate_after_days`). Resolved and already-escalated
/// blockers are untouched.
pub fn process_auto_escalation(
    blockers: &[Blocker],
    settings: &BlockerSettings,
    now: DateTime<Utc>,
) -> BlockerUpdate {
    let mut transitions = Vec::new();
    let updated: Vec<Blocker> = blockers
        .iter()
        .map(|blocker| {
            if matches!(
                blocker.status,
                BlockerStatus::Resolved | BlockerStatus::Escalated
            ) {
                return blocker.clone();
            }
            let age = blocker.age_days(now);
            let escalate_after = if blocker.severity == BlockerSeverity::Critical {
                settings.critical_escalate_after_days
            } else {
                settings.escalate_after_days
            };
            let mut next = blocker.clone();
            if age >= escalate_after {
                next.status = BlockerStatus::Escalated;
                transitions.push(format!("'{}' escalated after {age} day(s)", next.title));
            } else if blocker.status == BlockerStatus::Active && age >= settings.stale_after_days {
                next.status = BlockerStatus::Stale;
                transitions.push(format!("'{}' went stale after {age} day(s)", next.title));
            }
            next
        })
        .collect();

    let changed = !transitions.is_empty();
    let message = if changed {
        transitions.join("; ")
    } else {
        "No blockers needed escalation.".to_string()
    };
    BlockerUpdate {
        blockers: updated,
        changed,
        message,
    }
}
