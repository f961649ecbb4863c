//! Proactive risk registry.
//!
//! Risks are identified ahead of time and scored probability x impact on a
//! 1-4 scale each (1-16 combined). High-scoring active risks feed the
//! warning engine; materialized risks record that the feared event actually
//! happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Risk score at or above which a risk surfaces as a schedule warning.
pub const HIGH_RISK_THRESHOLD: u8 = 9;

/// Category of a risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Technical,
    Time,
    Resource,
    External,
    Scope,
}

/// Lifecycle status of a risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    /// Logged, not yet acted on
    Identified,
    /// Mitigation underway
    Mitigating,
    /// The feared event happened
    Materialized,
    /// No longer a concern
    Avoided,
}

/// A proactively identified risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Risk {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RiskCategory,
    /// Likelihood, 1 (unlikely) to 4 (near certain)
    pub probability: u8,
    /// Consequence, 1 (minor) to 4 (severe)
    pub impact: u8,
    pub status: RiskStatus,
    /// 0-100, meaningful only while mitigating
    pub mitigation_progress: Option<u8>,
    pub project_id: Option<String>,
    pub milestone_id: Option<String>,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
}

impl Risk {
    /// Create a new identified risk. Probability and impact clamp to 1-4.
    pub fn new(
        title: impl Into<String>,
        category: RiskCategory,
        probability: u8,
        impact: u8,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title".to_string()));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            category,
            probability: probability.clamp(1, 4),
            impact: impact.clamp(1, 4),
            status: RiskStatus::Identified,
            mitigation_progress: None,
            project_id: None,
            milestone_id: None,
            dismissed: false,
            created_at,
        })
    }

    /// Combined risk score, 1-16.
    pub fn risk_score(&self) -> u8 {
        self.probability * self.impact
    }

    /// Whether this risk should surface as a schedule warning.
    pub fn is_alerting(&self) -> bool {
        !self.dismissed
            && matches!(self.status, RiskStatus::Identified | RiskStatus::Mitigating)
            && self.risk_score() >= HIGH_RISK_THRESHOLD
    }
}

/// Outcome of a registry operation: the new collection plus a message.
///
/// Missing ids never raise; the collection comes back unchanged and the
/// message says why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskUpdate {
    pub risks: Vec<Risk>,
    pub changed: bool,
    pub message: String,
}

fn update_risk(
    risks: &[Risk],
    risk_id: &str,
    describe: &str,
    apply: impl Fn(&mut Risk),
) -> RiskUpdate {
    let Some(index) = risks.iter().position(|r| r.id == risk_id) else {
        return RiskUpdate {
            risks: risks.to_vec(),
            changed: false,
            message: format!("Risk {risk_id} not found; nothing changed."),
        };
    };
    let mut updated = risks.to_vec();
    apply(&mut updated[index]);
    let title = updated[index].title.clone();
    RiskUpdate {
        risks: updated,
        changed: true,
        message: format!("{describe} '{title}'."),
    }
}

/// Mark a risk as materialized: the feared event happened.
pub fn materialize_risk(risks: &[Risk], risk_id: &str) -> RiskUpdate {
    update_risk(risks, risk_id, "Materialized risk", |r| {
        r.status = RiskStatus::Materialized;
        r.mitigation_progress = None;
    })
}

/// Record mitigation progress (clamped to 0-100) and move the risk into
/// the mitigating state.
pub fn set_mitigation_progress(risks: &[Risk], risk_id: &str, progress: u8) -> RiskUpdate {
    update_risk(risks, risk_id, "Updated mitigation progress for", |r| {
        r.status = RiskStatus::Mitigating;
        r.mitigation_progress = Some(progress.min(100));
    })
}

/// Dismiss a risk so it stops alerting.
pub fn dismiss_risk(risks: &[Risk], risk_id: &str) -> RiskUpdate {
    update_risk(risks, risk_id, "Dismissed risk", |r| {
        r.dismissed = true;
    })
}

/// Mark a risk as avoided.
pub fn avoid_risk(risks: &[Risk], risk_id: &str) -> RiskUpdate {
    update_risk(risks, risk_id, "Marked as avoided", |r| {
        r.status = RiskStatus::Avoided;
    })
}
