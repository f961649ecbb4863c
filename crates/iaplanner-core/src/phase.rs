//! Work phase classification.
//!
//! Milestone names are free text; this module infers which of the five
//! canonical work phases a milestone belongs to by keyword matching. An
//! explicit `phase` field on a milestone always overrides the inference --
//! the classifier is only a fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical work phase of a milestone.
///
/// Ordering matters: classification tries each phase's keyword list in this
/// order and the first match wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Gathering sources, reading, collecting data
    Research,
    /// Planning and structuring the work
    Outline,
    /// Producing the first full text
    Draft,
    /// Reworking content after feedback
    Revision,
    /// Final formatting, citations, proofreading
    Polish,
}

/// All phases in classification priority order.
pub const ALL_PHASES: [Phase; 5] = [
    Phase::Research,
    Phase::Outline,
    Phase::Draft,
    Phase::Revision,
    Phase::Polish,
];

impl Phase {
    /// Keywords that map a milestone name to this phase.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Phase::Research => &[
                "research",
                "source",
                "literature",
                "read",
                "investigate",
                "gather",
                "experiment",
                "data",
            ],
            Phase::Outline => &["outline", "plan", "structure", "organize", "skeleton"],
            Phase::Draft => &["draft", "write", "writing", "compose"],
            Phase::Revision => &["revis", "rewrite", "edit", "feedback", "improve"],
            Phase::Polish => &["polish", "final", "proofread", "format", "citation", "submit"],
        }
    }

    /// Whether this phase qualifies for deep-work scheduling rules.
    ///
    /// Polish work (formatting, citations) is shallow and exempt from
    /// minimum-session and fragmentation checks.
    pub fn is_deep_work(&self) -> bool {
        !matches!(self, Phase::Polish)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Research => "research",
            Phase::Outline => "outline",
            Phase::Draft => "draft",
            Phase::Revision => "revision",
            Phase::Polish => "polish",
        };
        write!(f, "{name}")
    }
}

/// Classify a milestone name into a work phase.
///
/// Case-insensitive substring match against each phase's keyword list, in
/// priority order (research, outline, draft, revision, polish). Names that
/// match nothing default to [`Phase::Draft`].
pub fn classify_phase(name: &str) -> Phase {
    let lowered = name.to_lowercase();
    for phase in ALL_PHASES {
        if phase.keywords().iter().any(|kw| lowered.contains(kw)) {
            return phase;
        }
    }
    Phase::Draft
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_phase() {
        assert_eq!(classify_phase("Gather sources"), Phase::Research);
        assert_eq!(classify_phase("Outline argument"), Phase::Outline);
        assert_eq!(classify_phase("Write first draft"), Phase::Draft);
        assert_eq!(classify_phase("Revise after feedback"), Phase::Revision);
        assert_eq!(classify_phase("Final formatting"), Phase::Polish);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_phase("RESEARCH NOTES"), Phase::Research);
        assert_eq!(classify_phase("ProofRead everything"), Phase::Polish);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // "read" (research) beats "draft" because research is tried first
        assert_eq!(classify_phase("Read draft comments"), Phase::Research);
        // "plan" (outline) beats "write"
        assert_eq!(classify_phase("Plan what to write"), Phase::Outline);
    }

    #[test]
    fn test_unmatched_defaults_to_draft() {
        assert_eq!(classify_phase("Mystery task"), Phase::Draft);
        assert_eq!(classify_phase(""), Phase::Draft);
    }

    #[test]
    fn test_revision_stem_matches_variants() {
        assert_eq!(classify_phase("Revising chapter 2"), Phase::Revision);
        assert_eq!(classify_phase("Second revision pass"), Phase::Revision);
    }

    #[test]
    fn test_polish_is_not_deep_work() {
        assert!(!Phase::Polish.is_deep_work());
        assert!(Phase::Draft.is_deep_work());
        assert!(Phase::Research.is_deep_work());
    }
}
