//! Well calls and control roles.
//!
//! A well's call is written once by the classifier and may afterwards only
//! be escalated by the contamination scanner, never downgraded.

pub mod classify;
pub mod contamination;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of calling a single well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    Pos,
    PosReview,
    PosCluster,
    PosHotwell,
    Neg,
    Inv,
    Ind,
    // calls for controls
    Pass,
    Fail,
}

impl Call {
    /// Long-form wording used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Call::Pos => "Pos",
            Call::PosReview => "Positive, review required",
            Call::PosCluster => "Review needed: Positive by cluster",
            Call::PosHotwell => "Review needed: Positive by hot well",
            Call::Neg => "Neg",
            Call::Inv => "Inv",
            Call::Ind => "Ind",
            Call::Pass => "Pass",
            Call::Fail => "Fail",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Call::Pos | Call::PosReview | Call::PosCluster | Call::PosHotwell
        )
    }

    /// Positive and not yet escalated by the contamination scanner. A well
    /// flagged by one scan pass is out of the running for later passes.
    pub fn can_escalate(&self) -> bool {
        matches!(self, Call::Pos | Call::PosReview)
    }

    pub fn possible_cluster(&self) -> bool {
        matches!(self, Call::PosCluster | Call::PosHotwell)
    }

    /// Wells that should be rerun on a fresh plate.
    pub fn rerun(&self) -> bool {
        matches!(
            self,
            Call::PosCluster | Call::PosHotwell | Call::Inv | Call::Ind
        )
    }

    /// Collapsed wording for the results table.
    pub fn short(&self) -> &'static str {
        if self.is_positive() { "Pos" } else { self.label() }
    }

    /// Plate-map wording; positives that need human review get a star.
    pub fn needs_review(&self) -> &'static str {
        if self.is_positive() && *self != Call::Pos {
            "Pos*"
        } else {
            self.short()
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role a well plays when it does not hold a patient sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlType {
    Ntc,
    Pc,
    Pbs,
    Hrc,
}

impl ControlType {
    pub const ALL: [ControlType; 4] = [
        ControlType::Ntc,
        ControlType::Pc,
        ControlType::Pbs,
        ControlType::Hrc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlType::Ntc => "NTC",
            ControlType::Pc => "PC",
            ControlType::Pbs => "PBS",
            ControlType::Hrc => "HRC",
        }
    }

    /// Recognize a control well from the prefix of its accession label.
    pub fn parse_control(accession: &str) -> Option<ControlType> {
        ControlType::ALL
            .into_iter()
            .find(|ct| accession.starts_with(ct.as_str()))
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
