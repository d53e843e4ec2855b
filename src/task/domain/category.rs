//! Closed set of coursework categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coursework category.
///
/// The set is closed so that category histograms can report every
/// configured category, including the ones with a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// General academic task.
    Task,
    /// Oral presentation.
    Presentation,
    /// Long-term project or research work.
    Project,
    /// Written assignment or homework.
    Assignment,
    /// Quiz or short assessment.
    Quiz,
    /// Written examination.
    Exam,
    /// Laboratory report.
    LabReport,
    /// Final laboratory examination.
    LabFinal,
    /// Laboratory performance evaluation.
    LabPerformance,
    /// Document submission or paperwork.
    Documents,
    /// Blended learning centre activity.
    Blc,
    /// Group work or collaborative project.
    Groups,
    /// Miscellaneous coursework.
    Others,
}

impl TaskCategory {
    /// Every configured category, in histogram display order.
    pub const ALL: [Self; 13] = [
        Self::Task,
        Self::Presentation,
        Self::Project,
        Self::Assignment,
        Self::Quiz,
        Self::Exam,
        Self::LabReport,
        Self::LabFinal,
        Self::LabPerformance,
        Self::Documents,
        Self::Blc,
        Self::Groups,
        Self::Others,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Presentation => "presentation",
            Self::Project => "project",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::Exam => "exam",
            Self::LabReport => "lab_report",
            Self::LabFinal => "lab_final",
            Self::LabPerformance => "lab_performance",
            Self::Documents => "documents",
            Self::Blc => "blc",
            Self::Groups => "groups",
            Self::Others => "others",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseCategoryError(value.to_owned()))
    }
}

/// Error returned while parsing categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseCategoryError(pub String);
