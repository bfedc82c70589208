//! File type and job state enums.
//!
//! Both enums serialize as their upper-case names (`"PDF"`, `"SUCCEEDED"`),
//! which is also the representation stored in SQL.

use rand::Rng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FileType
// ---------------------------------------------------------------------------

/// Kind of document a sample or template was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Pdf,
    Image,
}

impl FileType {
    /// Every known file type, in declaration order.
    pub const ALL: [Self; 2] = [Self::Pdf, Self::Image];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Image => "IMAGE",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// JobState
// ---------------------------------------------------------------------------

/// State of a template matching job.
///
/// There is no real execution pipeline behind these states. Submitting a job
/// picks one of them at random:
///
/// ```text
/// (unset) ─submit─▶ SUBMITTED | RUNNING | FAILED | SUCCEEDED
///                   any state ─submit─▶ any state
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    Submitted,
    Running,
    Failed,
    Succeeded,
}

impl JobState {
    pub const ALL: [Self; 4] = [Self::Submitted, Self::Running, Self::Failed, Self::Succeeded];

    /// Pick a state uniformly at random. Stand-in for a real scheduler.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Self::Submitted)
    }

    /// Results can only be generated for jobs that finished successfully.
    #[must_use]
    pub const fn has_results(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Running => "RUNNING",
            Self::Failed => "FAILED",
            Self::Succeeded => "SUCCEEDED",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
