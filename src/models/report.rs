use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::FileError;

/// Outcome of a directory run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Files written, in processing order
    pub processed: Vec<ProcessedFile>,

    /// Files skipped, with the reason
    pub failed: Vec<FailedFile>,

    /// The run stopped early on request
    pub cancelled: bool,

    /// Outputs written more than once in this run, e.g. `a.png` and
    /// `a.jpg` both mapping to `a.jpg`. The later input wins.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overwritten: Vec<PathBuf>,
}

/// One successfully processed input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Foil written alongside `output` (rotation runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foil: Option<PathBuf>,

    /// Rotation angle in degrees (rotation runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

/// One input that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: String,
}

impl RunReport {
    pub fn record(&mut self, file: ProcessedFile) {
        self.processed.push(file);
    }

    pub fn record_failure(&mut self, input: &Path, error: &FileError) {
        self.failed.push(FailedFile {
            input: input.to_path_buf(),
            error: error.to_string(),
        });
    }

    /// Append another run's results, e.g. the second stage of a pipeline.
    pub fn merge(&mut self, other: RunReport) {
        self.processed.extend(other.processed);
        self.failed.extend(other.failed);
        self.cancelled |= other.cancelled;
        self.overwritten.extend(other.overwritten);
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
