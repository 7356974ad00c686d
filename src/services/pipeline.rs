use std::path::{Path, PathBuf};

use rand::Rng;

use super::cancel::CancelToken;
use super::recolor::BatchOrchestrator;
use super::scramble::ScrambleService;
use crate::error::FileError;
use crate::models::RunReport;

/// Directories a pipeline run writes into, all under one work directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDirs {
    pub scrambled: PathBuf,
    pub rotated: PathBuf,
    pub foil: PathBuf,
}

impl PipelineDirs {
    pub fn under(workdir: &Path) -> Self {
        Self {
            scrambled: workdir.join("scrambled"),
            rotated: workdir.join("rotated"),
            foil: workdir.join("foil"),
        }
    }
}

/// Scramble `input_dir`, then rotate the scrambled images.
///
/// The stages share nothing but the `scrambled` directory. Rotation is
/// skipped when scrambling was cancelled.
pub fn run_pipeline<R: Rng + ?Sized>(
    scrambler: &ScrambleService,
    orchestrator: &mut BatchOrchestrator,
    input_dir: &Path,
    dirs: &PipelineDirs,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<RunReport, FileError> {
    let mut report = scrambler.run(input_dir, &dirs.scrambled, &mut *rng, cancel)?;
    if report.cancelled {
        return Ok(report);
    }
    tracing::info!(
        scrambled = report.processed.len(),
        failed = report.failed.len(),
        "Scrambling finished, rotating"
    );
    let rotation = orchestrator.run(&dirs.scrambled, &dirs.rotated, &dirs.foil, rng, cancel)?;
    report.merge(rotation);
    Ok(report)
}
