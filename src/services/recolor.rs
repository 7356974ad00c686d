//! Batch chrominance rotation with foils, and standalone inversion.

use std::path::Path;

use rand::Rng;
use stim_transform::{AngleQueue, AngleSpec, ChromaRotator};

use super::batch::for_each_image;
use super::cancel::CancelToken;
use super::image_io::{
    encode_raster, ensure_dir, output_path, read_raster, write_all_or_nothing, write_atomic,
};
use crate::error::{ConfigError, FileError};
use crate::models::{AppConfig, OutputConfig, ProcessedFile, RunReport};

/// Rotates a directory of images into a `rotated` and a `foil` directory.
///
/// Angles come from an [`AngleQueue`]: a fresh batch is drawn whenever the
/// current one is used up, and an angle is consumed only once both outputs
/// of an image are on disk. A skipped file leaves its angle to the next one.
pub struct BatchOrchestrator {
    rotator: ChromaRotator,
    queue: AngleQueue,
    output: OutputConfig,
}

impl BatchOrchestrator {
    pub fn new(rotator: ChromaRotator, spec: AngleSpec, output: OutputConfig) -> Self {
        Self {
            rotator,
            queue: AngleQueue::new(spec),
            output,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            ChromaRotator::new(config.chroma_space()),
            config.angle_spec()?,
            config.output.clone(),
        ))
    }

    pub fn queue(&self) -> &AngleQueue {
        &self.queue
    }

    /// Rotate one file and write it with its foil. Both outputs share the
    /// input's stem.
    pub fn process_file<R: Rng + ?Sized>(
        &mut self,
        input: &Path,
        rotated_dir: &Path,
        foil_dir: &Path,
        rng: &mut R,
    ) -> Result<ProcessedFile, FileError> {
        let source = read_raster(input)?;

        let drawn = self.queue.batches_drawn();
        let angle = self.queue.peek(rng);
        if self.queue.batches_drawn() != drawn {
            tracing::debug!(batch = self.queue.batches_drawn(), "Drew new angle batch");
        }

        let rotated = self.rotator.rotate(&source, angle);
        let foil = self.rotator.invert(&rotated);

        let format = self.output.format;
        let quality = self.output.jpeg_quality;
        let rotated_path = output_path(rotated_dir, input, format);
        let foil_path = output_path(foil_dir, input, format);
        let outputs = vec![
            (
                rotated_path.clone(),
                encode_raster(&rotated, format, quality, &rotated_path)?,
            ),
            (
                foil_path.clone(),
                encode_raster(&foil, format, quality, &foil_path)?,
            ),
        ];
        write_all_or_nothing(&outputs)?;
        self.queue.commit();

        Ok(ProcessedFile {
            input: input.to_path_buf(),
            output: rotated_path,
            foil: Some(foil_path),
            angle: Some(angle),
        })
    }

    pub fn run<R: Rng + ?Sized>(
        &mut self,
        input_dir: &Path,
        rotated_dir: &Path,
        foil_dir: &Path,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<RunReport, FileError> {
        ensure_dir(rotated_dir)?;
        ensure_dir(foil_dir)?;
        tracing::debug!(
            space = %self.rotator.space(),
            batch_size = self.queue.spec().count(),
            min_gap = self.queue.spec().min_gap(),
            "Rotating {}",
            input_dir.display()
        );
        for_each_image(input_dir, cancel, |file| {
            self.process_file(file, rotated_dir, foil_dir, &mut *rng)
        })
    }
}

/// Writes the 180° chrominance inversion of every image in a directory.
pub struct Inverter {
    rotator: ChromaRotator,
    output: OutputConfig,
}

impl Inverter {
    pub fn new(rotator: ChromaRotator, output: OutputConfig) -> Self {
        Self { rotator, output }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ChromaRotator::new(config.chroma_space()), config.output.clone())
    }

    pub fn process_file(&self, input: &Path, output_dir: &Path) -> Result<ProcessedFile, FileError> {
        let source = read_raster(input)?;
        let inverted = self.rotator.invert(&source);
        let output = output_path(output_dir, input, self.output.format);
        let bytes = encode_raster(&inverted, self.output.format, self.output.jpeg_quality, &output)?;
        write_atomic(&output, &bytes)?;
        Ok(ProcessedFile {
            input: input.to_path_buf(),
            output,
            foil: None,
            angle: None,
        })
    }

    pub fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        cancel: &CancelToken,
    ) -> Result<RunReport, FileError> {
        ensure_dir(output_dir)?;
        for_each_image(input_dir, cancel, |file| self.process_file(file, output_dir))
    }
}
