use std::path::Path;

use rand::Rng;
use stim_transform::Scrambler;

use super::batch::for_each_image;
use super::cancel::CancelToken;
use super::image_io::{encode_raster, ensure_dir, output_path, read_raster, write_atomic};
use crate::error::{ConfigError, FileError};
use crate::models::{AppConfig, OutputConfig, ProcessedFile, RunReport};

/// Scrambles every image of a directory into an output directory.
pub struct ScrambleService {
    scrambler: Scrambler,
    output: OutputConfig,
}

impl ScrambleService {
    pub fn new(scrambler: Scrambler, output: OutputConfig) -> Self {
        Self { scrambler, output }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.scrambler()?, config.output.clone()))
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    /// Scramble one file into `output_dir`. Each call draws a new field.
    pub fn process_file<R: Rng + ?Sized>(
        &self,
        input: &Path,
        output_dir: &Path,
        rng: &mut R,
    ) -> Result<ProcessedFile, FileError> {
        let source = read_raster(input)?;
        let scrambled = self.scrambler.scramble(&source, rng);

        let output = output_path(output_dir, input, self.output.format);
        let bytes = encode_raster(&scrambled, self.output.format, self.output.jpeg_quality, &output)?;
        write_atomic(&output, &bytes)?;

        Ok(ProcessedFile {
            input: input.to_path_buf(),
            output,
            foil: None,
            angle: None,
        })
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<RunReport, FileError> {
        ensure_dir(output_dir)?;
        let opts = self.scrambler.options();
        tracing::debug!(
            canvas = opts.canvas_size,
            max_distortion = opts.max_distortion,
            steps = opts.steps,
            "Scrambling {}",
            input_dir.display()
        );
        for_each_image(input_dir, cancel, |file| self.process_file(file, output_dir, &mut *rng))
    }
}
