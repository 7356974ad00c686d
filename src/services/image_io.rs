//! Reading, encoding and writing rasters.
//!
//! Outputs are encoded fully in memory, then written through a temporary
//! file and renamed into place, so a failed image never leaves a partial
//! file behind.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use stim_transform::Raster;

use crate::error::FileError;
use crate::models::OutputFormat;

/// Decode an image file into an RGB raster. Alpha is dropped.
pub fn read_raster(path: &Path) -> Result<Raster, FileError> {
    let bytes = std::fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| FileError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let raster = match decoded {
        DynamicImage::ImageRgba8(buf) => Raster::from_interleaved(width, height, 4, buf.as_raw()),
        other => Raster::from_interleaved(width, height, 3, other.to_rgb8().as_raw()),
    };
    raster.map_err(|source| FileError::Transform {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `raster` in `format`. `path` only labels errors.
pub fn encode_raster(
    raster: &Raster,
    format: OutputFormat,
    jpeg_quality: u8,
    path: &Path,
) -> Result<Vec<u8>, FileError> {
    let pixels = raster.to_interleaved();
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let mut buf = Vec::new();

    let result = match format {
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buf, jpeg_quality).write_image(
            &pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Png => {
            PngEncoder::new(&mut buf).write_image(&pixels, width, height, ExtendedColorType::Rgb8)
        }
    };
    result.map_err(|source| FileError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(buf)
}

/// `dir/<input stem>.<format extension>`.
pub fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(format.extension());
    dir.join(name)
}

/// Create `dir` and its parents if absent.
pub fn ensure_dir(dir: &Path) -> Result<(), FileError> {
    std::fs::create_dir_all(dir).map_err(|source| FileError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Hidden sibling that `path` is staged in before the rename.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp_name = OsString::from(".");
    tmp_name.push(path.file_name().unwrap_or_default());
    tmp_name.push(".tmp");
    path.with_file_name(tmp_name)
}

fn write_err(path: &Path) -> impl Fn(std::io::Error) -> FileError + '_ {
    move |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `bytes` to the temporary sibling of `path`. A failed write removes
/// whatever part of the temporary file was created.
fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, FileError> {
    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, bytes) {
        discard(&tmp);
        return Err(write_err(path)(e));
    }
    Ok(tmp)
}

fn discard(tmp: &Path) {
    if let Err(e) = std::fs::remove_file(tmp) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(file = %tmp.display(), error = %e, "Failed to remove temporary file");
        }
    }
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    let tmp = stage(path, bytes)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        discard(&tmp);
        return Err(write_err(path)(e));
    }
    Ok(())
}

/// Write every `(path, bytes)` pair or none of them.
///
/// All temporary files are written before any is renamed, so a failed
/// write leaves existing files at the target paths untouched. A rename
/// failure after earlier renames succeeded removes the renamed outputs;
/// files they replaced are lost in that case.
pub fn write_all_or_nothing(outputs: &[(PathBuf, Vec<u8>)]) -> Result<(), FileError> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        match stage(path, bytes) {
            Ok(tmp) => staged.push(tmp),
            Err(e) => {
                staged.iter().for_each(|tmp| discard(tmp));
                return Err(e);
            }
        }
    }

    for (i, ((path, _), tmp)) in outputs.iter().zip(&staged).enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            staged[i..].iter().for_each(|tmp| discard(tmp));
            for (renamed, _) in &outputs[..i] {
                if let Err(cleanup) = std::fs::remove_file(renamed) {
                    tracing::warn!(file = %renamed.display(), error = %cleanup, "Failed to remove partial output");
                }
            }
            return Err(write_err(path)(e));
        }
    }
    Ok(())
}
