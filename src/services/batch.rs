use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::cancel::CancelToken;
use super::listing::list_images;
use crate::error::FileError;
use crate::models::{ProcessedFile, RunReport};

/// Run `process` over every image in `input_dir`, in natural order.
///
/// A failing file is logged and recorded, and the loop moves on. The
/// cancel token is checked before each file. Only listing the directory
/// itself is fatal. Outputs that an earlier input of the same run already
/// wrote are logged and listed in the report.
pub fn for_each_image<F>(
    input_dir: &Path,
    cancel: &CancelToken,
    mut process: F,
) -> Result<RunReport, FileError>
where
    F: FnMut(&Path) -> Result<ProcessedFile, FileError>,
{
    let files = list_images(input_dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %input_dir.display(), "No images found");
    }

    let mut report = RunReport::default();
    let mut written: HashSet<PathBuf> = HashSet::new();
    for file in &files {
        if cancel.is_cancelled() {
            tracing::warn!(
                remaining = files.len() - report.processed.len() - report.failed.len(),
                "Cancelled, stopping before next image"
            );
            report.cancelled = true;
            break;
        }

        match process(file) {
            Ok(done) => {
                tracing::info!(file = %file.display(), output = %done.output.display(), "Processed");
                for output in std::iter::once(&done.output).chain(&done.foil) {
                    if !written.insert(output.clone()) {
                        tracing::warn!(file = %file.display(), output = %output.display(), "Output name collision, earlier output overwritten");
                        report.overwritten.push(output.clone());
                    }
                }
                report.record(done);
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "Skipping file");
                report.record_failure(file, &e);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_do_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a1.png", "a2.png", "a3.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let report = for_each_image(dir.path(), &CancelToken::new(), |path| {
            if path.ends_with("a2.png") {
                Err(FileError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "bad"),
                })
            } else {
                Ok(ProcessedFile {
                    input: path.to_path_buf(),
                    output: PathBuf::from("out"),
                    foil: None,
                    angle: None,
                })
            }
        })
        .unwrap();

        assert_eq!(report.processed.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].input.ends_with("a2.png"));
        assert!(!report.cancelled);
    }

    #[test]
    fn test_cancel_stops_at_image_boundary() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a1.png", "a2.png", "a3.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let cancel = CancelToken::new();
        let mut seen = 0;
        let report = for_each_image(dir.path(), &cancel, |path| {
            seen += 1;
            cancel.cancel();
            Ok(ProcessedFile {
                input: path.to_path_buf(),
                output: PathBuf::from("out"),
                foil: None,
                angle: None,
            })
        })
        .unwrap();

        assert_eq!(seen, 1);
        assert_eq!(report.processed.len(), 1);
        assert!(report.cancelled);
    }

    #[test]
    fn test_cancel_from_another_thread_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b1.png", "b2.png", "b3.png", "b4.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let cancel = CancelToken::new();
        let mut seen = Vec::new();
        let report = for_each_image(dir.path(), &cancel, |path| {
            seen.push(path.to_path_buf());
            if seen.len() == 2 {
                // Same path a signal handler takes: a clone flipped elsewhere.
                let remote = cancel.clone();
                std::thread::spawn(move || remote.cancel()).join().unwrap();
            }
            Ok(ProcessedFile {
                input: path.to_path_buf(),
                output: PathBuf::from("out"),
                foil: None,
                angle: None,
            })
        })
        .unwrap();

        assert_eq!(seen.len(), 2);
        assert!(seen[1].ends_with("b2.png"));
        assert_eq!(report.processed.len(), 2);
        assert!(report.cancelled);
    }

    #[test]
    fn test_name_collision_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["img1.png", "img1.jpg", "img2.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        // Every input maps to `<stem>.jpg`, as the output naming does.
        let report = for_each_image(dir.path(), &CancelToken::new(), |path| {
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            Ok(ProcessedFile {
                input: path.to_path_buf(),
                output: PathBuf::from(format!("out/{stem}.jpg")),
                foil: Some(PathBuf::from(format!("foil/{stem}.jpg"))),
                angle: Some(10.0),
            })
        })
        .unwrap();

        assert_eq!(report.processed.len(), 3);
        assert_eq!(
            report.overwritten,
            vec![PathBuf::from("out/img1.jpg"), PathBuf::from("foil/img1.jpg")]
        );
    }
}
