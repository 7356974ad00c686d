//! Directory scrambling.

mod common;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stimkit::services::{CancelToken, ScrambleService};

use common::{assert_dir_files, assert_image_size, fixtures, TestDirs};

#[test]
fn test_every_output_is_canvas_sized() {
    let dirs = TestDirs::new();
    dirs.add_png("wide.png", 90, 20, [200, 30, 30]);
    dirs.add_png("tall.png", 10, 70, [30, 30, 200]);
    dirs.add_png("dot.png", 1, 1, [0, 0, 0]);

    let config = fixtures::fast_config();
    let service = ScrambleService::from_config(&config).unwrap();
    let out = dirs.path("scrambled");
    let report = service
        .run(&dirs.input(), &out, &mut StdRng::seed_from_u64(0), &CancelToken::new())
        .unwrap();

    assert_eq!(report.processed.len(), 3);
    for name in ["wide.png", "tall.png", "dot.png"] {
        assert_image_size(&out.join(name), 48, 48);
    }
}

#[test]
fn test_extension_is_normalized_to_jpeg() {
    let dirs = TestDirs::new();
    dirs.add_png("a.png", 12, 12, [10, 200, 10]);
    dirs.add_png("b.jpeg", 12, 12, [10, 10, 200]);

    let mut config = fixtures::fast_config();
    config.output.format = stimkit::models::OutputFormat::Jpeg;
    let service = ScrambleService::from_config(&config).unwrap();
    let out = dirs.path("scrambled");
    service
        .run(&dirs.input(), &out, &mut StdRng::seed_from_u64(0), &CancelToken::new())
        .unwrap();

    assert_dir_files(&out, &["a.jpg", "b.jpg"]);
}

#[test]
fn test_corrupt_input_is_reported_and_skipped() {
    let dirs = TestDirs::new();
    dirs.add_png("good.png", 12, 12, [90, 90, 90]);
    dirs.add_corrupt("bad.png");

    let service = ScrambleService::from_config(&fixtures::fast_config()).unwrap();
    let out = dirs.path("scrambled");
    let report = service
        .run(&dirs.input(), &out, &mut StdRng::seed_from_u64(0), &CancelToken::new())
        .unwrap();

    assert!(report.has_failures());
    assert_eq!(report.processed.len(), 1);
    assert_dir_files(&out, &["good.png"]);
}

#[test]
fn test_cancelled_run_writes_nothing() {
    let dirs = TestDirs::new();
    dirs.add_png("a.png", 12, 12, [90, 90, 90]);

    let cancel = CancelToken::new();
    cancel.cancel();
    let service = ScrambleService::from_config(&fixtures::fast_config()).unwrap();
    let out = dirs.path("scrambled");
    let report = service
        .run(&dirs.input(), &out, &mut StdRng::seed_from_u64(0), &cancel)
        .unwrap();

    assert!(report.cancelled);
    assert!(report.processed.is_empty());
    assert_dir_files(&out, &[]);
}

#[test]
fn test_missing_input_directory_is_an_error() {
    let dirs = TestDirs::new();
    let service = ScrambleService::from_config(&fixtures::fast_config()).unwrap();
    let result = service.run(
        &dirs.path("does-not-exist"),
        &dirs.path("scrambled"),
        &mut StdRng::seed_from_u64(0),
        &CancelToken::new(),
    );
    assert!(result.is_err());
}
