//! Domain-critical regression tests for stim-transform.
//!
//! Each test documents the experimental property it protects: a stimulus
//! set built with a broken transform would still look plausible, so these
//! check the invariants directly.

#[cfg(test)]
mod domain_tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::angles::{distinct_angles, AngleQueue, AngleSpec};
    use crate::chroma::{invert_chroma, rotate_chroma, ChromaRotator};
    use crate::color::{ChromaSpace, ColorSpace};
    use crate::image::{Image, Raster};
    use crate::warp::{DisplacementField, ScrambleOptions, Scrambler, WarpParams};

    fn checkerboard(width: usize, height: usize, cell: usize) -> Raster {
        let pixels = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                if (x / cell + y / cell) % 2 == 0 {
                    [30, 90, 200]
                } else {
                    [240, 200, 40]
                }
            })
            .collect();
        Raster::from_pixels(width, height, pixels).unwrap()
    }

    // ========================================================================
    // GAP 1: Warp fields must not translate or rescale the image
    // ========================================================================

    /// If this breaks, it means: the field kept a DC component (the whole
    /// image drifts) or its amplitude is no longer tied to
    /// `max_distortion / steps`, so distortion levels are not comparable
    /// across images.
    #[test]
    fn test_field_statistics_across_seeds() {
        let params = WarpParams::new(96, 20.0, 20).unwrap();
        for seed in 0..20 {
            let field = DisplacementField::synthesize(&params, &mut StdRng::seed_from_u64(seed));
            let (mx, my) = field.mean();
            let (rx, ry) = field.rms();
            assert!(
                mx.abs() < 1e-5 && my.abs() < 1e-5,
                "REGRESSION: seed {seed} field mean ({mx}, {my})"
            );
            assert!(
                (rx - 1.0).abs() < 1e-4 && (ry - 1.0).abs() < 1e-4,
                "REGRESSION: seed {seed} field rms ({rx}, {ry}), expected 20/20 = 1"
            );
        }
    }

    // ========================================================================
    // GAP 2: Reproducibility and per-image independence
    // ========================================================================

    /// If this breaks, it means: a fixed seed no longer reproduces a
    /// stimulus set, or two images in a batch share a field (their
    /// distortions would be correlated).
    #[test]
    fn test_fixed_seed_reproduces_and_images_differ() {
        let scrambler = Scrambler::new(ScrambleOptions::new().canvas_size(64).steps(5)).unwrap();
        let source = checkerboard(40, 30, 5);

        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);
        let first_a = scrambler.scramble(&source, &mut rng_a);
        let first_b = scrambler.scramble(&source, &mut rng_b);
        assert_eq!(first_a, first_b, "REGRESSION: same seed gave different output");

        let second_a = scrambler.scramble(&source, &mut rng_a);
        assert_ne!(first_a, second_a, "REGRESSION: consecutive images reused a field");
    }

    /// If this breaks, it means: the step loop redraws the field instead of
    /// applying one field `steps` times, turning a smooth flow into noise.
    #[test]
    fn test_steps_reuse_one_field() {
        let scrambler = Scrambler::new(ScrambleOptions::new().canvas_size(48).steps(6)).unwrap();
        let source = checkerboard(48, 48, 4);
        let field = scrambler.synthesize_field(&mut StdRng::seed_from_u64(77));

        let manual = (0..6).fold(scrambler.fit_to_canvas(&source), |img, _| {
            crate::warp::remap_reflect(&img, &field).unwrap()
        });
        assert_eq!(scrambler.scramble_with_field(&source, &field).unwrap(), manual);
    }

    // ========================================================================
    // GAP 3: Scrambling keeps texture, destroys shape
    // ========================================================================

    /// If this breaks, it means: resampling introduced colors that were not
    /// in the source (e.g. zero padding at borders) instead of interpolating
    /// between existing ones.
    #[test]
    fn test_uniform_canvas_survives_scrambling() {
        let scrambler = Scrambler::new(
            ScrambleOptions::new()
                .canvas_size(64)
                .max_distortion(40.0)
                .steps(4)
                .fit_fraction(1.0)
                .background([10, 120, 30]),
        )
        .unwrap();
        let out = scrambler.scramble(&Raster::filled(64, 64, [10, 120, 30]), &mut StdRng::seed_from_u64(1));
        assert!(
            out.pixels().iter().all(|&p| p == [10, 120, 30]),
            "REGRESSION: border handling leaked foreign colors"
        );
    }

    /// If this breaks, it means: the warp is a no-op (displacement lost in
    /// scaling) and "scrambled" stimuli are just resized originals.
    #[test]
    fn test_scrambling_moves_content() {
        let scrambler = Scrambler::new(ScrambleOptions::new().canvas_size(80).max_distortion(60.0)).unwrap();
        let source = checkerboard(60, 60, 6);
        let fitted = scrambler.fit_to_canvas(&source);
        let scrambled = scrambler.scramble(&source, &mut StdRng::seed_from_u64(6));

        let changed = fitted
            .pixels()
            .iter()
            .zip(scrambled.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(
            changed > fitted.pixels().len() / 10,
            "REGRESSION: only {changed} pixels changed"
        );
    }

    // ========================================================================
    // GAP 4: Chroma rotation must leave lightness alone
    // ========================================================================

    /// If this breaks, it means: rotation leaks into L, so target and foil
    /// differ in brightness as well as hue and the experiment is confounded.
    #[test]
    fn test_rotation_preserves_lightness_in_float() {
        for space in [ColorSpace::CieLab, ColorSpace::Oklab] {
            let image = Image::from_raster(&checkerboard(8, 8, 2)).into_space(space);
            let mut rotated = image.clone();
            rotate_chroma(&mut rotated, 123.0).unwrap();
            invert_chroma(&mut rotated).unwrap();
            for (a, b) in image.pixels().iter().zip(rotated.pixels()) {
                assert_eq!(a[0], b[0], "REGRESSION: L changed in {space:?}");
            }
        }
    }

    /// If this breaks, it means: the foil is no longer the 180° image of the
    /// target, or the 180° shortcut drifted from the rotation matrix.
    #[test]
    fn test_foil_is_half_turn_of_target() {
        let rotator = ChromaRotator::new(ChromaSpace::CieLab);
        let source = Raster::filled(3, 3, [140, 120, 120]);
        let target = rotator.rotate(&source, 40.0);
        let via_invert = rotator.invert(&target);
        let via_matrix = rotator.rotate(&target, 180.0);
        for (a, b) in via_invert.pixels().iter().zip(via_matrix.pixels()) {
            for c in 0..3 {
                assert!(a[c].abs_diff(b[c]) <= 1, "REGRESSION: {a:?} vs {b:?}");
            }
        }
    }

    /// If this breaks, it means: neutral stimuli pick up a color cast, which
    /// points at a white-point mismatch in the Lab conversion.
    #[test]
    fn test_neutral_gray_invariant_under_rotation() {
        for space in [ChromaSpace::CieLab, ChromaSpace::Oklab] {
            let rotator = ChromaRotator::new(space);
            for v in [0u8, 64, 128, 200, 255] {
                let gray = Raster::filled(2, 2, [v, v, v]);
                for theta in [1.0, 45.0, 179.0, 180.0, 359.0] {
                    let out = rotator.rotate(&gray, theta);
                    for p in out.pixels() {
                        assert!(
                            p.iter().all(|&c| c.abs_diff(v) <= 1),
                            "REGRESSION: gray {v} became {p:?} at {theta}° in {space}"
                        );
                    }
                }
            }
        }
    }

    // ========================================================================
    // GAP 5: Angle batches
    // ========================================================================

    /// If this breaks, it means: a batch can contain duplicates or values
    /// outside the domain, so two images in a batch could share a hue.
    #[test]
    fn test_angle_batches_exhaustive_properties() {
        let mut rng = StdRng::seed_from_u64(99);
        let configs = [
            (4, 0.0, 360.0, 30.0),
            (4, 0.0, 360.0, 90.0),
            (6, -180.0, 180.0, 60.0),
            (1, 0.0, 1.0, 1.0),
            (8, 10.0, 50.0, 0.0),
        ];
        for (count, lo, hi, gap) in configs {
            let spec = AngleSpec::new(count, lo, hi, gap).unwrap();
            for _ in 0..300 {
                let mut values = distinct_angles(&spec, &mut rng);
                assert_eq!(values.len(), count);
                assert!(values.iter().all(|&v| v >= lo && v < hi), "{values:?}");
                values.sort_by(f32::total_cmp);
                values.dedup();
                assert_eq!(values.len(), count, "REGRESSION: duplicate angle");
            }
        }
    }

    /// If this breaks, it means: a skipped file burns an angle and every
    /// later image in the batch shifts to a different hue than planned.
    #[test]
    fn test_failed_image_does_not_consume_angle() {
        let spec = AngleSpec::default();
        let planned = distinct_angles(&spec, &mut StdRng::seed_from_u64(5));

        let mut rng = StdRng::seed_from_u64(5);
        let mut queue = AngleQueue::new(spec);
        let mut assigned = Vec::new();
        for ok in [true, false, true, false, false, true, true] {
            let angle = queue.peek(&mut rng);
            if ok {
                queue.commit();
                assigned.push(angle);
            }
        }
        assert_eq!(assigned, planned);
        assert_eq!(queue.batches_drawn(), 1);
    }
}
