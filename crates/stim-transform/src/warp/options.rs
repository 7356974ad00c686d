//! Scrambling options.

/// Configuration for [`Scrambler`](super::Scrambler).
///
/// # Defaults
///
/// - Canvas: 400 x 400
/// - Maximum distortion: 20 pixels, reached over 20 steps
/// - Fit fraction: 0.75 (source fills a 300 px zone on the default canvas)
/// - Background: white
///
/// # Example
///
/// ```
/// use stim_transform::ScrambleOptions;
///
/// let options = ScrambleOptions::new()
///     .canvas_size(256)
///     .max_distortion(80.0)
///     .background([128, 128, 128]);
/// assert_eq!(options.steps, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScrambleOptions {
    /// Side length of the square output canvas in pixels.
    ///
    /// Default: `400`
    pub canvas_size: usize,

    /// Total displacement budget, split evenly across the steps.
    ///
    /// Default: `20.0`
    pub max_distortion: f32,

    /// Number of times the field is applied.
    ///
    /// Default: `20`
    pub steps: u32,

    /// Share of the canvas side the source's longer side is fitted into.
    ///
    /// Default: `0.75`
    pub fit_fraction: f32,

    /// Canvas fill behind the pasted source.
    ///
    /// Default: `[255, 255, 255]`
    pub background: [u8; 3],
}

impl Default for ScrambleOptions {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            max_distortion: 20.0,
            steps: 20,
            fit_fraction: 0.75,
            background: [255, 255, 255],
        }
    }
}

impl ScrambleOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn canvas_size(mut self, size: usize) -> Self {
        self.canvas_size = size;
        self
    }

    #[inline]
    pub fn max_distortion(mut self, pixels: f32) -> Self {
        self.max_distortion = pixels;
        self
    }

    #[inline]
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    #[inline]
    pub fn fit_fraction(mut self, fraction: f32) -> Self {
        self.fit_fraction = fraction;
        self
    }

    #[inline]
    pub fn background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    /// Side of the square zone the source is fitted into.
    pub fn fit_zone(&self) -> usize {
        ((self.canvas_size as f64 * self.fit_fraction as f64).floor() as usize).max(1)
    }
}
