use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stim_transform::{AngleSpec, ChromaSpace, ScrambleOptions, Scrambler, Srgb};

use crate::error::ConfigError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "STIMKIT_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Diffeomorphic scrambling
    pub scramble: ScrambleConfig,

    /// Chrominance rotation and angle batches
    pub rotation: RotationConfig,

    /// Output encoding
    pub output: OutputConfig,

    /// RNG seed; absent means seeded from entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrambleConfig {
    /// Square canvas side in pixels
    pub canvas_size: usize,

    /// Total displacement in pixels across all steps
    pub max_distortion: f32,

    /// Number of warp steps
    pub steps: u32,

    /// Share of the canvas the source is fitted into
    pub fit_fraction: f32,

    /// Canvas fill as hex RGB
    pub background: String,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            max_distortion: 20.0,
            steps: 20,
            fit_fraction: 0.75,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RotationConfig {
    /// Angles drawn per batch
    pub batch_size: usize,

    /// Lower bound of the angle domain in degrees (inclusive)
    pub min_angle: f32,

    /// Upper bound of the angle domain in degrees (exclusive)
    pub max_angle: f32,

    /// Minimum separation between consecutively drawn angles
    pub min_gap: f32,

    /// Luminance/chrominance space the rotation happens in
    pub color_space: ColorSpaceSetting,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            batch_size: 4,
            min_angle: 0.0,
            max_angle: 360.0,
            min_gap: 30.0,
            color_space: ColorSpaceSetting::default(),
        }
    }
}

/// Serialized name of a [`ChromaSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpaceSetting {
    #[default]
    #[serde(alias = "lab")]
    Cielab,
    Oklab,
}

impl From<ColorSpaceSetting> for ChromaSpace {
    fn from(setting: ColorSpaceSetting) -> Self {
        match setting {
            ColorSpaceSetting::Cielab => ChromaSpace::CieLab,
            ColorSpaceSetting::Oklab => ChromaSpace::Oklab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Encoding of every written file
    pub format: OutputFormat,

    /// JPEG quality, 1..=100 (ignored for PNG)
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jpeg_quality: 95,
        }
    }
}

/// Output file format. Every output gets this format's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from the file named by
    /// `STIMKIT_CONFIG`, or fall back to defaults when neither is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Render the effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every setting by building the objects that will use it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scrambler()?;
        self.angle_spec()?;
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.output.jpeg_quality));
        }
        Ok(())
    }

    pub fn background(&self) -> Result<[u8; 3], ConfigError> {
        let value = &self.scramble.background;
        value
            .parse::<Srgb>()
            .map(Srgb::to_bytes)
            .map_err(|source| ConfigError::InvalidColor {
                value: value.clone(),
                source,
            })
    }

    pub fn scramble_options(&self) -> Result<ScrambleOptions, ConfigError> {
        let s = &self.scramble;
        Ok(ScrambleOptions::new()
            .canvas_size(s.canvas_size)
            .max_distortion(s.max_distortion)
            .steps(s.steps)
            .fit_fraction(s.fit_fraction)
            .background(self.background()?))
    }

    pub fn scrambler(&self) -> Result<Scrambler, ConfigError> {
        Ok(Scrambler::new(self.scramble_options()?)?)
    }

    pub fn angle_spec(&self) -> Result<AngleSpec, ConfigError> {
        let r = &self.rotation;
        Ok(AngleSpec::new(
            r.batch_size,
            r.min_angle,
            r.max_angle,
            r.min_gap,
        )?)
    }

    pub fn chroma_space(&self) -> ChromaSpace {
        self.rotation.color_space.into()
    }
}
