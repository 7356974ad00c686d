//! Color space tags carried by [`Image`](crate::Image).

use std::fmt;
use std::str::FromStr;

/// The color space an [`Image`](crate::Image) buffer is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Gamma-encoded sRGB, 0.0..=1.0 per channel
    Srgb,
    /// Linear-light RGB
    LinearRgb,
    /// CIE L*a*b*, D65
    CieLab,
    /// Oklab
    Oklab,
}

/// A lightness + two-chrominance space in which hue can be rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChromaSpace {
    #[default]
    CieLab,
    Oklab,
}

impl ChromaSpace {
    pub fn as_str(self) -> &'static str {
        match self {
            ChromaSpace::CieLab => "cielab",
            ChromaSpace::Oklab => "oklab",
        }
    }
}

impl From<ChromaSpace> for ColorSpace {
    fn from(space: ChromaSpace) -> Self {
        match space {
            ChromaSpace::CieLab => ColorSpace::CieLab,
            ChromaSpace::Oklab => ColorSpace::Oklab,
        }
    }
}

impl fmt::Display for ChromaSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a color space name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color space '{0}' (expected cielab or oklab)")]
pub struct UnknownChromaSpace(pub String);

impl FromStr for ChromaSpace {
    type Err = UnknownChromaSpace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cielab" | "lab" => Ok(ChromaSpace::CieLab),
            "oklab" => Ok(ChromaSpace::Oklab),
            other => Err(UnknownChromaSpace(other.to_string())),
        }
    }
}
