/// Kind-specific importer settings shown as analysis columns.
///
/// The environment reports importer enums as raw integers. Every mapping
/// here is total: an unrecognised value becomes `Unknown(raw)`, is logged
/// once at conversion, and displays as `"Unknown"` instead of aborting the
/// analysis.
use tracing::warn;

/// Texture importer type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextureType {
    #[default]
    Default,
    NormalMap,
    Gui,
    Cookie,
    Lightmap,
    Cursor,
    Sprite,
    SingleChannel,
    Shadowmask,
    DirectionalLightmap,
    Unknown(i32),
}

impl TextureType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Default,
            1 => Self::NormalMap,
            2 => Self::Gui,
            4 => Self::Cookie,
            6 => Self::Lightmap,
            7 => Self::Cursor,
            8 => Self::Sprite,
            10 => Self::SingleChannel,
            11 => Self::Shadowmask,
            12 => Self::DirectionalLightmap,
            other => {
                warn!(value = other, "unrecognised texture type");
                Self::Unknown(other)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::NormalMap => "NormalMap",
            Self::Gui => "GUI",
            Self::Cookie => "Cookie",
            Self::Lightmap => "Lightmap",
            Self::Cursor => "Cursor",
            Self::Sprite => "Sprite",
            Self::SingleChannel => "SingleChannel",
            Self::Shadowmask => "Shadowmask",
            Self::DirectionalLightmap => "DirectionalLightmap",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Texture compression quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextureCompression {
    Uncompressed,
    #[default]
    Normal,
    High,
    Low,
    Unknown(i32),
}

impl TextureCompression {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Uncompressed,
            1 => Self::Normal,
            2 => Self::High,
            3 => Self::Low,
            other => {
                warn!(value = other, "unrecognised texture compression");
                Self::Unknown(other)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Uncompressed => "Uncompressed",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Low => "Low",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// How an audio clip is loaded at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioLoadType {
    #[default]
    DecompressOnLoad,
    CompressedInMemory,
    Streaming,
    Unknown(i32),
}

impl AudioLoadType {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::DecompressOnLoad,
            1 => Self::CompressedInMemory,
            2 => Self::Streaming,
            other => {
                warn!(value = other, "unrecognised audio load type");
                Self::Unknown(other)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DecompressOnLoad => "Decompress On Load",
            Self::CompressedInMemory => "Compressed In Memory",
            Self::Streaming => "Streaming",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Mesh compression level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeshCompression {
    #[default]
    Off,
    Low,
    Medium,
    High,
    Unknown(i32),
}

impl MeshCompression {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            other => {
                warn!(value = other, "unrecognised mesh compression");
                Self::Unknown(other)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Animation compression mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationCompression {
    Off,
    #[default]
    KeyframeReduction,
    KeyframeReductionAndCompression,
    Optimal,
    Unknown(i32),
}

impl AnimationCompression {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::KeyframeReduction,
            2 => Self::KeyframeReductionAndCompression,
            3 => Self::Optimal,
            other => {
                warn!(value = other, "unrecognised animation compression");
                Self::Unknown(other)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::KeyframeReduction => "KeyframeReduction",
            Self::KeyframeReductionAndCompression => "KeyframeReductionAndCompression",
            Self::Optimal => "Optimal",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Texture settings for the analysed platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureAttributes {
    pub texture_type: TextureType,
    /// Maximum imported dimension in pixels.
    pub max_size: u32,
    pub compression: TextureCompression,
    pub crunched: bool,
    /// Crunch compression quality, 0–100.
    pub crunch_quality: u32,
}

/// Audio settings for the analysed platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioAttributes {
    pub load_type: AudioLoadType,
    /// Compression quality, 0.0–1.0.
    pub quality: f32,
}

/// Model importer settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAttributes {
    pub read_write: bool,
    pub optimize_polygons: bool,
    pub optimize_vertices: bool,
    pub mesh_compression: MeshCompression,
    pub animation_compression: AnimationCompression,
}
