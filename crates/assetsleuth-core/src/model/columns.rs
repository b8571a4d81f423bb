/// Declared column sets for each analysis kind.
///
/// Each enum maps a column to the typed key it sorts by and the text it
/// displays, so column order in a frontend is purely presentational.
use super::attributes::{AudioAttributes, ModelAttributes, TextureAttributes};
use super::rows::{AssetRow, BuildLogRecord};
use super::size::{format_percentage, format_size};
use super::sortable::{SortColumn, SortKey};
use super::tree_element::TreeElement;

fn yes_no(value: bool) -> String {
    let label = if value { "yes" } else { "no" };
    label.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureColumn {
    Name,
    Type,
    MaxSize,
    Compression,
    Crunched,
    CrunchQuality,
}

impl SortColumn<AssetRow<TextureAttributes>> for TextureColumn {
    fn all() -> &'static [Self] {
        &[
            Self::Name,
            Self::Type,
            Self::MaxSize,
            Self::Compression,
            Self::Crunched,
            Self::CrunchQuality,
        ]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Name => "Texture",
            Self::Type => "Type",
            Self::MaxSize => "Max size",
            Self::Compression => "Compression",
            Self::Crunched => "Crunch compression",
            Self::CrunchQuality => "Crunch comp. quality",
        }
    }

    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Type => "type",
            Self::MaxSize => "max-size",
            Self::Compression => "compression",
            Self::Crunched => "crunched",
            Self::CrunchQuality => "crunch-quality",
        }
    }

    fn key(self, element: &TreeElement<AssetRow<TextureAttributes>>) -> SortKey {
        let a = &element.data.attributes;
        match self {
            Self::Name => SortKey::Text(element.name.clone()),
            Self::Type => SortKey::Text(a.texture_type.label().into()),
            Self::MaxSize => SortKey::Int(a.max_size.into()),
            Self::Compression => SortKey::Text(a.compression.label().into()),
            Self::Crunched => SortKey::Bool(a.crunched),
            Self::CrunchQuality => SortKey::Int(a.crunch_quality.into()),
        }
    }

    fn cell(self, element: &TreeElement<AssetRow<TextureAttributes>>) -> String {
        let a = &element.data.attributes;
        match self {
            Self::Name => element.name.to_string(),
            Self::Type => a.texture_type.label().to_string(),
            Self::MaxSize => a.max_size.to_string(),
            Self::Compression => a.compression.label().to_string(),
            Self::Crunched => yes_no(a.crunched),
            Self::CrunchQuality => a.crunch_quality.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioColumn {
    Name,
    LoadType,
    Quality,
}

impl SortColumn<AssetRow<AudioAttributes>> for AudioColumn {
    fn all() -> &'static [Self] {
        &[Self::Name, Self::LoadType, Self::Quality]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Name => "Audio clip",
            Self::LoadType => "Load type",
            Self::Quality => "Quality",
        }
    }

    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LoadType => "load-type",
            Self::Quality => "quality",
        }
    }

    fn key(self, element: &TreeElement<AssetRow<AudioAttributes>>) -> SortKey {
        let a = &element.data.attributes;
        match self {
            Self::Name => SortKey::Text(element.name.clone()),
            Self::LoadType => SortKey::Text(a.load_type.label().into()),
            Self::Quality => SortKey::Float(a.quality.into()),
        }
    }

    fn cell(self, element: &TreeElement<AssetRow<AudioAttributes>>) -> String {
        let a = &element.data.attributes;
        match self {
            Self::Name => element.name.to_string(),
            Self::LoadType => a.load_type.label().to_string(),
            Self::Quality => format!("{:.0}%", a.quality * 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelColumn {
    Name,
    ReadWrite,
    PolygonsOptimized,
    VerticesOptimized,
    MeshCompression,
    AnimationCompression,
}

impl SortColumn<AssetRow<ModelAttributes>> for ModelColumn {
    fn all() -> &'static [Self] {
        &[
            Self::Name,
            Self::ReadWrite,
            Self::PolygonsOptimized,
            Self::VerticesOptimized,
            Self::MeshCompression,
            Self::AnimationCompression,
        ]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Name => "Model",
            Self::ReadWrite => "R/W enabled",
            Self::PolygonsOptimized => "Polygons optimized",
            Self::VerticesOptimized => "Vertices optimized",
            Self::MeshCompression => "Mesh compression",
            Self::AnimationCompression => "Animation compression",
        }
    }

    fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ReadWrite => "read-write",
            Self::PolygonsOptimized => "polygons-optimized",
            Self::VerticesOptimized => "vertices-optimized",
            Self::MeshCompression => "mesh-compression",
            Self::AnimationCompression => "animation-compression",
        }
    }

    fn key(self, element: &TreeElement<AssetRow<ModelAttributes>>) -> SortKey {
        let a = &element.data.attributes;
        match self {
            Self::Name => SortKey::Text(element.name.clone()),
            Self::ReadWrite => SortKey::Bool(a.read_write),
            Self::PolygonsOptimized => SortKey::Bool(a.optimize_polygons),
            Self::VerticesOptimized => SortKey::Bool(a.optimize_vertices),
            Self::MeshCompression => SortKey::Text(a.mesh_compression.label().into()),
            Self::AnimationCompression => SortKey::Text(a.animation_compression.label().into()),
        }
    }

    fn cell(self, element: &TreeElement<AssetRow<ModelAttributes>>) -> String {
        let a = &element.data.attributes;
        match self {
            Self::Name => element.name.to_string(),
            Self::ReadWrite => yes_no(a.read_write),
            Self::PolygonsOptimized => yes_no(a.optimize_polygons),
            Self::VerticesOptimized => yes_no(a.optimize_vertices),
            Self::MeshCompression => a.mesh_compression.label().to_string(),
            Self::AnimationCompression => a.animation_compression.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildLogColumn {
    Size,
    SizePercentage,
    Path,
}

impl SortColumn<BuildLogRecord> for BuildLogColumn {
    fn all() -> &'static [Self] {
        &[Self::Size, Self::SizePercentage, Self::Path]
    }

    fn title(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::SizePercentage => "Size %",
            Self::Path => "Path",
        }
    }

    fn id(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::SizePercentage => "percentage",
            Self::Path => "path",
        }
    }

    fn key(self, element: &TreeElement<BuildLogRecord>) -> SortKey {
        let r = &element.data;
        match self {
            // Sort on bytes so 900 kb ranks below 1.0 mb.
            Self::Size => SortKey::Float(r.size_in_bytes()),
            Self::SizePercentage => SortKey::Float(r.size_percentage),
            Self::Path => SortKey::Text(r.file_path.as_str().into()),
        }
    }

    fn cell(self, element: &TreeElement<BuildLogRecord>) -> String {
        let r = &element.data;
        match self {
            Self::Size => format_size(r.size_in_bytes()),
            Self::SizePercentage => format_percentage(r.size_percentage),
            Self::Path => r.file_path.clone(),
        }
    }
}
