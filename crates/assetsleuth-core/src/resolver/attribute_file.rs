/// Importer settings exported from the editor as JSON.
///
/// Enum-valued settings arrive as the editor's raw integers and go through
/// the total `from_raw` mappings, so an exporter from a newer editor never
/// breaks an analysis.
use super::environment::MemoryAttributes;
use crate::error::ProjectError;
use crate::model::attributes::{
    AnimationCompression, AudioAttributes, AudioLoadType, MeshCompression, ModelAttributes,
    TextureAttributes, TextureCompression, TextureType,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawTexture {
    texture_type: i32,
    max_size: u32,
    compression: i32,
    crunched: bool,
    crunch_quality: u32,
}

impl Default for RawTexture {
    fn default() -> Self {
        Self {
            texture_type: 0,
            max_size: 2048,
            compression: 1,
            crunched: false,
            crunch_quality: 50,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAudio {
    load_type: i32,
    quality: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawModel {
    read_write: bool,
    optimize_polygons: bool,
    optimize_vertices: bool,
    mesh_compression: i32,
    animation_compression: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAttributeFile {
    textures: HashMap<String, RawTexture>,
    audio: HashMap<String, RawAudio>,
    models: HashMap<String, RawModel>,
}

/// Parse exported importer settings from JSON text.
pub fn parse_attribute_json(text: &str) -> Result<MemoryAttributes, serde_json::Error> {
    let raw: RawAttributeFile = serde_json::from_str(text)?;

    let textures = raw
        .textures
        .into_iter()
        .map(|(path, t)| {
            let attrs = TextureAttributes {
                texture_type: TextureType::from_raw(t.texture_type),
                max_size: t.max_size,
                compression: TextureCompression::from_raw(t.compression),
                crunched: t.crunched,
                crunch_quality: t.crunch_quality,
            };
            (path, attrs)
        })
        .collect();

    let audio = raw
        .audio
        .into_iter()
        .map(|(path, a)| {
            let attrs = AudioAttributes {
                load_type: AudioLoadType::from_raw(a.load_type),
                quality: a.quality,
            };
            (path, attrs)
        })
        .collect();

    let models = raw
        .models
        .into_iter()
        .map(|(path, m)| {
            let attrs = ModelAttributes {
                read_write: m.read_write,
                optimize_polygons: m.optimize_polygons,
                optimize_vertices: m.optimize_vertices,
                mesh_compression: MeshCompression::from_raw(m.mesh_compression),
                animation_compression: AnimationCompression::from_raw(m.animation_compression),
            };
            (path, attrs)
        })
        .collect();

    Ok(MemoryAttributes {
        textures,
        audio,
        models,
        unreadable: HashMap::new(),
    })
}

/// Load exported importer settings from a JSON file.
pub fn load_attribute_file(path: &Path) -> Result<MemoryAttributes, ProjectError> {
    let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_attribute_json(&text).map_err(|source| ProjectError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
