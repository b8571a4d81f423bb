/// Importer settings read straight from `.meta` files.
///
/// The editor serialises each importer as a small YAML document next to the
/// asset. Only the handful of keys shown as analysis columns are read, with a
/// line scanner rather than a YAML parser: keys are unique within an
/// importer except inside the texture `platformSettings` list, which is
/// collected per entry.
use crate::error::AttributeError;
use crate::model::attributes::{
    AnimationCompression, AudioAttributes, AudioLoadType, MeshCompression, ModelAttributes,
    TextureAttributes, TextureCompression, TextureType,
};
use crate::resolver::AttributeProvider;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Platform entry holding the texture settings every platform inherits.
const DEFAULT_TEXTURE_PLATFORM: &str = "DefaultTexturePlatform";

/// Attribute provider backed by the `.meta` files of a project on disk.
#[derive(Debug, Clone)]
pub struct MetaImporterSettings {
    root: PathBuf,
}

impl MetaImporterSettings {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn read(&self, path: &str, importer: &str) -> Result<String, AttributeError> {
        let meta_path = self.root.join(format!("{path}.meta"));
        let text = std::fs::read_to_string(&meta_path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                AttributeError::Missing {
                    path: path.to_string(),
                }
            } else {
                AttributeError::Unreadable {
                    path: path.to_string(),
                    reason: err.to_string(),
                }
            }
        })?;
        let header = format!("{importer}:");
        if !text.lines().any(|l| l.trim_end() == header) {
            return Err(AttributeError::Unreadable {
                path: path.to_string(),
                reason: format!("no {importer} section in .meta file"),
            });
        }
        Ok(text)
    }
}

impl AttributeProvider for MetaImporterSettings {
    fn texture(&self, path: &str, platform: &str) -> Result<TextureAttributes, AttributeError> {
        let text = self.read(path, "TextureImporter")?;
        let meta = MetaKeys::parse(&text);

        let mut raw = RawTexture {
            texture_type: meta.int("textureType").unwrap_or(0),
            max_size: meta.int("maxTextureSize").unwrap_or(2048),
            compression: meta.int("textureCompression").unwrap_or(1),
            crunched: meta.int("crunchedCompression").unwrap_or(0),
            crunch_quality: meta.int("compressionQuality").unwrap_or(50),
        };
        if let Some(defaults) = meta.platform(DEFAULT_TEXTURE_PLATFORM) {
            raw.apply(defaults);
        }
        match meta.platform(platform) {
            Some(entry) if entry.int("overridden") == Some(1) => {
                debug!(path, platform, "Using platform texture override");
                raw.apply(entry);
            }
            _ => {}
        }

        Ok(TextureAttributes {
            texture_type: TextureType::from_raw(raw.texture_type),
            max_size: u32::try_from(raw.max_size).unwrap_or(0),
            compression: TextureCompression::from_raw(raw.compression),
            crunched: raw.crunched == 1,
            crunch_quality: u32::try_from(raw.crunch_quality).unwrap_or(0),
        })
    }

    /// Audio overrides are keyed by numeric build target; the default
    /// sample settings are reported.
    fn audio(&self, path: &str, _platform: &str) -> Result<AudioAttributes, AttributeError> {
        let text = self.read(path, "AudioImporter")?;
        let meta = MetaKeys::parse(&text);
        Ok(AudioAttributes {
            load_type: AudioLoadType::from_raw(meta.int("loadType").unwrap_or(0)),
            quality: meta.float("quality").unwrap_or(1.0),
        })
    }

    fn model(&self, path: &str, _platform: &str) -> Result<ModelAttributes, AttributeError> {
        let text = self.read(path, "ModelImporter")?;
        let meta = MetaKeys::parse(&text);
        // Older importers store a single flag for both optimisations.
        let legacy = meta.int("optimizeMeshForGPU");
        Ok(ModelAttributes {
            read_write: meta.int("isReadable") == Some(1),
            optimize_polygons: meta.int("optimizeMeshPolygons").or(legacy) == Some(1),
            optimize_vertices: meta.int("optimizeMeshVertices").or(legacy) == Some(1),
            mesh_compression: MeshCompression::from_raw(meta.int("meshCompression").unwrap_or(0)),
            animation_compression: AnimationCompression::from_raw(
                meta.int("animationCompression").unwrap_or(1),
            ),
        })
    }
}

struct RawTexture {
    texture_type: i32,
    max_size: i32,
    compression: i32,
    crunched: i32,
    crunch_quality: i32,
}

impl RawTexture {
    fn apply(&mut self, entry: &Entry<'_>) {
        if let Some(v) = entry.int("maxTextureSize") {
            self.max_size = v;
        }
        if let Some(v) = entry.int("textureCompression") {
            self.compression = v;
        }
        if let Some(v) = entry.int("crunchedCompression") {
            self.crunched = v;
        }
        if let Some(v) = entry.int("compressionQuality") {
            self.crunch_quality = v;
        }
    }
}

/// `key: value` pairs of one YAML mapping, flattened.
#[derive(Debug, Default)]
struct Entry<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Entry<'a> {
    fn insert_first(&mut self, key: &'a str, value: &'a str) {
        self.values.entry(key).or_insert(value);
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    fn int(&self, key: &str) -> Option<i32> {
        self.get(key)?.parse().ok()
    }
}

/// Scalar keys of a `.meta` file plus its `platformSettings` entries.
#[derive(Debug, Default)]
struct MetaKeys<'a> {
    top: Entry<'a>,
    platforms: Vec<Entry<'a>>,
}

impl<'a> MetaKeys<'a> {
    fn parse(text: &'a str) -> Self {
        let mut keys = MetaKeys::default();
        // Indent of the `platformSettings:` line while inside that list.
        let mut list_indent: Option<usize> = None;

        for line in text.lines() {
            let content = line.trim_start();
            if content.is_empty() {
                continue;
            }
            let indent = line.len() - content.len();

            if let Some(base) = list_indent {
                if let Some(item) = content.strip_prefix("- ").filter(|_| indent == base) {
                    let mut entry = Entry::default();
                    if let Some((k, v)) = split_pair(item) {
                        entry.insert_first(k, v);
                    }
                    keys.platforms.push(entry);
                    continue;
                }
                if indent > base {
                    let pair = split_pair(content);
                    if let (Some((k, v)), Some(entry)) = (pair, keys.platforms.last_mut()) {
                        entry.insert_first(k, v);
                    }
                    continue;
                }
                list_indent = None;
            }

            if content.trim_end() == "platformSettings:" {
                list_indent = Some(indent);
                continue;
            }
            if let Some((k, v)) = split_pair(content) {
                keys.top.insert_first(k, v);
            }
        }
        keys
    }

    fn int(&self, key: &str) -> Option<i32> {
        self.top.int(key)
    }

    fn float(&self, key: &str) -> Option<f32> {
        self.top.get(key)?.parse().ok()
    }

    fn platform(&self, target: &str) -> Option<&Entry<'a>> {
        self.platforms
            .iter()
            .find(|e| e.get("buildTarget") == Some(target))
    }
}

/// `key: value` with a non-empty scalar value.
fn split_pair(content: &str) -> Option<(&str, &str)> {
    let (key, value) = content.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXTURE_META: &str = "fileFormatVersion: 2
guid: 0123456789abcdef0123456789abcdef
TextureImporter:
  serializedVersion: 11
  mipmaps:
    mipMapMode: 0
  maxTextureSize: 2048
  textureType: 8
  platformSettings:
  - serializedVersion: 3
    buildTarget: DefaultTexturePlatform
    maxTextureSize: 2048
    textureCompression: 1
    compressionQuality: 50
    crunchedCompression: 0
    overridden: 0
  - serializedVersion: 3
    buildTarget: WebGL
    maxTextureSize: 512
    textureCompression: 2
    compressionQuality: 80
    crunchedCompression: 1
    overridden: 1
  - serializedVersion: 3
    buildTarget: Standalone
    maxTextureSize: 4096
    overridden: 0
  spriteSheet:
    serializedVersion: 2
  userData:
";

    fn project_with(path: &str, meta: &str) -> (tempfile::TempDir, MetaImporterSettings) {
        let dir = tempfile::tempdir().unwrap();
        let meta_path = dir.path().join(format!("{path}.meta"));
        std::fs::create_dir_all(meta_path.parent().unwrap()).unwrap();
        std::fs::write(&meta_path, meta).unwrap();
        let provider = MetaImporterSettings::new(dir.path());
        (dir, provider)
    }

    #[test]
    fn texture_uses_overridden_platform_entry() {
        let (_dir, provider) = project_with("Assets/hero.png", TEXTURE_META);
        let attrs = provider.texture("Assets/hero.png", "WebGL").unwrap();
        assert_eq!(attrs.texture_type, TextureType::Sprite);
        assert_eq!(attrs.max_size, 512);
        assert_eq!(attrs.compression, TextureCompression::High);
        assert!(attrs.crunched);
        assert_eq!(attrs.crunch_quality, 80);
    }

    #[test]
    fn texture_ignores_entries_that_are_not_overridden() {
        let (_dir, provider) = project_with("Assets/hero.png", TEXTURE_META);
        let attrs = provider.texture("Assets/hero.png", "Standalone").unwrap();
        assert_eq!(attrs.max_size, 2048);
        assert_eq!(attrs.compression, TextureCompression::Normal);
        assert!(!attrs.crunched);
        assert_eq!(attrs.crunch_quality, 50);
    }

    #[test]
    fn audio_and_model_settings() {
        let audio = "guid: aa\nAudioImporter:\n  defaultSettings:\n    loadType: 2\n    quality: 0.7\n";
        let (_dir, provider) = project_with("Assets/theme.ogg", audio);
        let attrs = provider.audio("Assets/theme.ogg", "WebGL").unwrap();
        assert_eq!(attrs.load_type, AudioLoadType::Streaming);
        assert!((attrs.quality - 0.7).abs() < 1e-6);

        let model = "guid: bb\nModelImporter:\n  meshes:\n    meshCompression: 3\n    isReadable: 1\n    optimizeMeshForGPU: 1\n  animations:\n    animationCompression: 3\n";
        let (_dir, provider) = project_with("Assets/chest.fbx", model);
        let attrs = provider.model("Assets/chest.fbx", "WebGL").unwrap();
        assert!(attrs.read_write);
        assert!(attrs.optimize_polygons);
        assert!(attrs.optimize_vertices);
        assert_eq!(attrs.mesh_compression, MeshCompression::High);
        assert_eq!(attrs.animation_compression, AnimationCompression::Optimal);
    }

    #[test]
    fn missing_meta_and_wrong_importer() {
        let (_dir, provider) = project_with("Assets/hero.png", TEXTURE_META);
        assert!(matches!(
            provider.texture("Assets/none.png", "WebGL"),
            Err(AttributeError::Missing { .. })
        ));
        assert!(matches!(
            provider.audio("Assets/hero.png", "WebGL"),
            Err(AttributeError::Unreadable { .. })
        ));
    }
}
