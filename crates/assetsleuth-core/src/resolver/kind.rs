/// Asset classification and the kind predicate a resolution filters by.
use compact_str::CompactString;
use std::path::Path;

/// Main asset type as classified by the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainType {
    Texture2D,
    AudioClip,
    /// Models and prefabs both import as game objects.
    GameObject,
    Material,
    Scene,
    Other,
}

impl MainType {
    /// Classify by file extension, the way the editor's importers do.
    pub fn from_path(path: &str) -> Self {
        match extension_of(path).as_deref() {
            Some(
                ".png" | ".jpg" | ".jpeg" | ".tga" | ".psd" | ".tif" | ".tiff" | ".bmp" | ".gif"
                | ".exr" | ".hdr" | ".iff" | ".pict",
            ) => Self::Texture2D,
            Some(".wav" | ".mp3" | ".ogg" | ".aif" | ".aiff" | ".flac" | ".mod" | ".it" | ".xm") => {
                Self::AudioClip
            }
            Some(
                ".fbx" | ".dae" | ".3ds" | ".dxf" | ".obj" | ".blend" | ".max" | ".ma" | ".mb"
                | ".prefab",
            ) => Self::GameObject,
            Some(".mat") => Self::Material,
            Some(".unity") => Self::Scene,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Texture2D => "Texture2D",
            Self::AudioClip => "AudioClip",
            Self::GameObject => "GameObject",
            Self::Material => "Material",
            Self::Scene => "Scene",
            Self::Other => "Other",
        }
    }
}

/// Lower-cased extension including the dot, e.g. `".fbx"`.
pub fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// Which assets a resolution keeps: a main type plus an optional
/// extension allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetKind {
    pub main_type: MainType,
    /// Lower-case extensions with leading dot. `None` accepts any.
    pub extensions: Option<Vec<CompactString>>,
}

impl AssetKind {
    pub fn new(main_type: MainType) -> Self {
        Self {
            main_type,
            extensions: None,
        }
    }

    /// Restrict to the given extensions (case and leading dot optional).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = Some(
            extensions
                .into_iter()
                .map(|e| {
                    let e = e.as_ref().trim_start_matches('.').to_ascii_lowercase();
                    CompactString::from(format!(".{e}"))
                })
                .collect(),
        );
        self
    }

    pub fn textures() -> Self {
        Self::new(MainType::Texture2D)
    }

    pub fn audio() -> Self {
        Self::new(MainType::AudioClip)
    }

    /// Model files: game objects whose extension is a model format, which
    /// keeps prefabs out.
    pub fn models<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(MainType::GameObject).with_extensions(extensions)
    }

    /// Does an asset at `path` with this classification belong to the kind?
    pub fn matches(&self, path: &str, main_type: MainType) -> bool {
        if main_type != self.main_type {
            return false;
        }
        match &self.extensions {
            None => true,
            Some(allowed) => extension_of(path)
                .is_some_and(|ext| allowed.iter().any(|a| a.as_str() == ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL_EXTENSIONS;

    #[test]
    fn classify_by_extension() {
        assert_eq!(MainType::from_path("Assets/a.PNG"), MainType::Texture2D);
        assert_eq!(MainType::from_path("Assets/a.ogg"), MainType::AudioClip);
        assert_eq!(MainType::from_path("Assets/a.fbx"), MainType::GameObject);
        assert_eq!(MainType::from_path("Assets/a.prefab"), MainType::GameObject);
        assert_eq!(MainType::from_path("Assets/Main.unity"), MainType::Scene);
        assert_eq!(MainType::from_path("Assets/readme"), MainType::Other);
    }

    #[test]
    fn model_kind_excludes_prefabs() {
        let kind = AssetKind::models(DEFAULT_MODEL_EXTENSIONS);
        assert!(kind.matches("Assets/Hero.FBX", MainType::GameObject));
        assert!(!kind.matches("Assets/Hero.prefab", MainType::GameObject));
        assert!(!kind.matches("Assets/Hero.fbx", MainType::Other));
    }

    #[test]
    fn extensions_are_normalised() {
        let kind = AssetKind::new(MainType::Texture2D).with_extensions(["PNG", ".tga"]);
        assert!(kind.matches("Assets/a.png", MainType::Texture2D));
        assert!(kind.matches("Assets/a.tga", MainType::Texture2D));
        assert!(!kind.matches("Assets/a.psd", MainType::Texture2D));
    }
}
