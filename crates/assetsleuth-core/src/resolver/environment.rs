/// What the resolver and analyses consume from the surrounding project.
///
/// [`ProjectEnvironment`] answers structural questions (scenes, paths, types,
/// dependencies); [`AttributeProvider`] answers per-asset importer-setting
/// lookups. Both are injected so the engine never talks to an editor
/// directly. In-memory implementations are provided for embedding and tests;
/// [`ProjectIndex`](crate::project::ProjectIndex) reads a project from disk.
use super::kind::MainType;
use crate::error::AttributeError;
use crate::model::attributes::{AudioAttributes, ModelAttributes, TextureAttributes};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Structural view of a project.
pub trait ProjectEnvironment: Send + Sync {
    /// Paths of the scenes enabled in the build settings, in build order.
    fn build_scenes(&self) -> Vec<String>;

    /// Every asset path in the project.
    fn asset_paths(&self) -> Vec<String>;

    /// Main type of the asset at `path`.
    fn main_type(&self, path: &str) -> MainType;

    /// Recursive dependencies of `path`, including `path` itself.
    fn dependencies(&self, path: &str) -> Vec<String>;
}

/// Per-asset importer settings for one platform.
pub trait AttributeProvider: Send + Sync {
    fn texture(&self, path: &str, platform: &str) -> Result<TextureAttributes, AttributeError>;
    fn audio(&self, path: &str, platform: &str) -> Result<AudioAttributes, AttributeError>;
    fn model(&self, path: &str, platform: &str) -> Result<ModelAttributes, AttributeError>;
}

/// Transitive closure of `root` over `direct` edges, `root` first.
///
/// Breadth-first with a visited set, so reference cycles terminate. The
/// result is deterministic for deterministic `direct`.
pub fn dependency_closure<'a, F>(root: &'a str, direct: F) -> Vec<String>
where
    F: Fn(&str) -> &'a [String],
{
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([root]);
    seen.insert(root);

    while let Some(path) = queue.pop_front() {
        order.push(path.to_string());
        for dep in direct(path) {
            if seen.insert(dep.as_str()) {
                queue.push_back(dep.as_str());
            }
        }
    }
    order
}

/// A project held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProject {
    scenes: Vec<String>,
    types: HashMap<String, MainType>,
    /// Asset paths in insertion order.
    paths: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

impl MemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset with an explicit main type.
    pub fn add_asset(&mut self, path: &str, main_type: MainType) -> &mut Self {
        if self.types.insert(path.to_string(), main_type).is_none() {
            self.paths.push(path.to_string());
        }
        self
    }

    /// Register an asset classified by its extension.
    pub fn add(&mut self, path: &str) -> &mut Self {
        self.add_asset(path, MainType::from_path(path))
    }

    /// Record that `from` references `to` directly.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> &mut Self {
        self.edges
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
        self
    }

    /// Add a scene to the enabled build scenes.
    pub fn add_build_scene(&mut self, path: &str) -> &mut Self {
        self.add(path);
        self.scenes.push(path.to_string());
        self
    }
}

impl ProjectEnvironment for MemoryProject {
    fn build_scenes(&self) -> Vec<String> {
        self.scenes.clone()
    }

    fn asset_paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    fn main_type(&self, path: &str) -> MainType {
        self.types
            .get(path)
            .copied()
            .unwrap_or_else(|| MainType::from_path(path))
    }

    fn dependencies(&self, path: &str) -> Vec<String> {
        dependency_closure(path, |p| {
            self.edges.get(p).map(Vec::as_slice).unwrap_or_default()
        })
    }
}

/// Importer settings held in memory, keyed by asset path.
///
/// Settings are stored per path only; the platform argument is accepted
/// for interface parity and not used to discriminate.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttributes {
    pub textures: HashMap<String, TextureAttributes>,
    pub audio: HashMap<String, AudioAttributes>,
    pub models: HashMap<String, ModelAttributes>,
    /// Paths whose importer "cannot be read", with the reason.
    pub unreadable: HashMap<String, String>,
}

impl MemoryAttributes {
    fn lookup<A: Clone>(
        &self,
        table: &HashMap<String, A>,
        path: &str,
    ) -> Result<A, AttributeError> {
        if let Some(reason) = self.unreadable.get(path) {
            return Err(AttributeError::Unreadable {
                path: path.to_string(),
                reason: reason.clone(),
            });
        }
        table.get(path).cloned().ok_or_else(|| AttributeError::Missing {
            path: path.to_string(),
        })
    }
}

impl AttributeProvider for MemoryAttributes {
    fn texture(&self, path: &str, _platform: &str) -> Result<TextureAttributes, AttributeError> {
        self.lookup(&self.textures, path)
    }

    fn audio(&self, path: &str, _platform: &str) -> Result<AudioAttributes, AttributeError> {
        self.lookup(&self.audio, path)
    }

    fn model(&self, path: &str, _platform: &str) -> Result<ModelAttributes, AttributeError> {
        self.lookup(&self.models, path)
    }
}
