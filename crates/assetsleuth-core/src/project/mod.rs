/// Filesystem-backed project environment.
///
/// [`ProjectIndex::open`] walks `Assets/` (and embedded `Packages/`) with
/// `jwalk`, pairs every asset with the GUID from its `.meta` file, and
/// extracts direct references from YAML-serialised assets in parallel with
/// `rayon`. The resulting reference graph answers the recursive dependency
/// queries the resolver needs.
pub mod build_settings;
pub mod importer;
pub mod meta;

pub use importer::MetaImporterSettings;

use crate::error::ProjectError;
use crate::resolver::kind::extension_of;
use crate::resolver::{dependency_closure, MainType, ProjectEnvironment};
use compact_str::CompactString;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Top-level folders holding project assets.
const ASSET_ROOTS: [&str; 2] = ["Assets", "Packages"];

/// Location of the build scene list, relative to the project root.
const BUILD_SETTINGS: &str = "ProjectSettings/EditorBuildSettings.asset";

/// An indexed project directory.
#[derive(Debug, Clone)]
pub struct ProjectIndex {
    root: PathBuf,
    /// Sorted project-relative asset paths.
    paths: Vec<String>,
    types: HashMap<String, MainType>,
    /// Direct references, by project-relative path.
    edges: HashMap<String, Vec<String>>,
    scenes: Vec<String>,
    /// Entries that could not be read while indexing.
    error_count: u64,
}

impl ProjectIndex {
    /// Index the project rooted at `root`.
    ///
    /// Unreadable individual files are logged and counted, not fatal; only a
    /// missing `Assets/` folder or an unreadable build settings file fails.
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        let start = Instant::now();
        if !root.join("Assets").is_dir() {
            return Err(ProjectError::NotAProject {
                path: root.to_path_buf(),
            });
        }

        let mut error_count: u64 = 0;
        let mut paths = Vec::new();
        for top in ASSET_ROOTS {
            let dir = root.join(top);
            if dir.is_dir() {
                error_count += walk_assets(root, &dir, &mut paths);
            }
        }
        paths.sort();

        // GUIDs come from sibling .meta files; read them in parallel.
        let guids: Vec<(CompactString, String)> = paths
            .par_iter()
            .filter_map(|rel| {
                let meta_path = root.join(format!("{rel}.meta"));
                let text = std::fs::read_to_string(&meta_path).ok()?;
                meta::parse_meta_guid(&text).map(|guid| (guid, rel.clone()))
            })
            .collect();
        let by_guid: HashMap<CompactString, String> = guids.into_iter().collect();

        let edges: HashMap<String, Vec<String>> = paths
            .par_iter()
            .filter(|rel| meta::may_reference_assets(extension_of(rel).as_deref()))
            .filter_map(|rel| {
                let text = match std::fs::read_to_string(root.join(rel)) {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(path = %rel, "Could not read asset for references: {err}");
                        return None;
                    }
                };
                if !meta::is_text_serialised(&text) {
                    debug!(path = %rel, "Binary-serialised asset; references not scanned");
                    return None;
                }
                let mut deps: Vec<String> = Vec::new();
                for guid in meta::referenced_guids(&text) {
                    if let Some(dep) = by_guid.get(guid) {
                        if dep != rel && !deps.contains(dep) {
                            deps.push(dep.clone());
                        }
                    }
                }
                Some((rel.clone(), deps))
            })
            .collect();

        let types = paths
            .iter()
            .map(|p| (p.clone(), MainType::from_path(p)))
            .collect();

        let settings_path = root.join(BUILD_SETTINGS);
        let scenes = if settings_path.is_file() {
            let text =
                std::fs::read_to_string(&settings_path).map_err(|source| ProjectError::Io {
                    path: settings_path.clone(),
                    source,
                })?;
            build_settings::parse_build_scenes(&text)
        } else {
            warn!(
                "{} not found; no build scenes will be analysed",
                settings_path.display()
            );
            Vec::new()
        };

        info!(
            root = %root.display(),
            assets = paths.len(),
            guids = by_guid.len(),
            referencing = edges.len(),
            scenes = scenes.len(),
            errors = error_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Indexed project"
        );

        Ok(Self {
            root: root.to_path_buf(),
            paths,
            types,
            edges,
            scenes,
            error_count,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed assets.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Entries skipped because they could not be read.
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Direct references of one asset.
    pub fn direct_dependencies(&self, path: &str) -> &[String] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or_default()
    }
}

impl ProjectEnvironment for ProjectIndex {
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
        dependency_closure(path, |p| self.direct_dependencies(p))
    }
}

/// Collect project-relative asset files under `dir` into `out`.
///
/// Hidden entries and `~`-suffixed folders are skipped, matching what the
/// editor imports. Returns the number of unreadable entries.
fn walk_assets(root: &Path, dir: &Path, out: &mut Vec<String>) -> u64 {
    let mut errors = 0;
    let walker = jwalk::WalkDir::new(dir)
        .skip_hidden(true)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()))
        .process_read_dir(|_depth, _path, _state, children| {
            children.retain(|entry| match entry {
                Ok(e) => {
                    !(e.file_type().is_dir() && e.file_name().to_string_lossy().ends_with('~'))
                }
                Err(_) => true,
            });
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                errors += 1;
                warn!("Skipping unreadable project entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "meta") {
            continue;
        }
        if let Some(rel) = relative_asset_path(root, &path) {
            out.push(rel);
        }
    }
    errors
}

/// `root/Assets/a/b.png` -> `Assets/a/b.png`, always with `/` separators.
fn relative_asset_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
