/// Dependency resolver: which assets of a kind actually ship.
///
/// An asset ships when it is reachable from an enabled build scene, or from
/// any asset inside a qualifying `Resources` folder (those are packaged even
/// without a scene reference). The resolver unions both closures, filters by
/// kind, and drops `Packages/` paths at the very end when asked to, so a
/// project texture referenced only through a package prefab is still found.
pub mod attribute_file;
pub mod environment;
pub mod kind;
pub mod resources;

pub use attribute_file::{load_attribute_file, parse_attribute_json};
pub use environment::{
    dependency_closure, AttributeProvider, MemoryAttributes, MemoryProject, ProjectEnvironment,
};
pub use kind::{AssetKind, MainType};
pub use resources::is_in_resources_folder;

use crate::model::rows::is_package_path;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Resolves the shipped asset set of a kind against a project environment.
pub struct DependencyResolver<'a> {
    env: &'a dyn ProjectEnvironment,
    include_packages: bool,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(env: &'a dyn ProjectEnvironment) -> Self {
        Self {
            env,
            include_packages: false,
        }
    }

    /// Keep `Packages/`-rooted paths in the result.
    pub fn include_packages(mut self, include: bool) -> Self {
        self.include_packages = include;
        self
    }

    /// Sorted, deduplicated paths of every shipped asset matching `kind`.
    pub fn resolve(&self, kind: &AssetKind) -> Vec<String> {
        self.resolve_until(kind, || false).unwrap_or_default()
    }

    /// Like [`resolve`](Self::resolve), polling `should_stop` before each
    /// root; returns `None` as soon as it reports `true`.
    pub fn resolve_until<F>(&self, kind: &AssetKind, should_stop: F) -> Option<Vec<String>>
    where
        F: Fn() -> bool,
    {
        let start = Instant::now();
        let mut found: BTreeSet<String> = BTreeSet::new();

        let scenes = self.env.build_scenes();
        for scene in &scenes {
            if should_stop() {
                return None;
            }
            self.collect_matching(scene, kind, &mut found);
        }
        let from_scenes = found.len();

        let resources: Vec<String> = self
            .env
            .asset_paths()
            .into_iter()
            .filter(|p| is_in_resources_folder(p))
            .collect();
        for path in &resources {
            if should_stop() {
                return None;
            }
            self.collect_matching(path, kind, &mut found);
        }

        // Only the final result is filtered; traversal above walked packages too.
        let before_filter = found.len();
        if !self.include_packages {
            found.retain(|p| !is_package_path(p));
        }

        info!(
            kind = kind.main_type.label(),
            scenes = scenes.len(),
            resources = resources.len(),
            from_scenes,
            total = found.len(),
            dropped_packages = before_filter - found.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Resolved shipped assets"
        );
        Some(found.into_iter().collect())
    }

    fn collect_matching(&self, root: &str, kind: &AssetKind, found: &mut BTreeSet<String>) {
        let deps = self.env.dependencies(root);
        debug!(root, dependencies = deps.len(), "Walking dependency closure");
        for dep in deps {
            if kind.matches(&dep, self.env.main_type(&dep)) {
                found.insert(dep);
            }
        }
    }
}
