/// Row payloads carried by analysis trees.
use std::path::Path;

/// A shipped asset plus its kind-specific importer settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetRow<A> {
    /// Project-relative path, e.g. `Assets/Textures/hero.png`.
    pub path: String,
    pub attributes: A,
}

impl<A> AssetRow<A> {
    pub fn new(path: impl Into<String>, attributes: A) -> Self {
        Self {
            path: path.into(),
            attributes,
        }
    }

    /// File name shown as the row label.
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

/// Unit of a build-report size column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeUnit {
    #[default]
    Kb,
    Mb,
}

impl SizeUnit {
    /// Parse the report's unit token (`kb` / `mb`, any case).
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("kb") {
            Some(Self::Kb)
        } else if token.eq_ignore_ascii_case("mb") {
            Some(Self::Mb)
        } else {
            None
        }
    }

    /// Bytes per unit (binary multiples).
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Kb => 1024.0,
            Self::Mb => 1024.0 * 1024.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kb => "kb",
            Self::Mb => "mb",
        }
    }
}

/// One asset line of a build report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildLogRecord {
    pub size: f64,
    pub size_unit: SizeUnit,
    /// Share of the build, 0.0–100.0.
    pub size_percentage: f64,
    pub file_path: String,
}

impl BuildLogRecord {
    #[inline]
    pub fn size_in_bytes(&self) -> f64 {
        self.size * self.size_unit.multiplier()
    }

    pub fn file_name(&self) -> &str {
        file_name(&self.file_path)
    }
}

/// Rows that point back at a file in the project.
pub trait ProjectPath {
    /// Project-relative path of the row's file.
    fn project_path(&self) -> &str;
}

impl<A> ProjectPath for AssetRow<A> {
    fn project_path(&self) -> &str {
        &self.path
    }
}

impl ProjectPath for BuildLogRecord {
    fn project_path(&self) -> &str {
        &self.file_path
    }
}

/// Returns `true` for paths rooted in the `Packages/` folder.
#[inline]
pub fn is_package_path(path: &str) -> bool {
    path.starts_with("Packages/")
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}
