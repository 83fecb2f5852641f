use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tessera_assets::{FaceOptions, SearchPaths};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "tessera.toml";

/// Settings read from `tessera.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Font file path or name to search for.
    pub font: String,
    /// Searched before `TESSERA_FONT_PATH` and the system directories.
    pub search_dirs: Vec<PathBuf>,
    pub log_level: String,
    pub triangulate_on_load: bool,
    pub merge_contours: bool,
    /// String to build meshes for.
    pub text: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            font: "DejaVuSans".to_string(),
            search_dirs: Vec::new(),
            log_level: "info".to_string(),
            triangulate_on_load: true,
            merge_contours: true,
            text: "Hello, world!".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Like [`AppConfig::load`], but a missing file gives the defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_font(mut self, font: &str) -> Self {
        self.font = font.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Configured directories, then `TESSERA_FONT_PATH`, then the system
    /// font directories.
    pub fn search_paths(&self) -> SearchPaths {
        let mut paths = SearchPaths::new(self.search_dirs.iter().cloned());
        paths.extend(SearchPaths::from_env());
        paths.extend(SearchPaths::system());
        paths
    }

    pub fn face_options(&self) -> FaceOptions {
        FaceOptions {
            triangulate_on_load: self.triangulate_on_load,
            merge_contours: self.merge_contours,
        }
    }

    pub fn level_filter(&self) -> anyhow::Result<log::LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("invalid log level '{}'", self.log_level))
    }
}
