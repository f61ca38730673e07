//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Base URL that post permalinks hang off
    pub url: String,

    // Content locations, relative to the base directory
    pub posts_dir: String,
    pub data_dir: String,
    pub projects_file: String,
    /// File names inside `posts_dir` that are pages, not posts
    pub exclude: Vec<String>,

    // Rendering
    /// Characters read per minute, used for the reading-time estimate
    pub reading_speed: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub migrate: MigrateConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Adream 小站".to_string(),
            url: "https://adream-ki.github.io".to_string(),

            posts_dir: "posts".to_string(),
            data_dir: "data".to_string(),
            projects_file: "projects.json".to_string(),
            exclude: vec!["about.md".to_string()],

            reading_speed: 250,
            highlight: HighlightConfig::default(),

            migrate: MigrateConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Whether a file name in the posts directory should be skipped
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|e| e == file_name)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Defaults for the front-matter migration command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    pub source_dir: String,
    pub output_dir: String,
    /// Tag written when a document has none
    pub placeholder_tag: String,
    /// Description written when a document has neither description nor title
    pub placeholder_description: String,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            source_dir: "./docs_backup".to_string(),
            output_dir: "./migrated-posts".to_string(),
            placeholder_tag: "待分类".to_string(),
            placeholder_description: "暂无描述".to_string(),
        }
    }
}
