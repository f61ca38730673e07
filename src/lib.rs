//! adream-blog: content toolkit for the Adream blog
//!
//! Loads posts and projects from a blog checkout, derives the filtered and
//! sorted post list shown on the blog index, renders single posts and
//! migrates front-matter of older markdown trees into the blog's format.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod list;
pub mod migrate;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A blog checkout on disk
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding `*.md` / `*.mdx` posts
    pub posts_dir: PathBuf,
    /// Directory holding `projects.json`
    pub data_dir: PathBuf,
}

impl Blog {
    /// Open a blog rooted at `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a blog from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let data_dir = base_dir.join(&config.data_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            data_dir,
        }
    }

    /// Path of the project showcase file
    pub fn projects_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.projects_file)
    }

    /// Content loader for this blog
    pub fn loader(&self) -> content::loader::ContentLoader<'_> {
        content::loader::ContentLoader::new(self)
    }
}
