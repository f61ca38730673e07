//! Post and Project models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::FrontMatter;
use crate::helpers::parse_date_string;

/// Metadata of a blog post, as shown in lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Post title
    pub title: String,

    /// Publication date as written in the front-matter (not validated)
    pub date: String,

    /// Short summary shown on post cards
    pub description: String,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    /// Optional category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// File name without the `.md` / `.mdx` extension
    pub slug: String,
}

impl PostMetadata {
    /// Build metadata from parsed front-matter, filling in defaults.
    ///
    /// `today` is used when the date is missing.
    pub fn from_front_matter(fm: &FrontMatter, slug: &str, today: &str) -> Self {
        Self {
            title: non_empty(fm.title.as_deref()).unwrap_or("Untitled").to_string(),
            date: non_empty(fm.date.as_deref()).unwrap_or(today).to_string(),
            description: fm.description.clone().unwrap_or_default(),
            tags: fm.tags.clone(),
            category: non_empty(fm.category.as_deref()).map(str::to_string),
            slug: slug.to_string(),
        }
    }

    /// Parsed publication date, `None` when the date string is not a date
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// A single post: front-matter, raw markdown body and resolved metadata
#[derive(Debug, Clone)]
pub struct PostContent {
    pub front_matter: FrontMatter,
    /// Markdown after the front-matter block
    pub content: String,
    pub meta: PostMetadata,
}

impl PostContent {
    /// Estimated reading time in minutes, rounded up
    pub fn reading_minutes(&self, chars_per_minute: usize) -> usize {
        super::reading_minutes(&self.content, chars_per_minute)
    }

    /// Browser title for the post page
    pub fn page_title(&self, site_title: &str) -> String {
        format!("{} - {}", self.meta.title, site_title)
    }

    /// Comma separated tags for the keywords meta tag
    pub fn keywords(&self) -> String {
        self.meta.tags.join(", ")
    }

    /// Public address of the post under the site's base URL
    pub fn permalink(&self, site_url: &str) -> String {
        format!("{}/blog/{}", site_url.trim_end_matches('/'), self.meta.slug)
    }
}

/// A showcased project from `projects.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

/// What a project link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Source,
    Demo,
    External,
}

impl LinkKind {
    /// Button label on the projects page
    pub fn label(&self) -> &'static str {
        match self {
            LinkKind::Source => "源码",
            LinkKind::Demo => "演示",
            LinkKind::External => "查看项目",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLink<'a> {
    pub kind: LinkKind,
    pub url: &'a str,
}

impl Project {
    /// Links to display for this project.
    ///
    /// The generic `link` only shows up when there is neither a repository
    /// nor a demo.
    pub fn links(&self) -> Vec<ProjectLink<'_>> {
        let mut links = Vec::new();
        if let Some(url) = self.github.as_deref() {
            links.push(ProjectLink {
                kind: LinkKind::Source,
                url,
            });
        }
        if let Some(url) = self.demo.as_deref() {
            links.push(ProjectLink {
                kind: LinkKind::Demo,
                url,
            });
        }
        if links.is_empty() {
            if let Some(url) = self.link.as_deref() {
                links.push(ProjectLink {
                    kind: LinkKind::External,
                    url,
                });
            }
        }
        links
    }
}
