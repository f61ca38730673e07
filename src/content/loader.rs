//! Content loader - reads posts and projects from disk
//!
//! Every public operation recovers from missing or malformed content:
//! callers receive an empty list or `None`, and the cause is logged.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{is_post_file, slug_from_file_name, FrontMatter, PostContent, PostMetadata, Project};
use crate::error::{ContentError, Result};
use crate::helpers::today_iso;
use crate::list::{sort_posts, SortKey};
use crate::Blog;

/// Loads content from the blog's posts and data directories
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    /// Date given to posts without one
    today: String,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            today: today_iso(),
        }
    }

    /// Override the date used for posts without a `date` field
    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = today.into();
        self
    }

    /// Load metadata of all posts, newest first
    pub fn load_posts(&self) -> Vec<PostMetadata> {
        match self.read_posts() {
            Ok(posts) => posts,
            Err(ContentError::Missing { path }) => {
                tracing::warn!(
                    "Posts directory {:?} not found. Create it for local testing.",
                    path
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Failed to read posts: {}", e);
                Vec::new()
            }
        }
    }

    fn read_posts(&self) -> Result<Vec<PostMetadata>> {
        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.is_dir() {
            return Err(ContentError::missing(posts_dir));
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", posts_dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if !is_post_file(file_name) || self.blog.config.is_excluded(file_name) {
                continue;
            }

            match self.read_post(entry.path(), slug_from_file_name(file_name)) {
                Ok(post) => posts.push(post.meta),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", entry.path(), e),
            }
        }

        sort_posts(&mut posts, SortKey::DateDesc);
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), posts_dir);

        Ok(posts)
    }

    fn read_post(&self, path: &Path, slug: &str) -> Result<PostContent> {
        let raw = fs::read_to_string(path)?;
        let (front_matter, body) = FrontMatter::parse(&raw);
        let meta = PostMetadata::from_front_matter(&front_matter, slug, &self.today);

        Ok(PostContent {
            content: body.to_string(),
            front_matter,
            meta,
        })
    }

    /// Load a single post by slug, trying `.md` before `.mdx`
    pub fn get_post_content(&self, slug: &str) -> Option<PostContent> {
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
            tracing::warn!("Rejected post slug {:?}", slug);
            return None;
        }

        let posts_dir = &self.blog.posts_dir;
        if !posts_dir.is_dir() {
            return None;
        }

        let path = ["md", "mdx"]
            .iter()
            .map(|ext| posts_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())?;

        match self.read_post(&path, slug) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", path, e);
                None
            }
        }
    }

    /// All distinct tags across posts, sorted
    pub fn all_tags(&self) -> Vec<String> {
        self.load_posts()
            .into_iter()
            .flat_map(|post| post.tags)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Posts carrying `tag`, newest first
    pub fn posts_by_tag(&self, tag: &str) -> Vec<PostMetadata> {
        self.load_posts()
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect()
    }

    /// Load the project showcase from the data directory
    pub fn load_projects(&self) -> Vec<Project> {
        match self.read_projects() {
            Ok(projects) => projects,
            Err(ContentError::Missing { path }) => {
                tracing::warn!(
                    "Projects file {:?} not found. Create it for local testing.",
                    path
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Error parsing projects: {}", e);
                Vec::new()
            }
        }
    }

    fn read_projects(&self) -> Result<Vec<Project>> {
        let path = self.blog.projects_path();
        if !path.is_file() {
            return Err(ContentError::missing(path));
        }

        let content = fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| ContentError::malformed(&path, e.to_string()))?;

        if !value.is_array() {
            return Err(ContentError::malformed(&path, "top level is not an array"));
        }

        serde_json::from_value(value).map_err(|e| ContentError::malformed(&path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn post(title: &str, date: &str, tags: &str) -> String {
        format!(
            "---\ntitle: \"{}\"\ndate: \"{}\"\ndescription: \"about {}\"\ntags: {}\n---\n\nBody of {}.\n",
            title, date, title, tags, title
        )
    }

    fn blog_with_posts() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write(&posts, "welcome.md", &post("Welcome", "2024-01-15", r#"["测试", "欢迎"]"#));
        write(&posts, "nextjs-14.mdx", &post("Next.js 14", "2024-01-20", r#"["React", "前端"]"#));
        write(&posts, "tailwind-tips.md", &post("Tailwind", "2024-01-25", r#"["CSS", "前端"]"#));
        write(&posts, "about.md", &post("关于我", "2024-01-01", "[]"));
        write(&posts, "notes.txt", "not a post");
        fs::create_dir_all(posts.join("drafts")).unwrap();
        write(&posts.join("drafts"), "nested.md", &post("Nested", "2024-02-01", "[]"));

        let blog = Blog::new(tmp.path()).unwrap();
        (tmp, blog)
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let (_tmp, blog) = blog_with_posts();
        let posts = ContentLoader::new(&blog).load_posts();

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["tailwind-tips", "nextjs-14", "welcome"]);
        assert_eq!(posts[1].title, "Next.js 14");
        assert_eq!(posts[1].description, "about Next.js 14");
    }

    #[test]
    fn test_missing_posts_directory() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        let loader = ContentLoader::new(&blog);

        assert!(loader.load_posts().is_empty());
        assert!(loader.get_post_content("welcome").is_none());
        assert!(loader.all_tags().is_empty());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("posts"), "bare.md", "# No front-matter here\n");
        let blog = Blog::new(tmp.path()).unwrap();

        let posts = ContentLoader::new(&blog).with_today("2026-10-18").load_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Untitled");
        assert_eq!(posts[0].date, "2026-10-18");
        assert_eq!(posts[0].description, "");
        assert!(posts[0].tags.is_empty());
        assert_eq!(posts[0].slug, "bare");
    }

    #[test]
    fn test_malformed_front_matter_falls_back() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("posts"),
            "broken.md",
            "---\ntitle: [oops\n---\nstill readable\n",
        );
        let blog = Blog::new(tmp.path()).unwrap();
        let loader = ContentLoader::new(&blog).with_today("2026-10-18");

        let posts = loader.load_posts();
        assert_eq!(posts[0].title, "Untitled");

        let post = loader.get_post_content("broken").unwrap();
        assert!(post.content.contains("still readable"));
    }

    #[test]
    fn test_get_post_content() {
        let (_tmp, blog) = blog_with_posts();
        let loader = ContentLoader::new(&blog);

        let post = loader.get_post_content("nextjs-14").unwrap();
        assert_eq!(post.meta.title, "Next.js 14");
        assert_eq!(post.front_matter.date.as_deref(), Some("2024-01-20"));
        assert!(post.content.contains("Body of Next.js 14."));
        assert_eq!(post.page_title("Adream 小站"), "Next.js 14 - Adream 小站");
        assert_eq!(post.keywords(), "React, 前端");

        // excluded from lists but still addressable
        assert!(loader.get_post_content("about").is_some());
        assert!(loader.get_post_content("missing").is_none());
    }

    #[test]
    fn test_md_preferred_over_mdx() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        write(&posts, "dup.md", &post("From md", "2024-01-01", "[]"));
        write(&posts, "dup.mdx", &post("From mdx", "2024-01-01", "[]"));
        let blog = Blog::new(tmp.path()).unwrap();

        let post = ContentLoader::new(&blog).get_post_content("dup").unwrap();
        assert_eq!(post.meta.title, "From md");
    }

    #[test]
    fn test_slug_traversal_rejected() {
        let (tmp, blog) = blog_with_posts();
        write(tmp.path(), "secret.md", &post("Secret", "2024-01-01", "[]"));
        let loader = ContentLoader::new(&blog);

        assert!(loader.get_post_content("../secret").is_none());
        assert!(loader.get_post_content("drafts/nested").is_none());
        assert!(loader.get_post_content("").is_none());
    }

    #[test]
    fn test_tags() {
        let (_tmp, blog) = blog_with_posts();
        let loader = ContentLoader::new(&blog);

        assert_eq!(loader.all_tags(), vec!["CSS", "React", "前端", "欢迎", "测试"]);

        let frontend: Vec<_> = loader
            .posts_by_tag("前端")
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(frontend, vec!["tailwind-tips", "nextjs-14"]);
        assert!(loader.posts_by_tag("前").is_empty());
    }

    #[test]
    fn test_load_projects() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("data"),
            "projects.json",
            r#"[
  {"title": "Adream 小站", "description": "blog", "tags": ["Next.js"],
   "github": "https://github.com/adream-ki/adream-ki.github.io"},
  {"title": "示例项目 B", "description": "demo", "tags": ["Vue"], "demo": "https://example.com/b"}
]"#,
        );
        let blog = Blog::new(tmp.path()).unwrap();

        let projects = ContentLoader::new(&blog).load_projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Adream 小站");
        assert_eq!(projects[1].demo.as_deref(), Some("https://example.com/b"));
        assert_eq!(projects[1].github, None);
    }

    #[test]
    fn test_missing_projects_file() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert!(ContentLoader::new(&blog).load_projects().is_empty());
    }

    #[test]
    fn test_invalid_projects_json() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("data");
        write(&data, "projects.json", "not valid json");
        let blog = Blog::new(tmp.path()).unwrap();
        assert!(ContentLoader::new(&blog).load_projects().is_empty());

        write(&data, "projects.json", r#"{"title": "not an array"}"#);
        assert!(ContentLoader::new(&blog).load_projects().is_empty());
    }
}
