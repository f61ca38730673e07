//! Content module - posts, projects and markdown rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::{reading_minutes, MarkdownRenderer};
pub use post::{LinkKind, PostContent, PostMetadata, Project, ProjectLink};

/// Whether a file name carries a post extension (`.md` or `.mdx`)
pub fn is_post_file(file_name: &str) -> bool {
    file_name.ends_with(".md") || file_name.ends_with(".mdx")
}

/// Slug of a post file: its name without the `.md` / `.mdx` extension
pub fn slug_from_file_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(".mdx")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(file_name)
}
