//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::list::{self, PostFilter, SortKey};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, filter: &PostFilter, sort: SortKey) -> Result<()> {
    print!("{}", render(blog, content_type, filter, sort)?);
    Ok(())
}

/// Build the listing text for a content type
pub fn render(
    blog: &Blog,
    content_type: &str,
    filter: &PostFilter,
    sort: SortKey,
) -> Result<String> {
    let loader = blog.loader();
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts();
            let visible = list::filter_and_sort(&posts, filter, sort);
            writeln!(out, "{}", list::summary(visible.len(), filter))?;
            for post in &visible {
                write!(out, "  {} - {} [{}]", post.date, post.title, post.slug)?;
                if let Some(category) = &post.category {
                    write!(out, " ({})", category)?;
                }
                if !post.tags.is_empty() {
                    write!(out, " #{}", post.tags.join(" #"))?;
                }
                out.push('\n');
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts();
            let tags = loader.all_tags();
            writeln!(out, "Tags ({}):", tags.len())?;
            for tag in tags {
                let count = posts.iter().filter(|p| p.has_tag(&tag)).count();
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        "category" | "categories" => {
            let posts = loader.load_posts();
            let categories = list::categories(&posts);
            writeln!(out, "Categories ({}):", categories.len())?;
            for category in categories {
                let count = posts
                    .iter()
                    .filter(|p| p.category.as_deref() == Some(category.as_str()))
                    .count();
                writeln!(out, "  {} ({})", category, count)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(out)
}
