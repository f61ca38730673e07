//! Show a single post

use anyhow::Result;
use std::fmt::Write;

use crate::content::MarkdownRenderer;
use crate::Blog;

/// Print a post's header and its body, rendered or raw
pub fn run(blog: &Blog, slug: &str, raw: bool) -> Result<()> {
    match render(blog, slug, raw)? {
        Some(text) => print!("{}", text),
        None => anyhow::bail!("文章未找到: {}", slug),
    }
    Ok(())
}

/// Build the text for a post, `None` when the slug does not exist
pub fn render(blog: &Blog, slug: &str, raw: bool) -> Result<Option<String>> {
    let Some(post) = blog.loader().get_post_content(slug) else {
        return Ok(None);
    };

    let mut out = String::new();
    writeln!(out, "{}", post.page_title(&blog.config.title))?;
    if let Some(category) = &post.meta.category {
        writeln!(out, "分类: {}", category)?;
    }
    writeln!(out, "日期: {}", post.meta.date)?;
    writeln!(
        out,
        "阅读: 约 {} 分钟",
        post.reading_minutes(blog.config.reading_speed)
    )?;
    if !post.meta.tags.is_empty() {
        writeln!(out, "标签: {}", post.keywords())?;
    }
    writeln!(out, "链接: {}", post.permalink(&blog.config.url))?;
    out.push('\n');

    if raw {
        out.push_str(&post.content);
    } else {
        let renderer = MarkdownRenderer::from_config(&blog.config.highlight);
        out.push_str(&renderer.render(&post.content));
    }

    Ok(Some(out))
}
