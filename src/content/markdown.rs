//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Markdown renderer for post bodies
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    highlight: HighlightConfig,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create a renderer honoring the site's highlight settings
    pub fn from_config(highlight: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            highlight: highlight.clone(),
        }
    }

    /// Render markdown to HTML.
    ///
    /// The input must already be stripped of its front-matter.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let block = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(block)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block, falling back to escaped plain text
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let plain = || {
            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            )
        };

        if !self.highlight.enable {
            return plain();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = match self
            .theme_set
            .themes
            .get(&self.highlight.theme)
            .or_else(|| self.theme_set.themes.values().next())
        {
            Some(theme) => theme,
            None => return plain(),
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.highlight.line_number => with_line_numbers(&highlighted, lang),
            Ok(highlighted) => format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                plain()
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted code in a gutter table
fn with_line_numbers(code: &str, lang: &str) -> String {
    let gutter = (1..=code.lines().count())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang, gutter, code
    )
}

/// Estimated reading time in minutes, rounded up.
///
/// Counts characters rather than words so CJK text is measured sensibly.
pub fn reading_minutes(text: &str, chars_per_minute: usize) -> usize {
    let chars = text.chars().count();
    chars.div_ceil(chars_per_minute.max(1))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# 欢迎\n\n欢迎来到我的个人博客！");
        assert!(html.contains("<h1>欢迎</h1>"));
        assert!(html.contains("<p>欢迎来到我的个人博客！</p>"));
    }

    #[test]
    fn test_render_code_block_highlighted() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight rust"));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_code_block_plain() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig {
            enable: false,
            ..Default::default()
        });
        let html = renderer.render("```\na < b\n```");
        assert!(html.contains(r#"<code class="language-text">a &lt; b"#));
    }

    #[test]
    fn test_render_line_numbers() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig {
            line_number: true,
            ..Default::default()
        });
        let html = renderer.render("```js\nlet a = 1;\nlet b = 2;\n```");
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes("", 250), 0);
        assert_eq!(reading_minutes("a", 250), 1);
        assert_eq!(reading_minutes(&"字".repeat(250), 250), 1);
        assert_eq!(reading_minutes(&"字".repeat(251), 250), 2);
    }
}
