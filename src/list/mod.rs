//! Blog list view-model
//!
//! The visible post list is a pure function of the full list, the filter
//! parameters and the sort key. Nothing is memoized; callers re-derive the
//! list whenever a parameter changes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::content::PostMetadata;

/// Filter parameters. An empty field matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive text searched in title and description
    pub query: String,
    /// Exact tag the post must carry
    pub tag: String,
    /// Exact category the post must have
    pub category: String,
}

impl PostFilter {
    pub fn new(
        query: impl Into<String>,
        tag: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            tag: tag.into(),
            category: category.into(),
        }
    }

    /// Whether any of the three predicates narrows the list
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.tag.is_empty() || !self.category.is_empty()
    }

    /// Test a single post against all three predicates
    pub fn matches(&self, post: &PostMetadata) -> bool {
        self.matches_query(post) && self.matches_tag(post) && self.matches_category(post)
    }

    fn matches_query(&self, post: &PostMetadata) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        post.title.to_lowercase().contains(&needle)
            || post.description.to_lowercase().contains(&needle)
    }

    fn matches_tag(&self, post: &PostMetadata) -> bool {
        self.tag.is_empty() || post.has_tag(&self.tag)
    }

    fn matches_category(&self, post: &PostMetadata) -> bool {
        self.category.is_empty() || post.category.as_deref() == Some(self.category.as_str())
    }
}

/// Ordering of the visible list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    /// Label shown in the sort dropdown
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "最新发布",
            SortKey::DateAsc => "最早发布",
            SortKey::TitleAsc => "标题 A-Z",
            SortKey::TitleDesc => "标题 Z-A",
        }
    }

    fn compare(&self, a: &PostMetadata, b: &PostMetadata) -> Ordering {
        match self {
            SortKey::DateDesc => b.parsed_date().cmp(&a.parsed_date()),
            SortKey::DateAsc => a.parsed_date().cmp(&b.parsed_date()),
            SortKey::TitleAsc => compare_titles(&a.title, &b.title),
            SortKey::TitleDesc => compare_titles(&b.title, &a.title),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown sort key: {}. Available: date-desc, date-asc, title-asc, title-desc",
                    s
                )
            })
    }
}

/// Compare titles the way a reader expects.
///
/// Primary order ignores case and accents and ranks symbols before digits
/// before letters; accents break ties next, then case (lowercase first).
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| b.cmp(a))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_rank(c), c))
}

fn accent_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn char_rank(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Sort posts in place. The sort is stable; posts with unparsable dates
/// count as the oldest.
pub fn sort_posts(posts: &mut [PostMetadata], sort: SortKey) {
    posts.sort_by(|a, b| sort.compare(a, b));
}

/// Derive the visible list from the full list
pub fn filter_and_sort(
    posts: &[PostMetadata],
    filter: &PostFilter,
    sort: SortKey,
) -> Vec<PostMetadata> {
    let mut visible: Vec<PostMetadata> = posts
        .iter()
        .filter(|post| filter.matches(post))
        .cloned()
        .collect();
    sort_posts(&mut visible, sort);
    visible
}

/// Distinct non-empty categories in order of first appearance
pub fn categories(posts: &[PostMetadata]) -> Vec<String> {
    let mut seen = Vec::new();
    for category in posts.iter().filter_map(|p| p.category.as_deref()) {
        if !category.is_empty() && !seen.iter().any(|c: &String| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Result-count line shown above the list
pub fn summary(visible: usize, filter: &PostFilter) -> String {
    if filter.is_active() {
        format!("找到 {} 篇匹配的文章", visible)
    } else {
        format!("显示全部 {} 篇文章", visible)
    }
}
