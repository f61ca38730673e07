//! Front-matter migration
//!
//! Copies a tree of markdown documents into an output tree, rewriting each
//! front-matter block so that `title`, `date`, `description` and `tags` are
//! always present. Front-matter is read line by line as `key: value`
//! pairs, so documents with nested YAML keep only their flat keys.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::MigrateConfig;
use crate::content::{is_post_file, slug_from_file_name};
use crate::error::Result;
use crate::helpers::{date_from_file_name, today_iso};

lazy_static! {
    static ref META_LINE: Regex = Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").unwrap();
}

const DELIMITER: &str = "---";

/// Why a document was left out of the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoFrontMatter,
    InvalidFrontMatter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoFrontMatter => f.write_str("No frontmatter found"),
            SkipReason::InvalidFrontMatter => f.write_str("Invalid frontmatter format"),
        }
    }
}

/// Result of migrating one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Migrated,
    Skipped(SkipReason),
}

/// Counts for a whole migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub migrated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl MigrationReport {
    pub fn total(&self) -> usize {
        self.migrated + self.skipped + self.failed
    }
}

/// Rewrites front-matter of markdown documents
pub struct Migrator {
    placeholder_tag: String,
    placeholder_description: String,
    today: String,
}

impl Migrator {
    pub fn new(config: &MigrateConfig) -> Self {
        Self {
            placeholder_tag: config.placeholder_tag.clone(),
            placeholder_description: config.placeholder_description.clone(),
            today: today_iso(),
        }
    }

    /// Override the date used when neither front-matter nor file name has one
    pub fn with_today(mut self, today: impl Into<String>) -> Self {
        self.today = today.into();
        self
    }

    /// Migrate every markdown file under `source` into the mirrored path
    /// under `output`. A failing file is logged and the walk continues.
    pub fn run(&self, source: &Path, output: &Path) -> MigrationReport {
        let mut report = MigrationReport::default();

        if !source.is_dir() {
            tracing::error!("Source directory not found: {:?}", source);
            return report;
        }
        if let Err(e) = fs::create_dir_all(output) {
            tracing::error!("Cannot create output directory {:?}: {}", output, e);
            return report;
        }

        tracing::info!("Migrating {:?} -> {:?}", source, output);

        for entry in WalkDir::new(source)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::error!("Error walking {:?}: {}", source, e);
                    report.failed += 1;
                    continue;
                }
            };

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(source) else {
                continue;
            };
            let target = output.join(relative);

            if entry.file_type().is_dir() {
                if let Err(e) = fs::create_dir_all(&target) {
                    tracing::error!("Cannot create {:?}: {}", target, e);
                }
                continue;
            }

            let is_markdown = entry.file_name().to_str().is_some_and(is_post_file);
            if !entry.file_type().is_file() || !is_markdown {
                continue;
            }

            match self.migrate_file(path, &target) {
                Ok(Outcome::Migrated) => {
                    tracing::info!("Migrated: {:?}", relative);
                    report.migrated += 1;
                }
                Ok(Outcome::Skipped(reason)) => {
                    tracing::warn!("Skipping {:?}: {}", relative, reason);
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Error processing {:?}: {}", path, e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Migrate a single file to `target`
    pub fn migrate_file(&self, path: &Path, target: &Path) -> Result<Outcome> {
        let content = fs::read_to_string(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        match self.migrate_document(&content, file_name) {
            Ok(migrated) => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(target, migrated)?;
                Ok(Outcome::Migrated)
            }
            Err(reason) => Ok(Outcome::Skipped(reason)),
        }
    }

    /// Rewrite the front-matter of one document.
    ///
    /// The document is split on every `---`; the second piece is the
    /// front-matter and everything after it is kept verbatim.
    pub fn migrate_document(
        &self,
        content: &str,
        file_name: &str,
    ) -> std::result::Result<String, SkipReason> {
        if !content.starts_with(DELIMITER) {
            return Err(SkipReason::NoFrontMatter);
        }

        let parts: Vec<&str> = content.split(DELIMITER).collect();
        if parts.len() < 3 {
            return Err(SkipReason::InvalidFrontMatter);
        }
        let meta = parse_meta(parts[1]);
        let body = parts[2..].join(DELIMITER);

        let field = |key: &str| meta.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let title = field("title")
            .map(str::to_string)
            .unwrap_or_else(|| slug_from_file_name(file_name).to_string());

        let date = field("date")
            .map(str::to_string)
            .or_else(|| date_from_file_name(file_name))
            .unwrap_or_else(|| self.today.clone());

        let tags = match field("tags") {
            None => format!("[{}]", quote(&self.placeholder_tag)),
            Some(tags) if tags.starts_with('[') => tags.to_string(),
            Some(tag) => format!("[{}]", quote(tag)),
        };

        let description = field("description")
            .or_else(|| field("desc"))
            .or_else(|| field("title"))
            .unwrap_or(&self.placeholder_description);

        let mut lines = vec![
            DELIMITER.to_string(),
            format!("title: {}", quote(&title)),
            format!("date: {}", quote(&date)),
            format!("description: {}", quote(description)),
            format!("tags: {}", tags),
        ];
        if let Some(category) = field("category") {
            lines.push(format!("category: {}", quote(category)));
        }
        lines.push(DELIMITER.to_string());

        Ok(format!("{}\n{}", lines.join("\n"), body))
    }
}

/// Read flat `key: value` lines, dropping one pair of surrounding quotes
fn parse_meta(block: &str) -> IndexMap<String, String> {
    let mut meta = IndexMap::new();
    for line in block.trim().split('\n') {
        let Some(caps) = META_LINE.captures(line) else {
            continue;
        };
        let value = caps[2].trim();
        let value = unquote(value, '"').or_else(|| unquote(value, '\'')).unwrap_or(value);
        meta.insert(caps[1].to_string(), value.to_string());
    }
    meta
}

fn unquote(value: &str, quote: char) -> Option<&str> {
    value.strip_prefix(quote)?.strip_suffix(quote)
}

/// Double-quoted YAML scalar
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use tempfile::TempDir;

    fn migrator() -> Migrator {
        Migrator::new(&MigrateConfig::default()).with_today("2026-10-18")
    }

    #[test]
    fn test_missing_tags_get_placeholder() {
        let doc = "---\ntitle: Redis 持久化\ndate: 2023-05-06\n---\n\n# RDB\n";
        let out = migrator().migrate_document(doc, "redis.md").unwrap();
        assert!(out.contains(r#"tags: ["待分类"]"#));
        assert!(out.contains(r#"title: "Redis 持久化""#));
        assert!(out.contains(r#"date: "2023-05-06""#));
        assert!(out.contains(r#"description: "Redis 持久化""#));
        assert!(out.ends_with("\n\n# RDB\n"));
    }

    #[test]
    fn test_single_tag_becomes_list() {
        let doc = "---\ntitle: A\ntags: Backend\n---\nbody";
        let out = migrator().migrate_document(doc, "a.md").unwrap();
        assert!(out.contains(r#"tags: ["Backend"]"#));

        let doc = "---\ntitle: A\ntags: [\"x\", \"y\"]\n---\nbody";
        let out = migrator().migrate_document(doc, "a.md").unwrap();
        assert!(out.contains(r#"tags: ["x", "y"]"#));
    }

    #[test]
    fn test_date_defaults() {
        let doc = "---\ntitle: A\n---\nbody";
        let out = migrator().migrate_document(doc, "2022-03-04-a.md").unwrap();
        assert!(out.contains(r#"date: "2022-03-04""#));

        let out = migrator().migrate_document(doc, "a.md").unwrap();
        assert!(out.contains(r#"date: "2026-10-18""#));
    }

    #[test]
    fn test_description_sources() {
        let m = migrator();

        let out = m
            .migrate_document("---\ntitle: T\ndesc: short\n---\n", "a.md")
            .unwrap();
        assert!(out.contains(r#"description: "short""#));

        let out = m
            .migrate_document("---\ntitle: T\ndescription: 'full'\ndesc: short\n---\n", "a.md")
            .unwrap();
        assert!(out.contains(r#"description: "full""#));

        let out = m.migrate_document("---\nlayout: doc\n---\n", "intro.md").unwrap();
        assert!(out.contains(r#"description: "暂无描述""#));
        assert!(out.contains(r#"title: "intro""#));
    }

    #[test]
    fn test_category_kept_and_field_order() {
        let doc = "---\ncategory: 后端\ntags: [a]\ndate: 2024-01-01\ntitle: T\ndescription: D\n---\nbody";
        let out = migrator().migrate_document(doc, "a.md").unwrap();
        let expected = "---\ntitle: \"T\"\ndate: \"2024-01-01\"\ndescription: \"D\"\ntags: [a]\ncategory: \"后端\"\n---\n\nbody";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_body_rules_preserved() {
        let doc = "---\ntitle: T\n---\nintro\n\n---\n\noutro";
        let out = migrator().migrate_document(doc, "a.md").unwrap();
        assert!(out.ends_with("\nintro\n\n---\n\noutro"));
    }

    #[test]
    fn test_skips() {
        let m = migrator();
        assert_eq!(
            m.migrate_document("# no front-matter", "a.md"),
            Err(SkipReason::NoFrontMatter)
        );
        assert_eq!(
            m.migrate_document("---\ntitle: never closed", "a.md"),
            Err(SkipReason::InvalidFrontMatter)
        );
    }

    #[test]
    fn test_quotes_in_values_are_escaped() {
        let doc = "---\ntitle: He said \"hi\"\n---\nbody";
        let out = migrator().migrate_document(doc, "a.md").unwrap();
        let (fm, _) = FrontMatter::parse(&out);
        assert_eq!(fm.title.as_deref(), Some("He said \"hi\""));
        assert_eq!(fm.tags, vec!["待分类"]);
    }

    #[test]
    fn test_run_mirrors_tree() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let out_dir = out.path().join("migrated");

        fs::create_dir_all(src.path().join("Backend/Redis")).unwrap();
        fs::write(src.path().join("Backend/Redis/rdb.md"), "---\ntitle: RDB\n---\nbody").unwrap();
        fs::write(src.path().join("Backend/plain.md"), "no front-matter").unwrap();
        fs::write(src.path().join("index.mdx"), "---\ntitle: Home\ntags: home\n---\n").unwrap();
        fs::write(src.path().join("logo.png"), [0u8, 1, 2]).unwrap();

        let report = migrator().run(src.path(), &out_dir);
        assert_eq!(
            report,
            MigrationReport {
                migrated: 2,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(report.total(), 3);

        let rdb = fs::read_to_string(out_dir.join("Backend/Redis/rdb.md")).unwrap();
        assert!(rdb.contains(r#"tags: ["待分类"]"#));
        let index = fs::read_to_string(out_dir.join("index.mdx")).unwrap();
        assert!(index.contains(r#"tags: ["home"]"#));

        assert!(!out_dir.join("Backend/plain.md").exists());
        assert!(!out_dir.join("logo.png").exists());
    }

    #[test]
    fn test_run_missing_source() {
        let out = TempDir::new().unwrap();
        let report = migrator().run(&out.path().join("nope"), &out.path().join("out"));
        assert_eq!(report, MigrationReport::default());
    }

    #[test]
    fn test_unreadable_file_does_not_stop_run() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(src.path().join("a.md"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(src.path().join("b.md"), "---\ntitle: B\n---\n").unwrap();

        let report = migrator().run(src.path(), out.path());
        assert_eq!(report.failed, 1);
        assert_eq!(report.migrated, 1);
        assert!(out.path().join("b.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_follows_symlinks() {
        let shared = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(shared.path().join("notes")).unwrap();
        fs::write(shared.path().join("notes/linked.md"), "---\ntitle: Linked\n---\n").unwrap();
        fs::write(shared.path().join("single.md"), "---\ntitle: Single\n---\n").unwrap();
        std::os::unix::fs::symlink(shared.path().join("notes"), src.path().join("notes")).unwrap();
        std::os::unix::fs::symlink(shared.path().join("single.md"), src.path().join("single.md"))
            .unwrap();

        let report = migrator().run(src.path(), out.path());
        assert_eq!(report.migrated, 2);
        assert_eq!(report.failed, 0);
        let linked = fs::read_to_string(out.path().join("notes/linked.md")).unwrap();
        assert!(linked.contains(r#"title: "Linked""#));
        assert!(out.path().join("single.md").is_file());
    }
}
