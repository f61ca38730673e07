//! Migrate a markdown tree into the blog's front-matter format

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::migrate::{MigrationReport, Migrator};
use crate::Blog;

/// Run the migration. Relative paths resolve against the base directory;
/// missing arguments fall back to the configured defaults.
pub fn run(blog: &Blog, source: Option<&Path>, output: Option<&Path>) -> Result<MigrationReport> {
    let defaults = &blog.config.migrate;
    let source = resolve(blog, source, &defaults.source_dir);
    let output = resolve(blog, output, &defaults.output_dir);

    println!("Source: {}", source.display());
    println!("Output: {}", output.display());

    let report = Migrator::new(defaults).run(&source, &output);

    println!(
        "Migration complete: {} migrated, {} skipped, {} failed",
        report.migrated, report.skipped, report.failed
    );
    println!("Output directory: {}", output.display());

    Ok(report)
}

fn resolve(blog: &Blog, arg: Option<&Path>, default: &str) -> PathBuf {
    let path = arg.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(default));
    if path.is_absolute() {
        path
    } else {
        blog.base_dir.join(path)
    }
}
