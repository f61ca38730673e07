//! List showcased projects

use anyhow::Result;
use std::fmt::Write;

use crate::Blog;

pub fn run(blog: &Blog) -> Result<()> {
    print!("{}", render(blog)?);
    Ok(())
}

pub fn render(blog: &Blog) -> Result<String> {
    let projects = blog.loader().load_projects();
    let mut out = String::new();

    if projects.is_empty() {
        writeln!(out, "暂无项目 (add {:?})", blog.projects_path())?;
        return Ok(out);
    }

    writeln!(out, "Projects ({}):", projects.len())?;
    for project in &projects {
        writeln!(out, "  {}", project.title)?;
        if !project.description.is_empty() {
            writeln!(out, "    {}", project.description)?;
        }
        if !project.tags.is_empty() {
            writeln!(out, "    #{}", project.tags.join(" #"))?;
        }
        for link in project.links() {
            writeln!(out, "    {}: {}", link.kind.label(), link.url)?;
        }
    }

    Ok(out)
}
