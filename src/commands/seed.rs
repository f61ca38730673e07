//! Create sample content for local development
//!
//! Real posts and projects live on separate branches, so a fresh checkout
//! has nothing to show. This writes a few posts, an about page and a
//! projects file. Existing files are left untouched.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::Project;
use crate::Blog;

const SAMPLE_POSTS: [(&str, &str); 4] = [
    (
        "welcome.md",
        r#"---
title: "欢迎来到 Adream 小站"
date: "2024-01-15"
description: "这是第一篇测试文章，介绍了博客的基本功能"
tags: ["测试", "欢迎"]
category: "公告"
---

# 欢迎

欢迎来到我的个人博客！这里记录了我的学习、思考和生活。

## 特性

- Markdown 支持
- 明暗主题切换
- 响应式设计
"#,
    ),
    (
        "nextjs-14.md",
        r#"---
title: "Next.js 14 新特性解析"
date: "2024-01-20"
description: "深入了解 Next.js 14 带来的激动人心的新功能"
tags: ["Next.js", "React", "前端"]
category: "技术"
---

# Next.js 14 新特性

## Server Actions

Server Actions 是 Next.js 14 中最重要的功能之一。

## Turbopack

Turbopack 是新的打包工具。
"#,
    ),
    (
        "tailwind-tips.md",
        r#"---
title: "Tailwind CSS 实用技巧"
date: "2024-01-25"
description: "分享一些 Tailwind CSS 的实用技巧和最佳实践"
tags: ["Tailwind", "CSS", "前端"]
category: "技术"
---

# Tailwind CSS 实用技巧

## 自定义配置

通过 `tailwind.config.ts` 可以轻松自定义主题。

```ts
export default { content: ["./src/**/*.tsx"] };
```
"#,
    ),
    (
        "about.md",
        r#"---
title: "关于我"
date: "2024-01-01"
---

# 你好，我是 Adream

一名热爱技术的开发者，专注于全栈开发和前端工程化。
"#,
    ),
];

fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            title: "Adream 小站".to_string(),
            description: "基于 Next.js 的个人博客系统，代码与内容分离".to_string(),
            tags: vec!["Next.js".into(), "React".into(), "Tailwind CSS".into()],
            github: Some("https://github.com/adream-ki/adream-ki.github.io".to_string()),
            demo: Some("https://adream-ki.github.io".to_string()),
            ..Default::default()
        },
        Project {
            title: "示例项目 A".to_string(),
            description: "展示如何使用现代化的技术栈构建应用".to_string(),
            tags: vec!["TypeScript".into(), "Node.js".into(), "MongoDB".into()],
            github: Some("https://github.com/example/project-a".to_string()),
            ..Default::default()
        },
        Project {
            title: "示例项目 B".to_string(),
            description: "专注于用户体验和性能优化".to_string(),
            tags: vec!["Vue".into(), "Vite".into(), "Pinia".into()],
            demo: Some("https://example.com/project-b".to_string()),
            ..Default::default()
        },
    ]
}

/// Write sample content, returning the files that were created
pub fn run(blog: &Blog) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    fs::create_dir_all(&blog.posts_dir)?;
    for (name, content) in SAMPLE_POSTS {
        let path = blog.posts_dir.join(name);
        if write_new(&path, content)? {
            created.push(path);
        }
    }

    fs::create_dir_all(&blog.data_dir)?;
    let projects_path = blog.projects_path();
    let projects = serde_json::to_string_pretty(&sample_projects())?;
    if write_new(&projects_path, &projects)? {
        created.push(projects_path);
    }

    for path in &created {
        tracing::info!("Created {:?}", path);
    }

    Ok(created)
}

/// Write `content` unless `path` exists; returns whether it wrote
fn write_new(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        tracing::debug!("Keeping existing {:?}", path);
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}
