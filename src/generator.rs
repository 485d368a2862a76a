use std::{
    borrow::Cow,
    collections::{HashMap, VecDeque},
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::{debug, info, warn};

use crate::{context::Context, renderer::CONFIG_TEMPLATE_NAME};

mod data;
pub(crate) mod extract;
mod utils;

use data::{ArticleMetadata, ConfigModuleData};
use extract::{parse_order, read_excerpt, read_title};
use utils::{slugify, sort_article, to_slash_path};

// a file named just `.md` counts too
fn is_article_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".md"))
}

/// All `.md` files below `article_dir`, sorted by path. Files whose name starts with `_`
/// are left out.
fn collect_markdown_files(article_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];

    // traversing `article_dir`
    let mut q = VecDeque::new();
    q.push_back(article_dir.to_path_buf());
    while let Some(dir) = q.pop_front() {
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("while reading {dir:?}"))?;
        for entry in entries {
            let entry = entry?;
            let meta = entry.metadata()?;
            let path = entry.path();

            if meta.is_dir() {
                q.push_back(path);
            } else if path.is_file() && is_article_file(&path) {
                if entry.file_name().to_string_lossy().starts_with('_') {
                    info!("Skipping {path:?}");
                    continue;
                }
                files.push(path);
            }
        }
    }

    // read_dir order is unspecified
    files.sort();
    Ok(files)
}

fn preprocess_file(ctx: &Context, path: &Path) -> anyhow::Result<ArticleMetadata> {
    let bytes = std::fs::read(path)?;
    let md_text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = md_text {
        warn!("{path:?} is not valid UTF-8. Invalid bytes are replaced.");
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    // topic is the directory containing the article
    let tag = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let markdown_file = path
        .strip_prefix(&ctx.root_dir)
        .with_context(|| format!("{path:?} is outside of {:?}", ctx.root_dir))?;

    let title = read_title(&md_text, &stem);
    let metadata = ArticleMetadata {
        // derived from the file name, never from the title, so links survive retitling
        id: format!("{}__{}", slugify(&tag), slugify(&stem)),
        excerpt: read_excerpt(&md_text, ctx.excerpt_length),
        order: parse_order(&title, &filename),
        title,
        date: "".to_string(),
        tag,
        markdown_file: to_slash_path(markdown_file),
        image: None,
    };
    debug!("{metadata:?}");

    Ok(metadata)
}

fn warn_duplicate_ids(articles: &[ArticleMetadata]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for article in articles {
        if let Some(previous) = seen.insert(&article.id, &article.markdown_file) {
            warn!(
                "Duplicate id {:?}: {} and {}",
                article.id, previous, article.markdown_file
            );
        }
    }
}

fn write_config_module(ctx: &Context, articles: &[ArticleMetadata]) -> anyhow::Result<()> {
    let data = ConfigModuleData {
        articles_json: serde_json::to_string_pretty(articles)?,
        count: articles.len(),
        articles,
    };

    if let Some(parent) = ctx.out_file.parent() {
        if !parent.exists() {
            fs_extra::dir::create_all(parent, false)?;
        }
    }
    let fd = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&ctx.out_file)?;
    let mut writer = BufWriter::new(fd);
    ctx.handlebars
        .render_to_write(CONFIG_TEMPLATE_NAME, &data, &mut writer)
        .with_context(|| format!("while generating {:?}", ctx.out_file))?;
    writer.flush()?;

    Ok(())
}

/// Scans the article directory and writes the config module. Returns the number of articles.
pub(crate) fn generate(ctx: &Context) -> anyhow::Result<usize> {
    info!("Scanning {:?}", ctx.article_dir);

    let mut articles = vec![];
    for path in collect_markdown_files(&ctx.article_dir)? {
        let article = preprocess_file(ctx, &path)
            .with_context(|| format!("while preprocessing {path:?}"))?;
        articles.push(article);
    }

    articles.sort_by(sort_article);
    warn_duplicate_ids(&articles);

    write_config_module(ctx, &articles)?;
    info!("{} articles written to {:?}", articles.len(), ctx.out_file);

    Ok(articles.len())
}
