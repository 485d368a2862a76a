use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};

/// Resolved settings of one generator run.
#[derive(Debug)]
pub(crate) struct Context {
    /// Repository root. `markdownFile` entries are relative to this.
    pub root_dir: PathBuf,
    pub article_dir: PathBuf,
    pub out_file: PathBuf,

    pub excerpt_length: usize,

    pub handlebars: handlebars::Handlebars<'static>,
}

impl Context {
    /// `article_dir` and `out_file` are resolved against `root_dir` unless absolute.
    pub fn new(
        root_dir: &Path,
        article_dir: &Path,
        out_file: &Path,
        excerpt_length: usize,
        handlebars: handlebars::Handlebars<'static>,
    ) -> anyhow::Result<Self> {
        if !root_dir.join(article_dir).is_dir() {
            bail!("Missing article directory {:?}", root_dir.join(article_dir));
        }
        // only the root is resolved. the article dir keeps its in-repo path even when it is a symlink
        let root_dir = std::fs::canonicalize(root_dir)
            .with_context(|| format!("while resolving {root_dir:?}"))?;

        Ok(Self {
            article_dir: root_dir.join(article_dir),
            out_file: root_dir.join(out_file),
            root_dir,
            excerpt_length,
            handlebars,
        })
    }
}
