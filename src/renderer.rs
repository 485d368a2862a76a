use std::path::Path;

use anyhow::Context;
use handlebars::Handlebars;

pub(crate) const CONFIG_TEMPLATE_NAME: &str = "articles-config";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"/* AUTO-GENERATED FILE. DO NOT EDIT BY HAND. */
const ARTICLES_CONFIG = {{articles_json}};

function getAllArticles() {
  return ARTICLES_CONFIG;
}

function getArticleById(id) {
  return ARTICLES_CONFIG.find(a => a.id === id) || null;
}

function getArticlesByTag(tag) {
  return ARTICLES_CONFIG.filter(a => a.tag === tag);
}
"#;

/// Builds the renderer for the generated module. Without `template_file` the built-in
/// template is used.
pub(super) fn generate_renderer(template_file: Option<&Path>) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    // output is javascript, not html
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    match template_file {
        Some(path) => handlebars
            .register_template_file(CONFIG_TEMPLATE_NAME, path)
            .with_context(|| format!("{path:?}"))?,
        None => handlebars
            .register_template_string(CONFIG_TEMPLATE_NAME, DEFAULT_CONFIG_TEMPLATE)
            .context("built-in template")?,
    }

    Ok(handlebars)
}
