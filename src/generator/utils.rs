use std::{borrow::Borrow, cmp::Ordering, path::Path, sync::LazyLock};

use regex::Regex;

use super::data::ArticleMetadata;

static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Lowercase, hyphen-separated rendering of `s`.
pub(super) fn slugify(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let s = NON_SLUG_CHARS.replace_all(&s, "");
    let s = SEPARATOR_RUNS.replace_all(&s, "-");
    let s = HYPHEN_RUNS.replace_all(&s, "-");
    s.trim_matches('-').to_string()
}

/// topic, then order hint, then title. Both strings compare case-insensitively.
pub(super) fn sort_article<T: Borrow<ArticleMetadata>>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.borrow(), b.borrow());
    a.tag
        .to_lowercase()
        .cmp(&b.tag.to_lowercase())
        .then(a.order.cmp(&b.order))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

/// `/`-separated form of a relative path, independent of the platform separator.
pub(super) fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
