use serde::Serialize;

/// One entry of the generated `ARTICLES_CONFIG` array. Field order is the serialized order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArticleMetadata {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tag: String,
    pub excerpt: String,
    #[serde(rename = "markdownFile")]
    pub markdown_file: String,
    pub image: Option<String>,
    pub order: u32,
}

#[derive(Serialize, Debug)]
pub(super) struct ConfigModuleData<'a> {
    pub articles_json: String,
    pub count: usize,
    pub articles: &'a [ArticleMetadata],
}
