use serde::Serialize;

/// A news article from the vlr.gg news page.
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub date: String,
    pub author: String,
    pub url_path: String,
}
