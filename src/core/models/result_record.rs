#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub published_date: Option<String>,
}

impl ResultRecord {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
        published_date: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            published_date,
        }
    }
}
