use serde::Serialize;

/// A rendered section of the Markdown report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub content: String,
    pub level: usize,
    pub subsections: Vec<ReportSection>,
}

impl ReportSection {
    pub fn new(title: &str, content: String, level: usize) -> Self {
        Self {
            title: title.to_string(),
            content,
            level,
            subsections: Vec::new(),
        }
    }
}
