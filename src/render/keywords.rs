//! Persuasive keyword panel

use crate::model::PersuasiveKeywords;

pub const NO_KEYWORDS: &str = "No persuasive keywords detected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    /// "social_proof" becomes "Social Proof"
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPanel {
    pub count: u32,
    pub rows: Vec<CategoryRow>,
    pub tags: Vec<String>,
}

impl KeywordPanel {
    pub fn from_keywords(keywords: &PersuasiveKeywords) -> Self {
        let rows = keywords
            .by_category
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(category, &count)| CategoryRow {
                label: category_label(category),
                count,
            })
            .collect();

        Self {
            count: keywords.count,
            rows,
            tags: keywords.words_found.clone(),
        }
    }

    /// Placeholder text, shown only when no keyword tags exist.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.tags.is_empty() {
            Some(NO_KEYWORDS)
        } else {
            None
        }
    }
}

pub fn category_label(category: &str) -> String {
    category
        .split('_')
        .filter(|w| !w.is_empty())
        .map(crate::render::emotion::capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
