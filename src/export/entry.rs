//! Entries of a Movable Type export

use chrono::NaiveDateTime;

/// A comment attached to an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub email: String,
    pub url: String,
    pub ip: String,
    pub date: Option<NaiveDateTime>,
    pub body: String,
}

/// One blog post as exported by Movable Type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub author: String,
    pub title: String,
    /// URL slug; may contain `/` for date-based permalinks
    pub basename: String,
    /// `Publish`, `Draft` or `Future`
    pub status: String,
    pub allow_comments: Option<bool>,
    pub allow_pings: Option<bool>,
    pub convert_breaks: Option<String>,
    pub primary_category: Option<String>,
    /// Primary category first, then the remaining categories, deduplicated
    pub categories: Vec<String>,
    pub date: Option<NaiveDateTime>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub body: String,
    pub extended_body: String,
    pub excerpt: String,
    pub keywords: String,
    pub comments: Vec<Comment>,
}

impl Entry {
    /// Slug for the destination: the basename without path separators
    #[must_use]
    pub fn slug(&self) -> String {
        self.basename.replace('/', "")
    }

    /// Body followed by the extended body, as one HTML fragment
    #[must_use]
    pub fn full_body(&self) -> String {
        let mut body = String::with_capacity(self.body.len() + self.extended_body.len());
        body.push_str(&self.body);
        body.push_str(&self.extended_body);
        body
    }

    pub(crate) fn add_category(&mut self, category: &str) {
        let category = category.trim();
        if !category.is_empty() && !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }

    pub(crate) fn set_primary_category(&mut self, category: &str) {
        let category = category.trim();
        if category.is_empty() {
            return;
        }
        self.categories.retain(|c| c != category);
        self.categories.insert(0, category.to_string());
        self.primary_category = Some(category.to_string());
    }
}
