//! The source record kept in the registry.

use serde::{Deserialize, Serialize};

/// A feed origin.
///
/// `url` is the registry key: two sources with the same `url` are the same
/// source, whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    /// Address of the feed document.
    pub url: String,

    /// Label shown next to every item from this source.
    pub name: String,

    /// Free-form grouping such as "world" or "tech".
    #[serde(default)]
    pub category: Option<String>,
}

impl NewsSource {
    /// Create a source without a category.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            category: None,
        }
    }

    /// Builder-style setter for [`NewsSource::category`].
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
