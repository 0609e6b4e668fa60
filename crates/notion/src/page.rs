//! Page summaries and title extraction.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::models::{Page, PropertyValue};

/// Fallback title for pages without a usable title property.
const UNTITLED: &str = "Untitled";

/// Display-oriented view of a page, derived per API response.
#[derive(Debug, Clone)]
pub struct PageSummary {
    /// Extracted page title.
    pub title: String,
    /// Page identifier.
    pub id: String,
    /// Browser URL of the page.
    pub url: String,
    /// When the page was last edited.
    pub last_edited_time: DateTime<Utc>,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            title: extract_title(&page.properties),
            id: page.id.clone(),
            url: page.url.clone(),
            last_edited_time: page.last_edited_time,
        }
    }
}

/// Extract the page title from its property mapping.
///
/// Walks properties in API order and returns the first text run of the
/// first title-typed property. Falls back to "Untitled" when no title
/// property exists or its run list is empty.
pub fn extract_title(properties: &IndexMap<String, PropertyValue>) -> String {
    for value in properties.values() {
        if value.property_type != "title" {
            continue;
        }
        if let Some(run) = value.title.as_ref().and_then(|runs| runs.first()) {
            return run.plain_text.clone();
        }
        break;
    }
    UNTITLED.to_string()
}
