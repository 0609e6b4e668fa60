//! Notion API request and response models.
//!
//! Based on the Notion REST API reference.
//! API Documentation: <https://developers.notion.com/reference>

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Rich text
// ============================================================================

/// A rich text fragment as returned by the API.
///
/// Formatting annotations are ignored; only the plain text survives.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextItem {
    /// Text content with all formatting discarded.
    #[serde(default)]
    pub plain_text: String,
}

/// A rich text fragment for request payloads.
#[derive(Debug, Clone, Serialize)]
pub struct NewRichText {
    /// Fragment type, always "text".
    #[serde(rename = "type")]
    pub rich_text_type: &'static str,
    /// Literal text content.
    pub text: TextContent,
}

/// Literal text content of a rich text fragment.
#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    /// The text itself, verbatim.
    pub content: String,
}

impl NewRichText {
    /// Wrap plain text as a single rich text fragment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            rich_text_type: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

// ============================================================================
// Blocks (read side)
// ============================================================================

/// A content block as returned by the blocks API.
///
/// The `block_type` tag names which payload field is populated; the API
/// guarantees the sub-object keyed by the tag value is present.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockObject {
    /// Block identifier.
    #[serde(default)]
    pub id: String,
    /// Type tag (e.g. "paragraph", "heading_1", "to_do").
    #[serde(rename = "type")]
    pub block_type: String,
    /// Level-1 heading payload.
    #[serde(default)]
    pub heading_1: Option<TextPayload>,
    /// Level-2 heading payload.
    #[serde(default)]
    pub heading_2: Option<TextPayload>,
    /// Level-3 heading payload.
    #[serde(default)]
    pub heading_3: Option<TextPayload>,
    /// Paragraph payload.
    #[serde(default)]
    pub paragraph: Option<TextPayload>,
    /// Bulleted list item payload.
    #[serde(default)]
    pub bulleted_list_item: Option<TextPayload>,
    /// Numbered list item payload.
    #[serde(default)]
    pub numbered_list_item: Option<TextPayload>,
    /// To-do payload.
    #[serde(default)]
    pub to_do: Option<TodoPayload>,
    /// Code payload.
    #[serde(default)]
    pub code: Option<CodePayload>,
}

/// Payload of text-only block types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    /// Ordered rich text fragments.
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
}

/// Payload of a to-do block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPayload {
    /// Ordered rich text fragments.
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    /// Whether the checkbox is ticked.
    #[serde(default)]
    pub checked: bool,
}

/// Payload of a code block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodePayload {
    /// Ordered rich text fragments.
    #[serde(default)]
    pub rich_text: Vec<RichTextItem>,
    /// Language annotation for the fence, if any.
    #[serde(default)]
    pub language: Option<String>,
}

// ============================================================================
// Blocks (write side)
// ============================================================================

/// A block for append/create payloads.
///
/// Invariant: exactly the payload field matching `block_type` is set.
/// The remote API rejects payloads where the tag and sub-object disagree,
/// so construction goes through `ContentBlock::to_wire`.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlock {
    /// Object discriminator, always "block".
    pub object: &'static str,
    /// Type tag.
    #[serde(rename = "type")]
    pub block_type: &'static str,
    /// Level-1 heading payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_1: Option<NewTextPayload>,
    /// Level-2 heading payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_2: Option<NewTextPayload>,
    /// Level-3 heading payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_3: Option<NewTextPayload>,
    /// Paragraph payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<NewTextPayload>,
    /// Bulleted list item payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulleted_list_item: Option<NewTextPayload>,
    /// Numbered list item payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbered_list_item: Option<NewTextPayload>,
    /// To-do payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_do: Option<NewTodoPayload>,
    /// Code payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<NewCodePayload>,
    /// Divider payload (an empty object on the wire).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider: Option<EmptyPayload>,
}

impl NewBlock {
    /// Bare block with the given tag and no payload set.
    pub(crate) fn tagged(block_type: &'static str) -> Self {
        Self {
            object: "block",
            block_type,
            heading_1: None,
            heading_2: None,
            heading_3: None,
            paragraph: None,
            bulleted_list_item: None,
            numbered_list_item: None,
            to_do: None,
            code: None,
            divider: None,
        }
    }
}

/// Write-side payload of text-only block types.
#[derive(Debug, Clone, Serialize)]
pub struct NewTextPayload {
    /// Ordered rich text fragments.
    pub rich_text: Vec<NewRichText>,
}

/// Write-side payload of a to-do block.
#[derive(Debug, Clone, Serialize)]
pub struct NewTodoPayload {
    /// Ordered rich text fragments.
    pub rich_text: Vec<NewRichText>,
    /// Whether the checkbox is ticked.
    pub checked: bool,
}

/// Write-side payload of a code block.
#[derive(Debug, Clone, Serialize)]
pub struct NewCodePayload {
    /// Ordered rich text fragments.
    pub rich_text: Vec<NewRichText>,
    /// Language annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Empty wire payload for payload-less block types.
#[derive(Debug, Clone, Serialize)]
pub struct EmptyPayload {}

// ============================================================================
// Pages and properties
// ============================================================================

/// A page as returned by the pages and search APIs.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Page identifier.
    pub id: String,
    /// Browser URL of the page.
    #[serde(default)]
    pub url: String,
    /// When the page was last edited.
    pub last_edited_time: DateTime<Utc>,
    /// Property values keyed by property name, in API order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
}

/// A property value on a page.
///
/// Only title-typed properties are interpreted; everything else is
/// carried opaquely via its tag.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyValue {
    /// Property type tag (e.g. "title", "rich_text", "select").
    #[serde(rename = "type")]
    pub property_type: String,
    /// Title fragments, present when `property_type` is "title".
    #[serde(default)]
    pub title: Option<Vec<RichTextItem>>,
}

/// A database as returned by the databases API.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    /// Database identifier.
    pub id: String,
    /// Database title fragments.
    #[serde(default)]
    pub title: Vec<RichTextItem>,
}

// ============================================================================
// Requests
// ============================================================================

/// Parent reference for page creation.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParent {
    /// Database the new page belongs to.
    pub database_id: String,
}

/// Title property value for page creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewTitleProperty {
    /// Title fragments.
    pub title: Vec<NewRichText>,
}

/// Request body for `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest {
    /// Parent database.
    pub parent: DatabaseParent,
    /// Properties keyed by property name.
    pub properties: IndexMap<String, NewTitleProperty>,
    /// Initial content blocks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NewBlock>,
}

/// Request body for `PATCH /v1/blocks/{id}/children`.
#[derive(Debug, Clone, Serialize)]
pub struct AppendBlocksRequest {
    /// Blocks to append, in order.
    pub children: Vec<NewBlock>,
}

/// Request body for `POST /v1/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Free-text query. Omitted entirely when not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Object-type filter.
    pub filter: SearchFilter,
    /// Result ordering.
    pub sort: SearchSort,
    /// Maximum number of results (single page, no cursor following).
    pub page_size: u32,
}

impl SearchRequest {
    /// Search for pages, most recently edited first.
    pub fn pages(query: Option<&str>, page_size: u32) -> Self {
        Self {
            query: query.map(str::to_string),
            filter: SearchFilter {
                property: "object",
                value: "page",
            },
            sort: SearchSort {
                direction: "descending",
                timestamp: "last_edited_time",
            },
            page_size,
        }
    }
}

/// Object-type filter for search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchFilter {
    /// Filtered property, always "object".
    pub property: &'static str,
    /// Required value (e.g. "page").
    pub value: &'static str,
}

/// Result ordering for search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSort {
    /// Sort direction.
    pub direction: &'static str,
    /// Timestamp to sort on.
    pub timestamp: &'static str,
}

// ============================================================================
// Responses
// ============================================================================

/// Response of `POST /v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Matching pages, at most one page of results.
    #[serde(default)]
    pub results: Vec<Page>,
}

/// Response of `GET /v1/blocks/{id}/children`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockChildrenResponse {
    /// Child blocks in document order.
    #[serde(default)]
    pub results: Vec<BlockObject>,
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. "unauthorized", "object_not_found").
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
