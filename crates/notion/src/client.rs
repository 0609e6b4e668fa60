//! Notion REST API client implementation.
//!
//! One method per remote operation; no retries, no cursor following.
//! API Documentation: <https://developers.notion.com/reference>

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, warn};

use crate::error::NotionError;
use crate::models::{
    ApiErrorBody, AppendBlocksRequest, BlockChildrenResponse, CreatePageRequest, Database,
    DatabaseParent, NewBlock, NewRichText, NewTitleProperty, Page, SearchRequest, SearchResponse,
};

/// Base URL for the Notion API.
const API_BASE_URL: &str = "https://api.notion.com";

/// API version sent with every request.
const NOTION_VERSION: &str = "2022-06-28";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Notion API client.
///
/// Constructed once and passed to each operation; there is no global
/// instance.
#[derive(Clone)]
pub struct NotionClient {
    /// HTTP client.
    client: Client,
    /// Integration token.
    token: String,
    /// API base URL, overridable for tests.
    base_url: String,
}

impl NotionClient {
    /// Create a new client with the given integration token.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(token: impl Into<String>) -> Result<Self, NotionError> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Create a client pointed at a non-default base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, NotionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: base_url.into(),
        })
    }

    /// Create a page in a database with a title property and initial
    /// content blocks.
    ///
    /// # Errors
    /// Returns error if the request fails or the database is not shared
    /// with the integration.
    pub async fn create_page(
        &self,
        database_id: &str,
        title: &str,
        children: Vec<NewBlock>,
    ) -> Result<Page, NotionError> {
        let mut properties = IndexMap::new();
        properties.insert(
            "Name".to_string(),
            NewTitleProperty {
                title: vec![NewRichText::plain(title)],
            },
        );

        let body = CreatePageRequest {
            parent: DatabaseParent {
                database_id: database_id.to_string(),
            },
            properties,
            children,
        };
        self.request(Method::POST, "/v1/pages", Some(&body)).await
    }

    /// Append content blocks to a page or block.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn append_blocks(
        &self,
        block_id: &str,
        children: Vec<NewBlock>,
    ) -> Result<(), NotionError> {
        let body = AppendBlocksRequest { children };
        let _: BlockChildrenResponse = self
            .request(
                Method::PATCH,
                &format!("/v1/blocks/{block_id}/children"),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    /// Retrieve page metadata.
    ///
    /// # Errors
    /// Returns error if the page does not exist or is not shared.
    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page, NotionError> {
        self.request::<(), _>(Method::GET, &format!("/v1/pages/{page_id}"), None)
            .await
    }

    /// List a single page of child blocks.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_blocks(
        &self,
        block_id: &str,
        page_size: u32,
    ) -> Result<BlockChildrenResponse, NotionError> {
        self.request::<(), _>(
            Method::GET,
            &format!("/v1/blocks/{block_id}/children?page_size={page_size}"),
            None,
        )
        .await
    }

    /// Search for pages, most recently edited first.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn search(
        &self,
        query: Option<&str>,
        page_size: u32,
    ) -> Result<SearchResponse, NotionError> {
        let body = SearchRequest::pages(query, page_size);
        self.request(Method::POST, "/v1/search", Some(&body)).await
    }

    /// Retrieve database metadata.
    ///
    /// # Errors
    /// Returns error if the database does not exist or is not shared.
    pub async fn retrieve_database(&self, database_id: &str) -> Result<Database, NotionError> {
        self.request::<(), _>(Method::GET, &format!("/v1/databases/{database_id}"), None)
            .await
    }

    /// Issue an authenticated request and parse the JSON response.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, NotionError>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(method = %method, url = %url, "API request");

        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle API response, parsing JSON or mapping to the error taxonomy.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NotionError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, body = %text, "Failed to parse response");
                NotionError::Serialization(e)
            });
        }

        // Error bodies carry a code and message; fall back to raw text.
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED => Err(NotionError::Unauthorized(message)),
            StatusCode::NOT_FOUND => Err(NotionError::NotFound(message)),
            _ => Err(NotionError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
