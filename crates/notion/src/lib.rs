//! Notion workspace client for CTO Platform.
//!
//! This crate provides a typed client for the Notion REST API (page
//! creation, block append, page read, search, database retrieval) and
//! the block translator that maps remote content blocks to markdown-like
//! display lines and content intents to wire payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use notion::blocks::ContentBlock;
//! use notion::client::NotionClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = NotionClient::new("secret_token")?;
//!
//!     let block = ContentBlock::paragraph("Meeting notes");
//!     client
//!         .append_blocks("page_id", vec![block.to_wire().unwrap()])
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod blocks;
pub mod client;
pub mod error;
pub mod models;
pub mod page;

pub use blocks::{decode, ContentBlock, TextRun};
pub use client::NotionClient;
pub use error::NotionError;
pub use page::{extract_title, PageSummary};
