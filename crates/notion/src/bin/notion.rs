//! Notion CLI - workspace page tool for CTO Platform.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use notion::blocks::{decode, ContentBlock};
use notion::client::NotionClient;
use notion::error::NotionError;
use notion::page::PageSummary;

/// Page size when reading page content.
const READ_PAGE_SIZE: u32 = 100;

/// Page size for search results.
const SEARCH_PAGE_SIZE: u32 = 20;

/// Page size for the connection check.
const CHECK_PAGE_SIZE: u32 = 5;

/// Notion CLI - read and write workspace pages.
#[derive(Parser)]
#[command(name = "notion")]
#[command(about = "Read and write Notion workspace pages")]
struct Cli {
    /// Notion integration token (or set `NOTION_API_KEY` env var).
    #[arg(long, env = "NOTION_API_KEY")]
    api_key: String,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new page in a database.
    Create {
        /// Page title.
        title: String,

        /// Database ID (or set `NOTION_DATABASE_ID` env var).
        #[arg(long, env = "NOTION_DATABASE_ID")]
        database_id: Option<String>,

        /// Create the page without the starter Overview blocks.
        #[arg(long, default_value = "false")]
        empty: bool,
    },

    /// Append a content block to an existing page.
    Append {
        /// Page ID.
        page_id: String,

        /// Text content of the block.
        text: String,

        /// Append as a to-do item instead of a paragraph.
        #[arg(long, conflicts_with = "heading")]
        todo: bool,

        /// Mark the to-do item as done.
        #[arg(long, requires = "todo")]
        checked: bool,

        /// Append as a heading, optionally at a given level (1-3).
        #[arg(long, num_args = 0..=1, default_missing_value = "2")]
        heading: Option<u8>,
    },

    /// Read a page and print its content as markdown-like text.
    Read {
        /// Page ID.
        page_id: String,
    },

    /// Search for pages in the workspace.
    Search {
        /// Free-text query. Omit to list recently edited pages.
        query: Option<String>,
    },

    /// Test API connection and configuration.
    Check {
        /// Database ID to probe (or set `NOTION_DATABASE_ID` env var).
        #[arg(long, env = "NOTION_DATABASE_ID")]
        database_id: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        if let Some(hint) = err.downcast_ref::<NotionError>().and_then(NotionError::hint) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = NotionClient::new(&cli.api_key).context("Failed to create Notion client")?;

    match cli.command {
        Commands::Create {
            title,
            database_id,
            empty,
        } => create(&client, database_id.as_deref(), &title, empty).await,
        Commands::Append {
            page_id,
            text,
            todo,
            checked,
            heading,
        } => append(&client, &page_id, &text, todo, checked, heading).await,
        Commands::Read { page_id } => read(&client, &page_id).await,
        Commands::Search { query } => search(&client, query.as_deref()).await,
        Commands::Check { database_id } => check(&client, database_id.as_deref()).await,
    }
}

async fn create(
    client: &NotionClient,
    database_id: Option<&str>,
    title: &str,
    empty: bool,
) -> Result<()> {
    let database_id = database_id.filter(|id| !id.is_empty()).ok_or_else(|| {
        anyhow!("No database ID provided. Pass --database-id or set NOTION_DATABASE_ID")
    })?;
    if title.is_empty() {
        bail!("No title provided. Usage: notion create \"Page Title\"");
    }

    let starter = [
        ContentBlock::heading("Overview", 2),
        ContentBlock::paragraph("Add content here..."),
    ];
    let children = if empty {
        vec![]
    } else {
        starter.iter().filter_map(ContentBlock::to_wire).collect()
    };

    let page = client.create_page(database_id, title, children).await?;
    println!("Page created successfully");
    println!("ID: {}", page.id);
    println!("URL: {}", page.url);
    Ok(())
}

async fn append(
    client: &NotionClient,
    page_id: &str,
    text: &str,
    todo: bool,
    checked: bool,
    heading: Option<u8>,
) -> Result<()> {
    if page_id.is_empty() {
        bail!("No page ID provided. Usage: notion append <page_id> \"Content to add\"");
    }
    if text.is_empty() {
        bail!("No content provided. Usage: notion append <page_id> \"Content to add\"");
    }

    let block = if let Some(level) = heading {
        ContentBlock::heading(text, level)
    } else if todo {
        ContentBlock::todo(text, checked)
    } else {
        ContentBlock::paragraph(text)
    };
    let wire = block
        .to_wire()
        .ok_or_else(|| anyhow!("Block has no wire form"))?;

    client.append_blocks(page_id, vec![wire]).await?;
    println!("Content appended successfully to page: {page_id}");
    Ok(())
}

async fn read(client: &NotionClient, page_id: &str) -> Result<()> {
    if page_id.is_empty() {
        bail!("No page ID provided. Usage: notion read <page_id>");
    }

    let page = client.retrieve_page(page_id).await?;
    let summary = PageSummary::from(&page);
    println!("Page: {}", summary.title);
    println!("URL: {}", summary.url);
    println!("Last edited: {}", summary.last_edited_time);
    println!("\n--- Content ---\n");

    let response = client.list_blocks(page_id, READ_PAGE_SIZE).await?;
    let blocks: Vec<ContentBlock> = response
        .results
        .iter()
        .map(ContentBlock::from_wire)
        .collect();
    for line in decode(&blocks) {
        println!("{line}");
    }
    Ok(())
}

async fn search(client: &NotionClient, query: Option<&str>) -> Result<()> {
    let response = client.search(query, SEARCH_PAGE_SIZE).await?;

    println!("Found {} pages:\n", response.results.len());
    for page in &response.results {
        let summary = PageSummary::from(page);
        println!("- {}", summary.title);
        println!("  ID: {}", summary.id);
        println!("  URL: {}", summary.url);
        println!();
    }
    Ok(())
}

async fn check(client: &NotionClient, database_id: Option<&str>) -> Result<()> {
    println!("Testing Notion API connection...\n");

    match client.search(None, CHECK_PAGE_SIZE).await {
        Ok(response) => {
            println!("API connection: OK");
            println!("Found {} recent pages:\n", response.results.len());
            for page in &response.results {
                println!("- {}", PageSummary::from(page).title);
            }
        }
        Err(err) => {
            println!("API connection: FAILED");
            println!("Error: {err}");
            if let Some(hint) = err.hint() {
                println!("{hint}");
            }
            std::process::exit(1);
        }
    }

    println!("\n--- Database Access ---");
    let Some(database_id) = database_id else {
        println!("No database ID configured (NOTION_DATABASE_ID)");
        println!("Skipping database test");
        return Ok(());
    };

    // A failed probe is reported but does not fail the check; only the
    // connection test above decides the exit status.
    match client.retrieve_database(database_id).await {
        Ok(db) => {
            let name = db
                .title
                .first()
                .map_or_else(|| "Untitled".to_string(), |run| run.plain_text.clone());
            println!("Database access: OK");
            println!("Database name: {name}");
        }
        Err(err) => {
            println!("Database access: FAILED");
            println!("Error: {err}");
            if let Some(hint) = err.hint() {
                println!("{hint}");
            }
        }
    }

    println!("\nAll tests passed.");
    Ok(())
}
