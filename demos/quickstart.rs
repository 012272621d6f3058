//! Minimal TapTools tool usage.
//!
//! Run with:
//!   TAPTOOLS_API_KEY=your-key cargo run --example quickstart

use taptools_client::{ApiSchema, Params, TapToolsClient};
use taptools_tool::TapToolsTool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Key resolved from the TAPTOOLS_API_KEY environment variable
    let client = TapToolsClient::new(ApiSchema::bundled()?, None)?;
    let tool = TapToolsTool::new(client);

    let mut params = Params::new();
    params.insert("quote".into(), "USD".into());
    let quote = tool.arun("/token/quote", &params).await?;
    println!("ADA quote: {quote}");

    let stats = tool.arun("/market/stats", &Params::new()).await?;
    println!("Market stats: {stats}");

    Ok(())
}
