//! Twitter Page Fetching Script
//!
//! This script fetches one page of a resource with the session credentials
//! from the environment and prints the extracted items as JSON, followed by
//! the cursor to pass back for the next page.

use std::io::{self, Write};

use serde::Serialize;
use twextract::{Cursor, ExtractionResult, FetchArgs, Scraper, TweetFilter, TwitterConfig};

/// Prints `prompt` and reads one trimmed line from stdin.
fn prompt(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prints a page and its next cursor.
fn print_page<T: Serialize>(
    page: &ExtractionResult<T>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("{}", serde_json::to_string_pretty(&page.items)?);
    println!("\n📦 {} items", page.len());
    match &page.next {
        Some(cursor) => println!("➡️  Next cursor: {}", cursor),
        None => println!("🏁 No further pages"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    println!("🐦 Twitter Page Fetching Tool");
    println!("=============================");

    let config = TwitterConfig::from_env()?;
    println!("🔑 Session credentials loaded");
    let scraper = Scraper::from_config(config);

    println!("\nResources:");
    println!("  1) user details (by username)");
    println!("  2) user tweets");
    println!("  3) user followers");
    println!("  4) tweet replies");
    println!("  5) search by hashtag");
    println!("  6) trending");
    let choice = prompt("📋 Choose a resource: ")?;

    if choice == "6" {
        return print_page(&scraper.trending().await?);
    }

    let id = prompt("🆔 Enter the username, id or hashtag: ")?;
    if id.is_empty() {
        println!("❌ Input cannot be empty!");
        return Err("An id is required".into());
    }

    if choice == "1" {
        let user = scraper.user_details_by_username(&id).await?;
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let cursor = prompt("🔖 Enter a cursor (leave empty for the first page): ")?;
    let cursor = (!cursor.is_empty()).then(|| Cursor::new(&cursor));

    println!("\n🚀 Fetching...");
    match choice.as_str() {
        "2" => print_page(&scraper.user_tweets(&FetchArgs::for_id(id).with_cursor(cursor)).await?),
        "3" => print_page(
            &scraper
                .user_followers(&FetchArgs::for_id(id).with_cursor(cursor))
                .await?,
        ),
        "4" => print_page(
            &scraper
                .tweet_replies(&FetchArgs::for_id(id).with_cursor(cursor))
                .await?,
        ),
        "5" => {
            let mut args = FetchArgs::default().with_cursor(cursor);
            args.filter = Some(TweetFilter {
                hashtags: vec![id],
                ..Default::default()
            });
            print_page(&scraper.search(&args).await?)
        }
        other => {
            println!("❌ Unknown choice '{}'", other);
            Err("Unknown resource".into())
        }
    }
}
