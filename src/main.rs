use clap::{Parser, Subcommand};
use anyhow::{Result, anyhow};
use chrono::Utc;
use tracing_subscriber;

use shelterfeed::fetcher::ContentClient;
use shelterfeed::feed::{feed_page, search_feed, TypeFilter};
use shelterfeed::funding::{progress_percent, resolve_status};
use shelterfeed::models::{FeedItem, FeedKind};

#[derive(Parser)]
#[command(name = "shelterfeed")]
#[command(about = "Community feed and fundraising reports for a shelter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page of the merged post/event feed
    Feed {
        #[arg(short, long)]
        shelter_id: String,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Search the feed by free text
    Search {
        #[arg(short, long)]
        shelter_id: String,
        #[arg(short, long)]
        query: String,
        #[arg(short, long, default_value = "all")]
        kind: String,
    },
    /// List fundraisers with their resolved status and progress
    Fundraisers {
        #[arg(short, long)]
        shelter_id: String,
    },
    /// Print the combined donation and fundraiser report
    Dashboard {
        #[arg(short, long)]
        shelter_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = ContentClient::new()?;

    match cli.command {
        Commands::Feed { shelter_id, offset, limit } => {
            let sources = client.fetch_feed_sources(&shelter_id).await?;
            for warning in &sources.warnings {
                eprintln!("  ! {}", warning);
            }

            let page = feed_page(sources.posts, sources.events, offset, limit);
            println!(
                "Showing {} of {} items (more: {})",
                page.items.len(),
                page.total,
                page.has_more
            );
            for item in &page.items {
                print_item(item);
            }
        }
        Commands::Search { shelter_id, query, kind } => {
            let filter = TypeFilter::from_str(&kind)
                .ok_or_else(|| anyhow!("Unknown kind '{}': expected all, post or event", kind))?;

            let sources = client.fetch_feed_sources(&shelter_id).await?;
            for warning in &sources.warnings {
                eprintln!("  ! {}", warning);
            }

            let result = search_feed(sources.posts, sources.events, &query, filter);
            println!("Found {} matching items:", result.total);
            for item in &result.items {
                print_item(item);
            }
        }
        Commands::Fundraisers { shelter_id } => {
            let fundraisers = client.fetch_fundraisers(&shelter_id).await?;
            let now = Utc::now();

            println!("{} fundraisers:", fundraisers.len());
            for fundraiser in &fundraisers {
                println!(
                    "  [{:>9}] {:5.1}% {} ({:.2} / {:.2})",
                    resolve_status(fundraiser, now).as_str(),
                    progress_percent(fundraiser),
                    fundraiser.title,
                    fundraiser.current_amount,
                    fundraiser.goal_amount,
                );
            }
        }
        Commands::Dashboard { shelter_id } => {
            let dashboard = client.fetch_dashboard(&shelter_id).await?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
    }

    Ok(())
}

fn print_item(item: &FeedItem) {
    let kind = match item.kind {
        FeedKind::Post => "post",
        FeedKind::Event => "event",
    };
    println!(
        "  {} [{}] {}",
        item.published.format("%Y-%m-%d %H:%M"),
        kind,
        item.title
    );
    if let Some(ref address) = item.address {
        println!("      at {}", address);
    }
}
