use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use spdlog::{info, warn};

use drewery_blog::config::open_config;
use drewery_blog::feed::{build_feed_items, read_local_index};
use drewery_blog::logger::{configure_logger, ConsoleOutput};
use drewery_blog::view::rss_renderer::FeedChannel;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Directory holding index.json and the post sources. Overrides the config
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,

    /// File the feed is written to. Overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path.map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config, ConsoleOutput::Split) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let content_dir = args.content_dir.unwrap_or(config.paths.content_dir);
    let output = args.output.unwrap_or(config.paths.output_file);

    let index = read_local_index(&content_dir)?;
    let feed = &config.rss_feed;
    let items = build_feed_items(&index, &content_dir, &feed.site_url)?;

    let channel = FeedChannel {
        ch_title: &feed.title,
        ch_link: &feed.site_url,
        ch_desc: &feed.description,
        ch_language: &feed.language,
        ch_editor: &feed.managing_editor,
        ch_web_master: &feed.web_master,
        feed_url: &feed.feed_url,
        pub_date: Utc::now(),
    };
    let xml = channel.render(&items).context("Error rendering the feed")?;

    fs::write(&output, xml).with_context(|| format!("Error writing {}", output.display()))?;
    info!("Wrote {} posts to {}", items.len(), output.display());
    println!("Feed written to {}", output.display());

    Ok(())
}
