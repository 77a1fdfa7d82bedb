use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use drewery_blog::config::open_config;
use drewery_blog::http::{HttpClient, HttpGet};
use drewery_blog::logger::{configure_logger, ConsoleOutput};
use drewery_blog::post::PostMetadata;
use drewery_blog::site_context::SiteContext;
use drewery_blog::view::list_renderer::{render_list, render_post, render_profiles};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Only list posts with this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Show a single post instead of the list
    #[arg(short, long)]
    post: Option<String>,

    /// Print the post list as JSON. Logs go to stderr
    #[arg(long)]
    json: bool,
}

impl Args {
    fn console_output(&self) -> ConsoleOutput {
        if self.json {
            ConsoleOutput::Stderr
        } else {
            ConsoleOutput::Split
        }
    }
}

/// Everything the command prints on stdout goes through here.
fn write_output<H: HttpGet>(args: &Args, site: &SiteContext<H>, out: &mut impl Write) -> Result<()> {
    if let Some(ref id) = args.post {
        return match site.find(id) {
            Some(post) => Ok(write!(out, "{}", render_post(post))?),
            None => Err(anyhow!("No post with id {}", id)),
        };
    }

    let posts: Vec<&PostMetadata> = match args.tag {
        Some(ref tag) => site.posts_with_tag(tag).collect(),
        None => site.posts().iter().collect(),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &posts)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_list(posts, &site.tags()))?;
        writeln!(out)?;
        write!(out, "{}", render_profiles())?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = open_config(args.config_path.clone().map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config, args.console_output()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Loading posts from {}", config.sources.content_base);
    let http = HttpClient::new()?;
    let site = match SiteContext::initialize(http, config.sources.clone()).await {
        Ok(site) => site,
        Err(err) => {
            error!("{}", err);
            eprintln!("Posts failed to load");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = write_output(&args, &site, &mut stdout.lock()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    Ok(())
}
