use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use markdown::Options;
use spdlog::debug;

use crate::content_index::INDEX_FILE_NAME;
use crate::post::PostIndex;
use crate::view::rss_renderer::{post_link, FeedItem};

pub fn read_local_index(content_dir: &Path) -> io::Result<PostIndex> {
    let index_path = content_dir.join(INDEX_FILE_NAME);
    let raw = match fs::read_to_string(&index_path) {
        Ok(raw) => raw,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening post index {}: {}", index_path.display(), e))),
    };

    serde_json::from_str(&raw)
        .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error parsing post index {}: {}", index_path.display(), e)))
}

pub fn post_source_path(content_dir: &Path, id: &str) -> PathBuf {
    content_dir.join(format!("{}.md", id))
}

pub fn render_markdown(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

/// One feed item per indexed post, in index order, with the markdown source
/// rendered to HTML.
pub fn build_feed_items(index: &PostIndex, content_dir: &Path, site_url: &str) -> io::Result<Vec<FeedItem>> {
    let mut items = Vec::with_capacity(index.len());

    for post in index.iter() {
        let source_path = post_source_path(content_dir, &post.id);
        let source = match fs::read_to_string(&source_path) {
            Ok(source) => source,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error reading post {} from {}: {}", post.id, source_path.display(), e))),
        };

        debug!("Rendering {} for the feed", post.id);
        items.push(FeedItem {
            title: post.title.clone(),
            link: post_link(site_url, &post.id),
            description: post.description.clone(),
            content_html: render_markdown(&source)?,
            date: post.date,
        });
    }

    Ok(items)
}
