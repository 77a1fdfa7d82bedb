use spdlog::debug;

use crate::error::SiteError;
use crate::http::{get_json, HttpGet};
use crate::post::PostIndex;

pub const INDEX_FILE_NAME: &str = "index.json";

pub fn index_url(content_base: &str) -> String {
    format!("{}/{}", content_base.trim_end_matches('/'), INDEX_FILE_NAME)
}

/// Fetches and parses `<content_base>/index.json`. Any failure is fatal.
pub async fn fetch_post_index<H: HttpGet>(http: &H, content_base: &str) -> Result<PostIndex, SiteError> {
    let url = index_url(content_base);
    debug!("Fetching post index from {}", url);

    match get_json::<H, PostIndex>(http, &url).await {
        Ok(index) => {
            debug!("Post index has {} posts", index.len());
            Ok(index)
        }
        Err(source) => Err(SiteError::DataUnavailable { url, source }),
    }
}
