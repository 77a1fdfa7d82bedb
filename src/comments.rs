use std::collections::HashMap;

use spdlog::debug;

use crate::http::{get_json, FetchError, HttpGet};
use crate::post::{CommentThreadSummary, PostMetadata};

pub const ISSUES_PATH: &str = "issues";

pub fn issues_url(issue_tracker_base: &str) -> String {
    format!("{}/{}", issue_tracker_base.trim_end_matches('/'), ISSUES_PATH)
}

/// Outcome of the comment count enrichment.
#[derive(Debug)]
pub enum Enrichment {
    Applied {
        matched: usize,
        unmatched: usize,
    },
    /// Nothing was changed. Counts keep their default.
    Skipped(FetchError),
}

impl Enrichment {
    pub fn is_applied(&self) -> bool {
        matches!(self, Enrichment::Applied { .. })
    }
}

/// Sets `comment_count` on every post with a matching thread.
/// Threads pointing at unknown posts are ignored.
pub fn apply_comment_counts(posts: &mut [PostMetadata], threads: &[CommentThreadSummary]) -> Enrichment {
    let positions: HashMap<String, usize> = posts.iter()
        .enumerate()
        .map(|(pos, post)| (post.id.clone(), pos))
        .collect();

    let mut matched = 0;
    let mut unmatched = 0;
    for thread in threads {
        match positions.get(thread.post_id()) {
            Some(&pos) => {
                posts[pos].comment_count = thread.comment_count;
                matched += 1;
            }
            None => {
                debug!("No post {} for thread {}", thread.post_id(), thread.title);
                unmatched += 1;
            }
        }
    }

    Enrichment::Applied { matched, unmatched }
}

/// Fetches the thread list and merges comment counts into `posts`.
/// Failures are reported, never raised. The caller decides how to log them.
pub async fn enrich_comments<H: HttpGet>(http: &H, issue_tracker_base: &str, posts: &mut [PostMetadata]) -> Enrichment {
    let url = issues_url(issue_tracker_base);
    debug!("Fetching comment threads from {}", url);

    match get_json::<H, Vec<CommentThreadSummary>>(http, &url).await {
        Ok(threads) => apply_comment_counts(posts, &threads),
        Err(e) => Enrichment::Skipped(e),
    }
}
