use std::collections::HashMap;

use spdlog::{info, warn};

use crate::comments::{enrich_comments, Enrichment};
use crate::config::Sources;
use crate::content_index::fetch_post_index;
use crate::error::SiteError;
use crate::http::HttpGet;
use crate::post::PostMetadata;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SiteState {
    Uninitialized,
    Ready,
}

/// The post list shown by the site, plus what is needed to refresh it.
///
/// `reload` takes `&mut self`, so two reloads of the same context can never
/// overlap and readers never observe a half-filled list.
pub struct SiteContext<H: HttpGet> {
    http: H,
    sources: Sources,
    posts: Vec<PostMetadata>,
    state: SiteState,
}

impl<H: HttpGet> SiteContext<H> {
    pub fn new(http: H, sources: Sources) -> Self {
        Self {
            http,
            sources,
            posts: vec![],
            state: SiteState::Uninitialized,
        }
    }

    /// Creates the context and runs the first reload.
    pub async fn initialize(http: H, sources: Sources) -> Result<Self, SiteError> {
        let mut context = Self::new(http, sources);
        context.reload().await?;
        Ok(context)
    }

    /// Clears the list, fetches the index, enriches it with comment counts
    /// and repopulates the list in index order.
    ///
    /// A failing index fetch leaves the list empty. A failing enrichment is
    /// logged and reported, and the posts keep a comment count of zero.
    pub async fn reload(&mut self) -> Result<Enrichment, SiteError> {
        self.posts.clear();

        let mut index = fetch_post_index(&self.http, &self.sources.content_base).await?;
        let enrichment = enrich_comments(&self.http, &self.sources.issue_tracker_base, index.posts_mut()).await;

        match &enrichment {
            Enrichment::Applied { matched, unmatched } => {
                info!("Comment counts applied. matched={}, unmatched={}", matched, unmatched);
            }
            Enrichment::Skipped(cause) => {
                warn!("Comment counts skipped: {}", cause);
            }
        }

        self.posts = index.into_posts();
        self.state = SiteState::Ready;
        info!("Loaded {} posts", self.posts.len());

        Ok(enrichment)
    }

    pub fn state(&self) -> SiteState {
        self.state
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    pub fn posts(&self) -> &[PostMetadata] {
        &self.posts
    }

    pub fn find(&self, id: &str) -> Option<&PostMetadata> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn posts_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item=&'a PostMetadata> + 'a {
        self.posts.iter().filter(move |p| p.has_tag(tag))
    }

    /// Distinct tags, most used first. Ties are ordered by name.
    pub fn tags(&self) -> Vec<String> {
        let mut tag_map: HashMap<&str, u32> = HashMap::new();
        for post in self.posts.iter() {
            for tag in post.tags.iter() {
                *tag_map.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tag_list: Vec<(&str, u32)> = tag_map.into_iter().collect();
        tag_list.sort_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
        tag_list.into_iter().map(|(t, _)| t.to_string()).collect()
    }
}
