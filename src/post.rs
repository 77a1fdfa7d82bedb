use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::de::{Error, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::util::post_date::PostDate;

/// Display metadata of one post, as listed in `index.json`.
///
/// The `id` is the key the post is stored under in the index and is
/// assigned while the index is parsed. `comment_count` is only ever
/// written by the comment enrichment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(skip_deserializing)]
    pub id: String,
    pub title: String,
    pub date: PostDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_deserializing)]
    pub comment_count: u32,
}

impl PostMetadata {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Display for PostMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, comments={}, tags=[{}]\ntitle={}",
               self.id,
               self.date,
               self.comment_count,
               self.tags.join(", "),
               self.title,
        )
    }
}

/// Posts of the index, in the order they appear in the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostIndex(Vec<PostMetadata>);

impl PostIndex {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&PostMetadata> {
        self.0.iter()
    }

    pub fn posts_mut(&mut self) -> &mut [PostMetadata] {
        &mut self.0
    }

    pub fn into_posts(self) -> Vec<PostMetadata> {
        self.0
    }
}

impl<'de> Deserialize<'de> for PostIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PostIndexVisitor)
    }
}

struct PostIndexVisitor;

impl<'de> Visitor<'de> for PostIndexVisitor {
    type Value = PostIndex;

    fn expecting(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("a map of post id to post metadata")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
    {
        let mut posts: Vec<PostMetadata> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();

        while let Some((id, mut post)) = map.next_entry::<String, PostMetadata>()? {
            if !seen.insert(id.clone()) {
                return Err(A::Error::custom(format!("duplicate post id {}", id)));
            }
            post.id = id;
            posts.push(post);
        }

        Ok(PostIndex(posts))
    }
}

/// One issue-tracker thread, as returned by the issues endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentThreadSummary {
    pub title: String,
    #[serde(rename = "comments")]
    pub comment_count: u32,
}

impl CommentThreadSummary {
    /// Threads are titled after the post path, e.g. `adam-drewery/blog/hello-world`.
    pub fn post_id(&self) -> &str {
        match self.title.rfind('/') {
            Some(pos) => &self.title[pos + 1..],
            None => self.title.as_str(),
        }
    }
}
