use std::fmt::Write;

use crate::links::PROFILES;
use crate::post::PostMetadata;

fn comment_label(count: u32) -> String {
    match count {
        1 => "1 comment".to_string(),
        x => format!("{} comments", x),
    }
}

/// Plain text listing, one post per line, followed by the tag cloud.
pub fn render_list<'a>(posts: impl IntoIterator<Item=&'a PostMetadata>, tags: &[String]) -> String {
    let mut buf = String::new();

    for post in posts {
        let _ = writeln!(&mut buf, "{}  {:<40}  {:>12}  [{}]",
                         post.date,
                         post.title,
                         comment_label(post.comment_count),
                         post.id);
    }

    if !tags.is_empty() {
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "Tags: {}", tags.join(", "));
    }

    buf
}

pub fn render_post(post: &PostMetadata) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# {}", post.title);
    let _ = writeln!(&mut buf, "{} | {}", post.date, comment_label(post.comment_count));
    if !post.tags.is_empty() {
        let _ = writeln!(&mut buf, "Tags: {}", post.tags.join(", "));
    }
    if !post.image.is_empty() {
        let _ = writeln!(&mut buf, "Image: {}", post.image);
    }
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "{}", post.description);

    buf
}

pub fn render_profiles() -> String {
    let mut buf = String::new();
    for (name, link) in PROFILES {
        let _ = writeln!(&mut buf, "{}: {}", name, link);
    }
    buf
}

#[cfg(test)]
mod tests {
    use crate::post::PostIndex;
    use crate::test_data::INDEX_DATA;

    use super::*;

    fn posts() -> Vec<PostMetadata> {
        let mut posts = serde_json::from_str::<PostIndex>(INDEX_DATA).unwrap().into_posts();
        posts[0].comment_count = 1;
        posts[2].comment_count = 7;
        posts
    }

    #[test]
    fn test_render_list() {
        let posts = posts();
        let tags = vec!["meta".to_string(), "rust".to_string()];
        let list = render_list(&posts, &tags);
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("01-01-2024  Hello World"));
        assert!(lines[0].contains(" 1 comment  [hello-world]"));
        assert!(lines[1].contains("0 comments  [rust-lifetimes]"));
        assert!(lines[2].contains("7 comments  [on-blogging]"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Tags: meta, rust");
    }

    #[test]
    fn test_render_list_without_tags() {
        let list = render_list(&Vec::<PostMetadata>::new(), &[]);
        assert_eq!(list, "");
    }

    #[test]
    fn test_render_post() {
        let posts = posts();
        let rendered = render_post(&posts[1]);
        assert_eq!(rendered, "# Understanding lifetimes\n14-03-2024 | 0 comments\nTags: rust, programming\nImage: lifetimes.png\n\nBorrowing without tears\n");
    }

    #[test]
    fn test_render_profiles() {
        let rendered = render_profiles();
        assert!(rendered.starts_with("GitHub: https://github.com/adam-drewery\n"));
        assert_eq!(rendered.lines().count(), 3);
    }
}
