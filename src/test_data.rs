#[cfg(test)]
pub const INDEX_DATA: &str = r#"{
  "hello-world": {
    "title": "Hello World",
    "description": "First post on the new blog",
    "image": "hello.png",
    "date": "01-01-2024",
    "tags": ["meta"]
  },
  "rust-lifetimes": {
    "title": "Understanding lifetimes",
    "description": "Borrowing without tears",
    "image": "lifetimes.png",
    "date": "14-03-2024",
    "tags": ["rust", "programming"]
  },
  "on-blogging": {
    "title": "On blogging",
    "description": "Why bother writing things down",
    "image": "",
    "date": "25-12-2024",
    "tags": ["meta", "writing"]
  }
}"#;

#[cfg(test)]
pub const ISSUES_DATA: &str = r#"[
  {"title": "adam-drewery/blog/hello-world", "comments": 3, "state": "open"},
  {"title": "adam-drewery/blog/on-blogging", "comments": 7, "state": "open"},
  {"title": "adam-drewery/blog/deleted-post", "comments": 11, "state": "closed"}
]"#;

#[cfg(test)]
pub const POST_SOURCE: &str = "# Hello World

This is the **first** post.

- one
- two
";
