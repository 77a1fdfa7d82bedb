pub mod list_renderer;
pub mod rss_renderer;
