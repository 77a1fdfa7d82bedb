pub mod config;
pub mod logger;
pub mod error;
pub mod http;
pub mod post;
pub mod content_index;
pub mod comments;
pub mod site_context;
pub mod links;
pub mod feed;
pub mod util;
pub mod view;
mod test_data;
