use thiserror::Error;

use crate::http::FetchError;

#[derive(Debug, Error)]
pub enum SiteError {
    /// The post index could not be fetched or parsed. Fatal to a reload.
    #[error("posts failed to load from {url}: {source}")]
    DataUnavailable {
        url: String,
        #[source]
        source: FetchError,
    },
}
