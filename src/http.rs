use std::future::Future;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("failed to parse body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A plain GET returning the response body. Non-success statuses are errors.
pub trait HttpGet {
    fn get_text(&self, url: &str) -> impl Future<Output=Result<String, FetchError>> + Send;
}

pub async fn get_json<H, T>(http: &H, url: &str) -> Result<T, FetchError>
    where
        H: HttpGet,
        T: DeserializeOwned,
{
    let body = http.get_text(url).await?;
    Ok(serde_json::from_str(&body)?)
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        // api.github.com refuses requests without a user agent
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()?;
        Ok(Self { client })
    }

    pub fn user_agent() -> &'static str {
        concat!("drewery-blog/", env!("CARGO_PKG_VERSION"))
    }
}

impl HttpGet for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
pub mod stub {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    pub enum StubResponse {
        Body(String),
        Status(u16),
        Unreachable,
    }

    /// Canned responses keyed by URL. Unknown URLs are unreachable.
    #[derive(Default)]
    pub struct StubHttp {
        responses: HashMap<String, StubResponse>,
        calls: AtomicUsize,
    }

    impl StubHttp {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, response: StubResponse) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        pub fn with_body(self, url: &str, body: &str) -> Self {
            self.with(url, StubResponse::Body(body.to_string()))
        }

        pub fn set(&mut self, url: &str, response: StubResponse) {
            self.responses.insert(url.to_string(), response);
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl HttpGet for StubHttp {
        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(url) {
                Some(StubResponse::Body(body)) => Ok(body.clone()),
                Some(StubResponse::Status(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                Some(StubResponse::Unreachable) | None => Err(FetchError::Transport(format!("connection refused: {}", url))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::stub::{StubHttp, StubResponse};
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Thing {
        name: String,
    }

    #[tokio::test]
    async fn test_get_json() {
        let http = StubHttp::new().with_body("http://host/thing", r#"{"name": "x"}"#);
        let thing: Thing = get_json(&http, "http://host/thing").await.unwrap();
        assert_eq!(thing, Thing { name: "x".to_string() });
    }

    #[tokio::test]
    async fn test_get_json_errors() {
        let http = StubHttp::new()
            .with_body("http://host/bad", "not json")
            .with("http://host/down", StubResponse::Status(503));

        let res: Result<Thing, _> = get_json(&http, "http://host/bad").await;
        assert!(matches!(res, Err(FetchError::Parse(_))));

        let res: Result<Thing, _> = get_json(&http, "http://host/down").await;
        assert!(matches!(res, Err(FetchError::Status { status: 503, .. })));

        let res: Result<Thing, _> = get_json(&http, "http://host/missing").await;
        assert!(matches!(res, Err(FetchError::Transport(_))));
        assert_eq!(http.calls(), 3);
    }

    #[tokio::test]
    async fn test_http_error_keeps_source() {
        use std::error::Error;

        let client = HttpClient::new().unwrap();
        let err = client.get_text("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_user_agent() {
        assert!(HttpClient::user_agent().starts_with("drewery-blog/"));
    }
}
