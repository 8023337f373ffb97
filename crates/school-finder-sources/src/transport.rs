//! The HTTP seam every service client talks through.
//!
//! Clients build an [`HttpRequest`], hand it to an [`HttpTransport`] and interpret the
//! [`HttpResponse`] themselves. Connection handling lives entirely behind the trait, so the
//! pipeline can be driven by [`ReqwestTransport`] in production and by
//! [`crate::testing::ScriptedTransport`] in tests.

use std::future::Future;

use super::Result;

/// Nominatim's usage policy requires an identifying agent.
pub const DEFAULT_USER_AGENT: &str = concat!("school-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_owned(), value.into()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A fetch-like HTTP collaborator.
///
/// Implementations return `Ok` for any response that arrived, whatever its status; only
/// connection-level failures are errors.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

#[cfg(feature = "http")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "http")]
mod reqwest_transport {
    use std::time::Duration;

    use reqwest::Client;
    use tracing::{debug, instrument};

    use super::{DEFAULT_USER_AGENT, HttpRequest, HttpResponse, HttpTransport, Method};
    use crate::Result;

    /// [`HttpTransport`] backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
            let client = Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()?;
            Ok(Self { client })
        }

        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl Default for ReqwestTransport {
        fn default() -> Self {
            Self::from_client(
                Client::builder()
                    .user_agent(DEFAULT_USER_AGENT)
                    .build()
                    .unwrap_or_default(),
            )
        }
    }

    impl HttpTransport for ReqwestTransport {
        #[instrument(name = "HTTP request", skip_all, fields(url = %request.url), level = "debug")]
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!(status, bytes = body.len(), "Response received");
            Ok(HttpResponse { status, body })
        }
    }
}
