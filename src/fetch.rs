use crate::{Arrive, Blame};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// User agent sent with every request.  The GitHub API turns away requests without one.
pub const USER_AGENT_VALUE: &str = concat!("dawdle/", env!("CARGO_PKG_VERSION"));

/// The `Fetch` trait is the seam between the org client and the network.
///
/// Implementors make a single read-only GET against `url` and return the decoded JSON body.
/// Production code uses [`HttpFetch`].  Tests swap in [`CannedFetch`] to script responses and
/// count calls without touching the network.
#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn get_json(&self, url: &str) -> Arrive<Value>;
}

/// The `HttpFetch` struct fetches JSON over HTTP using [`reqwest`].
///
/// There is no retry, no pagination and no authentication.  The status code is not inspected:
/// whatever body the endpoint sends back is decoded and returned, so an error document from the
/// server reaches the caller as data.  Transport failures and bodies that are not JSON surface as
/// [`Blame::Http`] with the original [`reqwest::Error`] inside.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    /// Builds a client that identifies itself with [`USER_AGENT_VALUE`].
    ///
    /// Will [`Blame::Http`] if the TLS backend cannot be initialized.
    pub fn new() -> Arrive<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }
}

impl From<reqwest::Client> for HttpFetch {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetch {
    #[tracing::instrument(skip(self))]
    async fn get_json(&self, url: &str) -> Arrive<Value> {
        let response = self.client.get(url).send().await?;
        tracing::trace!("Status: {}", response.status());
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

/// The `CannedFetch` struct is a test double for [`Fetch`].
///
/// Responses are scripted up front with [`CannedFetch::with_response`].  Every call is recorded,
/// hit or miss, so a test can check both which urls were requested and how many times.
/// Asking for a url with no script will [`Blame::Unscripted`].
#[derive(Debug, Default)]
pub struct CannedFetch {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl CannedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `body` as the response for `url`, replacing any earlier script for it.
    pub fn with_response(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    /// Urls requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, url: &str) {
        let mut calls = match self.calls.lock() {
            Ok(calls) => calls,
            Err(poisoned) => poisoned.into_inner(),
        };
        calls.push(url.to_string());
    }
}

#[async_trait::async_trait]
impl Fetch for CannedFetch {
    async fn get_json(&self, url: &str) -> Arrive<Value> {
        self.record(url);
        match self.responses.get(url) {
            Some(body) => Ok(body.clone()),
            None => {
                tracing::warn!("No canned response for {url}");
                Err(Blame::Unscripted {
                    url: url.to_string(),
                })
            }
        }
    }
}
