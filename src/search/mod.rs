pub mod http_client;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::app::{Result, StoriesError};
use crate::domain::Story;

pub use http_client::HttpSearchClient;

pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";

/// One issued search, tagged with its position in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

/// The outcome of a [`SearchRequest`], carrying the same sequence number.
#[derive(Debug)]
pub struct SearchCompletion {
    pub seq: u64,
    pub outcome: Result<Vec<Story>>,
}

#[async_trait]
pub trait SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<Story>>;
}

/// Run a request and tag its outcome.
pub async fn execute(client: &(dyn SearchClient + Send + Sync), request: SearchRequest) -> SearchCompletion {
    tracing::debug!("Search #{} for {:?}", request.seq, request.query);
    let outcome = client.search(&request.query).await;
    SearchCompletion {
        seq: request.seq,
        outcome,
    }
}

/// Append `query=<term>` to the endpoint, percent-encoding the term.
pub fn build_search_url(endpoint: &str, query: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("query", query);
    Ok(url)
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    hits: Option<Vec<Story>>,
}

/// Parse the `{ "hits": [...] }` response body.
pub fn parse_hits(body: &[u8]) -> Result<Vec<Story>> {
    let envelope: SearchEnvelope = serde_json::from_slice(body)?;
    envelope
        .hits
        .ok_or_else(|| StoriesError::MalformedResponse("missing `hits` field".into()))
}
