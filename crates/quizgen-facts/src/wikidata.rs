//! Reqwest client for the external SPARQL knowledge source.

use std::time::Duration;

use quizgen_core::{FactQueryDescriptor, FactRow, FactSource, SynthesisError};
use serde::Deserialize;
use tracing::debug;

const SPARQL_JSON: &str = "application/sparql-results+json";

/// SPARQL JSON results envelope. Only the row bindings are consumed;
/// the header and any extra per-binding keys are ignored.
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<FactRow>,
}

/// Issues one read-only query per fetch. No retries and no interpretation:
/// the decoded rows are returned as-is, and any transport failure or
/// non-success status becomes `SourceUnavailable`.
pub struct WikidataClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WikidataClient {
    /// Builds a client with an explicit per-request deadline, so a stalled
    /// endpoint fails the fetch instead of hanging the pipeline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quizgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("construct HTTP client");
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl FactSource for WikidataClient {
    async fn fetch(
        &self,
        descriptor: &FactQueryDescriptor,
    ) -> Result<Vec<FactRow>, SynthesisError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", descriptor.query.as_str()), ("format", "json")])
            .header(reqwest::header::ACCEPT, SPARQL_JSON)
            .send()
            .await
            .map_err(|e| SynthesisError::SourceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::SourceUnavailable(format!("status {status}")));
        }

        let decoded: SparqlResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::SourceUnavailable(format!("malformed response: {e}")))?;

        debug!(rows = decoded.results.bindings.len(), "SPARQL fetch decoded");
        Ok(decoded.results.bindings)
    }
}
