//! Shared types used across the quizgen crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One stored question template: a partial sentence stem plus the catalog
/// key selecting how facts are queried for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTemplate {
    /// Partial sentence stem, e.g. "¿Cual es la capital de ".
    pub body: String,
    /// Catalog key. Wire name kept from the stored-question schema.
    #[serde(rename = "type")]
    pub kind: String,
}

/// One variable binding from the fact source. Values are opaque text; some
/// encode raw entity identifiers rather than resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// A single fact row: field name -> binding. Rows carry no ordering by
/// correctness; any row may serve as the truth.
pub type FactRow = HashMap<String, FieldValue>;

/// The fully assembled multiple-choice question returned to callers.
/// Built fresh per request and never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullQuestion {
    pub question_body: String,
    pub correct_answer: String,
    /// Exactly three distinct wrong options.
    pub incorrect_answers: Vec<String>,
}

/// Global application configuration (gateway + clients). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity used in startup logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// SPARQL endpoint of the external knowledge source.
    pub fact_endpoint: String,
    /// Deadline applied to each fact-source fetch.
    pub fetch_timeout_ms: u64,
    /// Base URL of the stored-question service. When absent the gateway
    /// falls back to the built-in static template store.
    #[serde(default)]
    pub template_store_url: Option<String>,
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `QUIZGEN_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("QUIZGEN_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Quizgen Gateway")?
            .set_default("port", 8005_i64)?
            .set_default("fact_endpoint", "https://query.wikidata.org/sparql")?
            .set_default("fetch_timeout_ms", 10_000_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("QUIZGEN").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
