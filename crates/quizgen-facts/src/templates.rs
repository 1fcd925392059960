//! Stored-question collaborators: the remote service and a static
//! in-process fallback.

use std::time::Duration;

use quizgen_core::{QuestionTemplate, SynthesisError, TemplateStore};
use rand::Rng;
use tracing::debug;

/// Draws a random template from the stored-question service
/// (`GET <base>/getQuestion` returning one `{ body, type }` document).
pub struct HttpTemplateStore {
    http: reqwest::Client,
    url: String,
}

impl HttpTemplateStore {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("construct HTTP client");
        Self {
            http,
            url: format!("{}/getQuestion", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait::async_trait]
impl TemplateStore for HttpTemplateStore {
    async fn draw(&self) -> Result<QuestionTemplate, SynthesisError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SynthesisError::StoreUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::StoreUnavailable(format!("status {status}")));
        }

        response
            .json::<QuestionTemplate>()
            .await
            .map_err(|e| SynthesisError::StoreUnavailable(format!("malformed template: {e}")))
    }
}

/// Fixed template set with a uniform random draw. Used when no store URL
/// is configured, and throughout the tests.
pub struct StaticTemplateStore {
    templates: Vec<QuestionTemplate>,
}

impl StaticTemplateStore {
    pub fn new(templates: Vec<QuestionTemplate>) -> Self {
        assert!(!templates.is_empty(), "template set must not be empty");
        Self { templates }
    }

    /// Stems matching the builtin catalog's two question types.
    pub fn builtin() -> Self {
        Self::new(vec![
            QuestionTemplate {
                body: "¿Cual es la capital de ".into(),
                kind: "pais".into(),
            },
            QuestionTemplate {
                body: "¿Cuantos habitantes tiene la ciudad mas poblada de ".into(),
                kind: "poblacion".into(),
            },
        ])
    }
}

#[async_trait::async_trait]
impl TemplateStore for StaticTemplateStore {
    async fn draw(&self) -> Result<QuestionTemplate, SynthesisError> {
        let index = rand::thread_rng().gen_range(0..self.templates.len());
        let template = self.templates[index].clone();
        debug!(kind = %template.kind, "template drawn from static store");
        Ok(template)
    }
}
