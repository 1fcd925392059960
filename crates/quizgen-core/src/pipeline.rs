//! Generation pipeline: draw a template, resolve its descriptor, fetch
//! fact rows, synthesize answers, assemble the payload.
//!
//! Each request is handled independently with no shared mutable state;
//! the catalog is read-only after startup and the external calls sit
//! behind trait seams so the gateway tests can run against fakes.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::assembly::assemble;
use crate::catalog::{FactQueryDescriptor, TemplateCatalog};
use crate::error::SynthesisError;
use crate::shared::{FactRow, FullQuestion, QuestionTemplate};
use crate::synth::synthesize;

/// Read-only query against the external knowledge source. A single call,
/// no retries; retry policy belongs to the caller.
#[async_trait::async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch(&self, descriptor: &FactQueryDescriptor)
        -> Result<Vec<FactRow>, SynthesisError>;
}

/// The stored-question collaborator: one randomly selected template per call.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    async fn draw(&self) -> Result<QuestionTemplate, SynthesisError>;
}

/// Runs the full question pipeline over injected collaborators.
pub struct QuestionGenerator {
    catalog: Arc<TemplateCatalog>,
    facts: Arc<dyn FactSource>,
    templates: Arc<dyn TemplateStore>,
}

impl QuestionGenerator {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        facts: Arc<dyn FactSource>,
        templates: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            catalog,
            facts,
            templates,
        }
    }

    /// Produces one full question with a fresh generator. The first
    /// failure propagates; no stage is retried and no partial question is
    /// ever returned.
    pub async fn generate(&self) -> Result<FullQuestion, SynthesisError> {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(&mut rng).await
    }

    /// Same pipeline with caller-supplied randomness for reproducible draws.
    pub async fn generate_with_rng<R: Rng + Send>(
        &self,
        rng: &mut R,
    ) -> Result<FullQuestion, SynthesisError> {
        let template = self.templates.draw().await?;
        let descriptor = self.catalog.resolve(&template.kind)?;
        let rows = self.facts.fetch(descriptor).await?;
        debug!(kind = %template.kind, rows = rows.len(), "fact rows fetched");

        let answers = synthesize(&rows, &descriptor.subject_field, &descriptor.answer_field, rng)?;
        Ok(assemble(&template, answers))
    }
}
