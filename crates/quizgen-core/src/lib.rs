//! quizgen-core: trivia question synthesis (template catalog, answer
//! synthesizer, question assembly, and the generation pipeline).
//!
//! The gateway and the fact-source clients depend on this crate for the
//! shared types and the `FactSource` / `TemplateStore` seams.

mod assembly;
mod catalog;
mod error;
mod pipeline;
mod shared;
mod synth;

pub use assembly::assemble;
pub use catalog::{FactQueryDescriptor, TemplateCatalog};
pub use error::SynthesisError;
pub use pipeline::{FactSource, QuestionGenerator, TemplateStore};
pub use shared::{CoreConfig, FactRow, FieldValue, FullQuestion, QuestionTemplate};
pub use synth::{synthesize, AnswerSet};
