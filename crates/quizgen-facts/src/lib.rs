//! quizgen-facts: reqwest-backed collaborators for the question pipeline.
//!
//! `WikidataClient` executes catalog queries against the SPARQL endpoint;
//! the template stores supply one random question template per call.

mod templates;
mod wikidata;

pub use templates::{HttpTemplateStore, StaticTemplateStore};
pub use wikidata::WikidataClient;
