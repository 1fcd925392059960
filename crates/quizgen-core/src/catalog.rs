//! Immutable mapping from question type to fact-query descriptor.
//!
//! Built once at startup from a fixed table and injected into the
//! pipeline; there is no mutation API. Each query asks the knowledge
//! source for 30+ randomly ordered candidate rows so the distractor
//! draw almost always converges without degenerate retries.

use std::collections::HashMap;

use crate::error::SynthesisError;

/// How to query the knowledge source for one question type, and which
/// result fields carry the human-readable subject and answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactQueryDescriptor {
    /// Query text in the source's native language (SPARQL for Wikidata).
    pub query: String,
    /// Result field holding the subject label woven into the stem.
    pub subject_field: String,
    /// Result field holding the answer text.
    pub answer_field: String,
}

impl FactQueryDescriptor {
    pub fn new(
        query: impl Into<String>,
        subject_field: impl Into<String>,
        answer_field: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            subject_field: subject_field.into(),
            answer_field: answer_field.into(),
        }
    }
}

const PAIS_QUERY: &str = "\
SELECT ?country ?countryLabel ?capital ?capitalLabel
WHERE {
  ?country wdt:P31 wd:Q6256.
  ?country wdt:P36 ?capital.
  SERVICE wikibase:label {
    bd:serviceParam wikibase:language \"[AUTO_LANGUAGE],es\".
  }
}
ORDER BY RAND()
LIMIT 35";

const POBLACION_QUERY: &str = "\
SELECT DISTINCT ?city ?cityLabel ?population ?country ?countryLabel ?loc WHERE {
  {
    SELECT (MAX(?population_) AS ?population) ?country WHERE {
      ?city wdt:P31/wdt:P279* wd:Q515 .
      ?city wdt:P1082 ?population_ .
      ?city wdt:P17 ?country .
    }
    GROUP BY ?country
    ORDER BY DESC(?population)
  }
  ?city wdt:P31/wdt:P279* wd:Q515 .
  ?city wdt:P1082 ?population .
  ?city wdt:P17 ?country .
  ?city wdt:P625 ?loc .
  SERVICE wikibase:label {
    bd:serviceParam wikibase:language \"en\" .
  }
}
ORDER BY RAND()
LIMIT 30";

/// Read-only catalog resolving template kinds to query descriptors.
pub struct TemplateCatalog {
    entries: HashMap<String, FactQueryDescriptor>,
}

impl TemplateCatalog {
    /// Builds a catalog from an explicit table (used by tests and clones
    /// that carry their own question types).
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FactQueryDescriptor)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }

    /// The production table: country capitals and most-populous cities.
    pub fn builtin() -> Self {
        Self::from_entries([
            (
                "pais",
                FactQueryDescriptor::new(PAIS_QUERY, "countryLabel", "capitalLabel"),
            ),
            (
                "poblacion",
                FactQueryDescriptor::new(POBLACION_QUERY, "cityLabel", "population"),
            ),
        ])
    }

    /// Resolves a template kind to its descriptor.
    pub fn resolve(&self, kind: &str) -> Result<&FactQueryDescriptor, SynthesisError> {
        self.entries
            .get(kind)
            .ok_or_else(|| SynthesisError::UnknownTemplateType(kind.to_string()))
    }

    /// All known kinds, sorted for a stable listing.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.entries.keys().cloned().collect();
        kinds.sort();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_idempotent() {
        let catalog = TemplateCatalog::builtin();
        let first = catalog.resolve("pais").unwrap().clone();
        let second = catalog.resolve("pais").unwrap();
        assert_eq!(&first, second);
        assert_eq!(first.subject_field, "countryLabel");
        assert_eq!(first.answer_field, "capitalLabel");
    }

    #[test]
    fn unknown_kind_is_a_typed_error() {
        let catalog = TemplateCatalog::builtin();
        let err = catalog.resolve("nonexistent_type").unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::UnknownTemplateType(kind) if kind == "nonexistent_type"
        ));
    }

    #[test]
    fn builtin_queries_request_enough_candidates() {
        let catalog = TemplateCatalog::builtin();
        assert!(catalog.resolve("pais").unwrap().query.contains("LIMIT 35"));
        assert!(catalog.resolve("poblacion").unwrap().query.contains("LIMIT 30"));
    }

    #[test]
    fn kinds_lists_the_table() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.kinds(), vec!["pais".to_string(), "poblacion".to_string()]);
    }
}
