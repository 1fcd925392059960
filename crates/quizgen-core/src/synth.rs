//! Answer synthesis: one correct draw plus three distinct distractors,
//! both by rejection sampling over the fetched fact rows.
//!
//! The source already randomizes result order (`ORDER BY RAND()` in the
//! query text), so uniform index draws over the full set approximate
//! uniform sampling without a second shuffle pass. Each loop is bounded
//! at `4 x n` draws; exhausting the budget converts into a typed error
//! instead of spinning on pathological data.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::error::SynthesisError;
use crate::shared::FactRow;

/// Distractors drawn per question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Draw budget per rejection loop, proportional to the candidate pool.
const ATTEMPTS_PER_ROW: usize = 4;

/// Output of one synthesis pass over a fact-row set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    /// Shaped subject text: the accepted subject label plus a trailing `?`.
    pub subject: String,
    pub correct: String,
    /// Exactly [`DISTRACTOR_COUNT`] entries, all distinct, none equal to
    /// `correct`.
    pub incorrect: Vec<String>,
}

/// True for raw entity identifiers the labeling service failed to resolve
/// (`Q` followed only by digits).
fn is_unresolved_label(subject: &str) -> bool {
    match subject.strip_prefix('Q') {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

fn field<'a>(row: &'a FactRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|binding| binding.value.as_str())
}

fn distinct_answers(rows: &[FactRow], answer_field: &str) -> usize {
    rows.iter()
        .filter_map(|row| field(row, answer_field))
        .collect::<HashSet<_>>()
        .len()
}

/// Draws one correct answer and three distinct incorrect answers from the
/// fact rows, using the caller's generator for every index draw so seeded
/// runs are reproducible.
pub fn synthesize<R: Rng>(
    rows: &[FactRow],
    subject_field: &str,
    answer_field: &str,
    rng: &mut R,
) -> Result<AnswerSet, SynthesisError> {
    // A pool under 4 rows can never yield 1 correct + 3 distinct wrong.
    if rows.len() < DISTRACTOR_COUNT + 1 {
        return Err(SynthesisError::InsufficientDistinctAnswers {
            distinct: distinct_answers(rows, answer_field),
        });
    }
    let budget = ATTEMPTS_PER_ROW * rows.len();

    // Correct-answer draw. Rows missing either field are unusable; rows
    // whose subject is an unresolved identifier are rejected and redrawn.
    let mut accepted: Option<(String, String)> = None;
    for _ in 0..budget {
        let row = &rows[rng.gen_range(0..rows.len())];
        let (Some(subject), Some(answer)) = (field(row, subject_field), field(row, answer_field))
        else {
            continue;
        };
        if is_unresolved_label(subject) {
            continue;
        }
        accepted = Some((subject.to_string(), answer.to_string()));
        break;
    }
    let Some((subject, correct)) = accepted else {
        return Err(SynthesisError::LabelResolutionFailure { attempts: budget });
    };

    // Distractor draw with dedup under rejection: a candidate is held only
    // if it differs from the correct answer and from every held distractor.
    let mut incorrect: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    let mut attempts = 0;
    while incorrect.len() < DISTRACTOR_COUNT {
        if attempts == budget {
            return Err(SynthesisError::InsufficientDistinctAnswers {
                distinct: distinct_answers(rows, answer_field),
            });
        }
        attempts += 1;

        let row = &rows[rng.gen_range(0..rows.len())];
        let Some(candidate) = field(row, answer_field) else {
            continue;
        };
        if candidate == correct || incorrect.iter().any(|held| held == candidate) {
            continue;
        }
        incorrect.push(candidate.to_string());
    }

    debug!(%subject, pool = rows.len(), "answer set drawn");

    Ok(AnswerSet {
        subject: format!("{subject}?"),
        correct,
        incorrect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FieldValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SUBJECT: &str = "countryLabel";
    const ANSWER: &str = "capitalLabel";

    fn row(subject: &str, answer: &str) -> FactRow {
        FactRow::from([
            (SUBJECT.to_string(), FieldValue::new(subject)),
            (ANSWER.to_string(), FieldValue::new(answer)),
        ])
    }

    fn numbered_rows(n: usize) -> Vec<FactRow> {
        (0..n)
            .map(|i| row(&format!("Country {i}"), &format!("Capital {i}")))
            .collect()
    }

    #[test]
    fn unresolved_label_pattern() {
        assert!(is_unresolved_label("Q123"));
        assert!(is_unresolved_label("Q7"));
        assert!(!is_unresolved_label("Qatar"));
        assert!(!is_unresolved_label("Q"));
        assert!(!is_unresolved_label("Q12x"));
        assert!(!is_unresolved_label("Belgium"));
    }

    #[test]
    fn invariants_hold_across_seeds() {
        let rows = numbered_rows(30);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap();
            assert_eq!(set.incorrect.len(), 3);
            assert!(!set.incorrect.contains(&set.correct));
            let distinct: HashSet<&String> = set.incorrect.iter().collect();
            assert_eq!(distinct.len(), 3, "distractors must be pairwise distinct");
            assert!(set.subject.ends_with('?'));
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let rows = numbered_rows(30);
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = synthesize(&rows, SUBJECT, ANSWER, &mut first_rng).unwrap();
        let second = synthesize(&rows, SUBJECT, ANSWER, &mut second_rng).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_subjects_are_rejected() {
        // Half the pool carries raw identifiers; the accepted subject must
        // never be one of them, whatever the seed.
        let rows: Vec<FactRow> = (0..30)
            .map(|i| {
                if i % 2 == 0 {
                    row(&format!("Q{i}"), &format!("Capital {i}"))
                } else {
                    row(&format!("Country {i}"), &format!("Capital {i}"))
                }
            })
            .collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap();
            let label = set.subject.trim_end_matches('?');
            assert!(!is_unresolved_label(label), "accepted {label}");
        }
    }

    #[test]
    fn all_unresolved_subjects_fail_instead_of_hanging() {
        let rows: Vec<FactRow> = (0..30)
            .map(|i| row(&format!("Q{}", 100 + i), &format!("Capital {i}")))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let err = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::LabelResolutionFailure { attempts: 120 }
        ));
    }

    #[test]
    fn too_few_distinct_answers_fail_instead_of_hanging() {
        // 30 rows but only 2 distinct answer values: the dedup loop can
        // never reach 3 distractors.
        let rows: Vec<FactRow> = (0..30)
            .map(|i| row(&format!("Country {i}"), if i % 2 == 0 { "Lima" } else { "Quito" }))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let err = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::InsufficientDistinctAnswers { distinct: 2 }
        ));
    }

    #[test]
    fn pools_under_four_rows_fail_up_front() {
        let rows = numbered_rows(3);
        let mut rng = StdRng::seed_from_u64(7);
        let err = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::InsufficientDistinctAnswers { distinct: 3 }
        ));
    }

    #[test]
    fn rows_missing_fields_are_skipped() {
        let mut rows = numbered_rows(29);
        rows.push(FactRow::from([(
            SUBJECT.to_string(),
            FieldValue::new("Country sin capital"),
        )]));
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let set = synthesize(&rows, SUBJECT, ANSWER, &mut rng).unwrap();
            assert_ne!(set.subject, "Country sin capital?");
        }
    }
}
