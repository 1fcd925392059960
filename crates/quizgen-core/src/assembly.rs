//! Final payload assembly: stem plus shaped subject, answers passed through.

use crate::shared::{FullQuestion, QuestionTemplate};
use crate::synth::AnswerSet;

/// Concatenates the stored stem with the synthesizer's shaped subject text.
/// Upstream stages already guaranteed the answer invariants, so this stage
/// cannot fail on its own.
pub fn assemble(template: &QuestionTemplate, answers: AnswerSet) -> FullQuestion {
    FullQuestion {
        question_body: format!("{}{}", template.body, answers.subject),
        correct_answer: answers.correct,
        incorrect_answers: answers.incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_and_shaped_subject_concatenate() {
        let template = QuestionTemplate {
            body: "¿Cual es la capital de ".into(),
            kind: "pais".into(),
        };
        let answers = AnswerSet {
            subject: "Francia?".into(),
            correct: "París".into(),
            incorrect: vec!["Lyon".into(), "Marsella".into(), "Niza".into()],
        };

        let question = assemble(&template, answers);

        assert_eq!(question.question_body, "¿Cual es la capital de Francia?");
        assert_eq!(question.correct_answer, "París");
        assert_eq!(
            question.incorrect_answers,
            vec!["Lyon".to_string(), "Marsella".into(), "Niza".into()]
        );
    }
}
