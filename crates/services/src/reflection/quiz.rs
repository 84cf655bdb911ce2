use std::collections::BTreeMap;

use juggle_core::model::JugglingProp;

use crate::progress::percent;

/// Multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: &'static str,
}

impl QuizQuestion {
    /// Exact text match against the correct option.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct
    }

    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.contains(&answer)
    }
}

const BALLS: [QuizQuestion; 3] = [
    QuizQuestion {
        id: "q1",
        prompt: "Which AWS service provides foundation models for generative AI?",
        options: [
            "Amazon SageMaker",
            "Amazon Bedrock",
            "Amazon Rekognition",
            "Amazon Comprehend",
        ],
        correct: "Amazon Bedrock",
    },
    QuizQuestion {
        id: "q2",
        prompt: "In a 3-ball cascade pattern, the balls follow what type of path?",
        options: [
            "Straight lines",
            "Figure-eight pattern",
            "Crossing arcs",
            "Parallel arcs",
        ],
        correct: "Crossing arcs",
    },
    QuizQuestion {
        id: "q3",
        prompt: "What is a key benefit of using managed AI services?",
        options: [
            "Lower cost than custom solutions",
            "Reduced need for ML expertise",
            "Faster time to production",
            "All of the above",
        ],
        correct: "All of the above",
    },
];

const RINGS: [QuizQuestion; 3] = [
    QuizQuestion {
        id: "q1",
        prompt: "Which AWS service is used to build and manage ML pipelines?",
        options: [
            "AWS Lambda",
            "Amazon SageMaker Pipelines",
            "AWS Step Functions",
            "Amazon EMR",
        ],
        correct: "Amazon SageMaker Pipelines",
    },
    QuizQuestion {
        id: "q2",
        prompt: "What is a key technique for juggling rings?",
        options: ["Vertical throws", "Flat spins", "High arcs", "Low passes"],
        correct: "Flat spins",
    },
    QuizQuestion {
        id: "q3",
        prompt: "What is the purpose of MLOps?",
        options: [
            "To automate ML model deployment",
            "To monitor model performance",
            "To streamline the ML lifecycle",
            "All of the above",
        ],
        correct: "All of the above",
    },
];

const GENERIC: [QuizQuestion; 3] = [
    QuizQuestion {
        id: "q1",
        prompt: "Which AWS service is commonly used for serverless computing?",
        options: ["Amazon EC2", "AWS Lambda", "Amazon RDS", "Amazon ECS"],
        correct: "AWS Lambda",
    },
    QuizQuestion {
        id: "q2",
        prompt: "What is a key benefit of event-driven architecture?",
        options: [
            "Tight coupling between components",
            "Synchronous processing",
            "Loose coupling and scalability",
            "Simplified monitoring",
        ],
        correct: "Loose coupling and scalability",
    },
    QuizQuestion {
        id: "q3",
        prompt: "Which service orchestrates workflows across multiple AWS services?",
        options: [
            "AWS AppSync",
            "AWS Step Functions",
            "AWS CloudFormation",
            "AWS Batch",
        ],
        correct: "AWS Step Functions",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSet {
    Balls,
    Rings,
    Generic,
}

impl QuestionSet {
    #[must_use]
    pub fn questions(self) -> &'static [QuizQuestion] {
        match self {
            QuestionSet::Balls => &BALLS,
            QuestionSet::Rings => &RINGS,
            QuestionSet::Generic => &GENERIC,
        }
    }

    #[must_use]
    pub fn question(self, id: &str) -> Option<&'static QuizQuestion> {
        self.questions().iter().find(|q| q.id == id)
    }
}

/// Balls and rings have dedicated questions; every other prop gets the generic set.
#[must_use]
pub fn question_set_for(prop: JugglingProp) -> QuestionSet {
    match prop {
        JugglingProp::Balls => QuestionSet::Balls,
        JugglingProp::Rings => QuestionSet::Rings,
        _ => QuestionSet::Generic,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percent: u8,
}

impl QuizScore {
    pub const PASS_PERCENT: u8 = 70;

    #[must_use]
    pub fn passed(self) -> bool {
        self.percent >= Self::PASS_PERCENT
    }
}

/// Score the answers; unanswered questions count as wrong.
#[must_use]
pub fn score(set: QuestionSet, answers: &BTreeMap<String, String>) -> QuizScore {
    let questions = set.questions();
    let correct = questions
        .iter()
        .filter(|q| answers.get(q.id).is_some_and(|a| q.is_correct(a)))
        .count();
    QuizScore {
        correct,
        total: questions.len(),
        percent: percent(correct, questions.len()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    Unanswered,
    Correct(&'static str),
    Incorrect { correct_answer: &'static str },
}

impl AnswerFeedback {
    #[must_use]
    pub fn for_answer(question: &QuizQuestion, answer: Option<&str>) -> Self {
        match answer {
            None => AnswerFeedback::Unanswered,
            Some(answer) if question.is_correct(answer) => AnswerFeedback::Correct(question.correct),
            Some(_) => AnswerFeedback::Incorrect {
                correct_answer: question.correct,
            },
        }
    }

    #[must_use]
    pub fn message(self) -> Option<String> {
        match self {
            AnswerFeedback::Unanswered => None,
            AnswerFeedback::Correct(answer) => Some(format!("Correct! {answer} is the right answer.")),
            AnswerFeedback::Incorrect { correct_answer } => {
                Some(format!("Incorrect. The correct answer is: {correct_answer}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(q, a)| ((*q).to_string(), (*a).to_string()))
            .collect()
    }

    #[test]
    fn props_map_to_question_sets() {
        assert_eq!(question_set_for(JugglingProp::Balls), QuestionSet::Balls);
        assert_eq!(question_set_for(JugglingProp::Rings), QuestionSet::Rings);
        for prop in [
            JugglingProp::FlowerStick,
            JugglingProp::Clubs,
            JugglingProp::DevilStick,
            JugglingProp::CigarBoxes,
        ] {
            assert_eq!(question_set_for(prop), QuestionSet::Generic);
        }
    }

    #[test]
    fn every_correct_answer_is_an_option() {
        for set in [QuestionSet::Balls, QuestionSet::Rings, QuestionSet::Generic] {
            assert_eq!(set.questions().len(), 3);
            for q in set.questions() {
                assert!(q.has_option(q.correct), "{}", q.prompt);
            }
        }
    }

    #[test]
    fn generic_all_correct_scores_full_marks() {
        let all_right = answers(&[
            ("q1", "AWS Lambda"),
            ("q2", "Loose coupling and scalability"),
            ("q3", "AWS Step Functions"),
        ]);
        let result = score(QuestionSet::Generic, &all_right);
        assert_eq!(result.correct, 3);
        assert_eq!(result.percent, 100);
        assert!(result.passed());
    }

    #[test]
    fn generic_all_wrong_scores_zero() {
        let all_wrong = answers(&[
            ("q1", "Amazon EC2"),
            ("q2", "Synchronous processing"),
            ("q3", "AWS Batch"),
        ]);
        assert_eq!(score(QuestionSet::Generic, &all_wrong).percent, 0);
        assert_eq!(score(QuestionSet::Generic, &BTreeMap::new()).percent, 0);
    }

    #[test]
    fn partial_score_rounds() {
        let one = answers(&[("q2", "Flat spins")]);
        let result = score(QuestionSet::Rings, &one);
        assert_eq!((result.correct, result.total, result.percent), (1, 3, 33));
        let two = answers(&[("q2", "Flat spins"), ("q3", "All of the above")]);
        assert_eq!(score(QuestionSet::Rings, &two).percent, 67);
    }

    #[test]
    fn answers_match_by_exact_text() {
        let q = QuestionSet::Balls.question("q1").unwrap();
        assert!(q.is_correct("Amazon Bedrock"));
        assert!(!q.is_correct("amazon bedrock"));
    }

    #[test]
    fn feedback_messages() {
        let q = QuestionSet::Balls.question("q2").unwrap();
        assert_eq!(AnswerFeedback::for_answer(q, None).message(), None);
        assert_eq!(
            AnswerFeedback::for_answer(q, Some("Crossing arcs")).message().unwrap(),
            "Correct! Crossing arcs is the right answer."
        );
        assert_eq!(
            AnswerFeedback::for_answer(q, Some("Straight lines")).message().unwrap(),
            "Incorrect. The correct answer is: Crossing arcs"
        );
    }
}
