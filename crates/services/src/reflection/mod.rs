mod flow;
mod quiz;

pub use flow::{
    LATEST, ReflectionField, ReflectionFlow, ReflectionOutcome, ReflectionStage,
    ReflectionSubmission, SUBMIT_FAILED, rating_label,
};
pub use quiz::{AnswerFeedback, QuestionSet, QuizQuestion, QuizScore, question_set_for, score};
