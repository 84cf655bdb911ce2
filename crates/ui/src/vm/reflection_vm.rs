use services::reflection::QuizScore;

/// Headline and CSS class for a finished knowledge check.
#[must_use]
pub fn quiz_verdict(score: QuizScore) -> (&'static str, &'static str) {
    if score.passed() {
        ("Passed", "verdict verdict--pass")
    } else {
        ("Keep practicing", "verdict verdict--retry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(correct: usize, total: usize, percent: u8) -> QuizScore {
        QuizScore {
            correct,
            total,
            percent,
        }
    }

    #[test]
    fn pass_mark_is_inclusive() {
        assert_eq!(quiz_verdict(score(7, 10, QuizScore::PASS_PERCENT)).0, "Passed");
        assert_eq!(quiz_verdict(score(3, 3, 100)).0, "Passed");
    }

    #[test]
    fn below_pass_mark_asks_for_more_practice() {
        let (label, class) = quiz_verdict(score(2, 3, 67));
        assert_eq!(label, "Keep practicing");
        assert!(class.ends_with("--retry"));
    }
}
