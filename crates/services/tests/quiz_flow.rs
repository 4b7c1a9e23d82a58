use quiz_core::fixed_clock;
use services::{QuestionSource, QuizService};

fn document() -> String {
    let questions: Vec<String> = (1..=5)
        .map(|id| {
            format!(
                r#"{{ "id": {id}, "question": "Question {id}?", "options": ["alpha {id}", "beta {id}", "gamma {id}"], "correctAnswer": 1, "explanation": "beta is right" }}"#
            )
        })
        .collect();
    format!(r#"{{ "questions": [{}] }}"#, questions.join(","))
}

#[tokio::test]
async fn quiz_flow_loads_answers_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    tokio::fs::write(&path, document()).await.unwrap();

    let service = QuizService::new(fixed_clock(), QuestionSource::File(path), 3);
    let summary = service.load_bank().await.unwrap();
    assert_eq!(summary.available, 5);
    assert_eq!(summary.test_size, 3);

    let mut session = service.start_test().unwrap();
    assert_eq!(session.total_questions(), 3);

    // Answer every question with its correct option, walking the cursor the
    // way the UI would.
    loop {
        let correct = session.current_question().correct_index();
        session.select_answer(correct).unwrap();
        if session.is_last() {
            break;
        }
        session.advance();
    }

    let report = service.finish_test(&mut session).unwrap();
    assert_eq!(report.correct(), 3);
    assert_eq!(report.percentage(), 100.0);
    assert!(report.passed());
    assert!(report.is_perfect());
    assert!(report.incorrect().is_empty());
    for review in report.reviews() {
        assert!(review.chosen().is_some());
        assert!(review.correct_option().starts_with("beta"));
    }
}

#[tokio::test]
async fn quiz_flow_reports_missed_questions_for_review() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    tokio::fs::write(&path, document()).await.unwrap();

    let service = QuizService::new(fixed_clock(), QuestionSource::File(path), 3);
    service.load_bank().await.unwrap();

    let mut session = service.start_test().unwrap();

    // First question answered wrong, second right, third left open.
    let wrong = (session.current_question().correct_index() + 1) % 3;
    session.select_answer(wrong).unwrap();
    session.advance();
    let correct = session.current_question().correct_index();
    session.select_answer(correct).unwrap();

    let report = service.finish_test(&mut session).unwrap();
    assert_eq!(report.correct(), 1);
    assert_eq!(report.total(), 3);
    assert!(!report.passed());

    let incorrect = report.incorrect();
    assert_eq!(incorrect.len(), 2);
    assert!(incorrect.iter().any(|r| r.chosen().is_none()));
    for review in incorrect {
        assert_eq!(review.explanation(), "beta is right");
    }
}

#[tokio::test]
async fn history_spans_tests_until_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    tokio::fs::write(&path, document()).await.unwrap();

    let service = QuizService::new(fixed_clock(), QuestionSource::File(path), 5);
    service.load_bank().await.unwrap();

    let mut first = service.start_test().unwrap();
    assert_eq!(first.total_questions(), 5);
    service.finish_test(&mut first).unwrap();
    assert_eq!(service.history_len(), 5);

    // Everything is used and floor(5 * 0.25) = 1 repeat cannot fill a test,
    // but it does allow a short one.
    let second = service.start_test().unwrap();
    assert_eq!(second.total_questions(), 1);

    service.reset_history();
    let third = service.start_test().unwrap();
    assert_eq!(third.total_questions(), 5);
}
