use dioxus::prelude::ReadableExt;
use quiz_core::fixed_now;
use quiz_core::model::{AnswerReview, Question, QuestionDraft, QuestionId, SessionReport};

use crate::vm::{SessionIntent, SessionVm, map_report};

use super::test_harness::{
    ViewKind, drive_dom, setup_view_harness, setup_view_harness_with_missing_bank,
    setup_view_harness_with_report,
};

fn question(id: u64, correct: i64) -> Question {
    QuestionDraft {
        text: format!("Question {id}?"),
        options: vec![
            format!("a{id}"),
            format!("b{id}"),
            format!("c{id}"),
        ],
        correct_answer: correct,
        explanation: Some(format!("Because {id}.")),
    }
    .validate()
    .unwrap()
    .assign_id(QuestionId::new(id))
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_bank_summary() {
    let mut harness = setup_view_harness(ViewKind::Home, 5, 3);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("5 questions loaded."), "missing count in {html}");
    assert!(html.contains("Each test asks 3 questions."), "missing size in {html}");
    assert!(html.contains("Start Test"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_notes_short_bank() {
    let mut harness = setup_view_harness(ViewKind::Home, 5, 45);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Each test asks 5 questions."), "missing size in {html}");
    assert!(
        html.contains("every question will be used"),
        "missing shortfall note in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_and_retry() {
    let mut harness = setup_view_harness_with_missing_bank(ViewKind::Home);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Could not load the question bank."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Session, 5, 3);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("A."), "missing option label in {html}");
    assert!(html.contains("Previous"), "missing previous in {html}");
    assert!(html.contains("Next"), "missing next in {html}");
    // Both nav buttons start out unusable: previous at the first question,
    // next until an option is picked.
    assert!(html.contains("disabled"), "missing disabled nav in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_selects_and_advances() {
    let mut harness = setup_view_harness(ViewKind::Session, 5, 3);
    harness.rebuild();
    harness.settle().await;

    let handles = harness.session_handles.clone().expect("session handles");
    handles.dispatch().call(SessionIntent::Select(1));
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(html.contains("option-btn--selected"), "missing selection in {html}");
    let vm = handles.vm();
    assert_eq!(vm.read().as_ref().map(SessionVm::selected), Some(Some(1)));

    handles.dispatch().call(SessionIntent::Next);
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(html.contains("Question 2 of 3"), "missing advance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_exhausted_bank_offers_reset() {
    let mut harness = setup_view_harness(ViewKind::Session, 3, 3);
    // Consume every question once so the next selection comes up empty.
    harness.quiz.load_bank().await.expect("load bank");
    harness.quiz.start_test().expect("first test");

    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("No questions are available for a new test."),
        "missing empty-selection message in {html}"
    );
    assert!(
        html.contains("Reset used questions"),
        "missing reset button in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_failed_report() {
    let now = fixed_now();
    let reviews = vec![
        AnswerReview::for_answer(1, &question(1, 0), Some(0)),
        AnswerReview::for_answer(2, &question(2, 1), Some(2)),
        AnswerReview::for_answer(3, &question(3, 2), None),
    ];
    let report = SessionReport::from_reviews(now, now, reviews).unwrap();

    let mut harness = setup_view_harness_with_report(ViewKind::Results, map_report(&report));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("FAILED"), "missing banner in {html}");
    assert!(
        html.contains("You scored 1 / 3 (33.3%)."),
        "missing score in {html}"
    );
    assert!(html.contains("Your answer: c2"), "missing chosen answer in {html}");
    assert!(html.contains("Your answer: Not answered"), "missing skip in {html}");
    assert!(html.contains("Correct answer: c3"), "missing correct answer in {html}");
    assert!(html.contains("Because 2."), "missing explanation in {html}");
    assert!(html.contains("Take Another Test"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_perfect_run_congratulates() {
    let now = fixed_now();
    let reviews = vec![
        AnswerReview::for_answer(1, &question(1, 0), Some(0)),
        AnswerReview::for_answer(2, &question(2, 2), Some(2)),
    ];
    let report = SessionReport::from_reviews(now, now, reviews).unwrap();

    let mut harness = setup_view_harness_with_report(ViewKind::Results, map_report(&report));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("PASSED"), "missing banner in {html}");
    assert!(html.contains("Perfect score."), "missing congratulation in {html}");
    assert!(!html.contains("Review"), "unexpected review list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_report_prompts_home() {
    let mut harness = setup_view_harness(ViewKind::Results, 3, 3);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("No completed test yet."), "missing fallback in {html}");
    assert!(html.contains("Back to Welcome"), "missing home button in {html}");
}
