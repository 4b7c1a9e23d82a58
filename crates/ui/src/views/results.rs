use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;
use crate::vm::{ReportVm, ReviewVm};

#[component]
pub fn ResultsView() -> Element {
    let navigator = use_navigator();
    let report = use_context::<Signal<Option<ReportVm>>>();
    let report_guard = report.read();

    rsx! {
        div { class: "page results-page",
            h2 { "Results" }

            if let Some(report) = report_guard.as_ref() {
                ResultsSummary { report: report.clone() }
            } else {
                p { "No completed test yet." }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Back to Welcome"
                }
            }
        }
    }
}

#[component]
fn ResultsSummary(report: ReportVm) -> Element {
    let navigator = use_navigator();
    let banner = if report.passed {
        ("results-banner results-banner--passed", "PASSED")
    } else {
        ("results-banner results-banner--failed", "FAILED")
    };

    rsx! {
        p { class: "{banner.0}", "{banner.1}" }
        p { class: "results-score",
            "You scored {report.correct} / {report.total} ({report.percentage_str}%)."
        }

        dl { class: "results-times",
            dt { "Started" }
            dd { "{report.started_at_str}" }

            dt { "Completed" }
            dd { "{report.completed_at_str}" }
        }

        if report.is_perfect {
            p { class: "results-perfect", "Perfect score. Every answer was correct!" }
        } else {
            h3 { "Review" }
            ul { class: "results-review",
                for review in report.missed.clone() {
                    ReviewItem { review }
                }
            }
        }

        button {
            class: "btn btn-primary",
            id: "results-restart",
            r#type: "button",
            onclick: move |_| {
                let _ = navigator.push(Route::Home {});
            },
            "Take Another Test"
        }
    }
}

#[component]
fn ReviewItem(review: ReviewVm) -> Element {
    let chosen = review
        .chosen
        .clone()
        .unwrap_or_else(|| "Not answered".to_string());

    rsx! {
        li { class: "review-item",
            p { class: "review-question", "{review.number}. {review.question}" }
            p { class: "review-chosen", "Your answer: {chosen}" }
            p { class: "review-correct", "Correct answer: {review.correct}" }
            p { class: "review-explanation", "{review.explanation}" }
        }
    }
}
