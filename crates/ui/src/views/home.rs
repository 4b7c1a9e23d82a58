use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::BankSummary;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz = ctx.quiz();

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            // Keep the loading state on screen long enough to register
            // instead of flashing for a single frame.
            tokio::time::sleep(Duration::from_millis(100)).await;
            let summary = quiz
                .load_bank()
                .await
                .map_err(|_| ViewError::LoadFailed)?;
            Ok::<_, ViewError>(summary)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page welcome-page",
            h2 { "Welcome" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Ready(summary) => rsx! {
                    WelcomeDetails { summary }
                    button {
                        class: "btn btn-primary",
                        id: "start-test",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Session {});
                        },
                        "Start Test"
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn WelcomeDetails(summary: BankSummary) -> Element {
    rsx! {
        p { class: "welcome-count", "{summary.available} questions loaded." }
        p { class: "welcome-size", "Each test asks {summary.test_size} questions." }
        if summary.is_short() {
            p { class: "welcome-note",
                "Fewer questions than a full test of {summary.requested}; every question will be used."
            }
        }
    }
}
