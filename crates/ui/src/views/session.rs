use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::OPTION_COUNT;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReportVm, SessionIntent, SessionVm, start_test};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const OPTION_LABELS: [&str; OPTION_COUNT] = ["A", "B", "C"];

/// Snapshot of the question under the cursor, taken once per render.
#[derive(Clone, Debug, PartialEq)]
struct QuestionCard {
    text: String,
    options: Vec<String>,
    selected: Option<usize>,
    answered: bool,
    is_first: bool,
    is_last: bool,
    position: usize,
    total: usize,
    percent: usize,
}

fn question_card(vm: &SessionVm) -> QuestionCard {
    let progress = vm.progress();
    // A session is never empty, so total is at least 1.
    let percent = progress.position * 100 / progress.total;
    QuestionCard {
        text: vm.question_text().to_string(),
        options: vm.options().to_vec(),
        selected: vm.selected(),
        answered: vm.is_answered(),
        is_first: vm.is_first(),
        is_last: vm.is_last(),
        position: progress.position,
        total: progress.total,
        percent,
    }
}

#[component]
pub fn SessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz = ctx.quiz();
    let report = use_context::<Signal<Option<ReportVm>>>();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<SessionVm>);

    let quiz_for_resource = quiz.clone();
    let resource = use_resource(move || {
        let quiz = quiz_for_resource.clone();
        let mut error = error;
        let mut vm = vm;

        async move {
            let started = start_test(&quiz).await?;
            vm.set(Some(started));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz = quiz.clone();
        use_callback(move |intent: SessionIntent| {
            let mut error = error;
            let mut vm = vm;
            let mut report = report;

            match intent {
                SessionIntent::Select(option) => {
                    if let Some(vm) = vm.write().as_mut() {
                        if let Err(err) = vm.select(option) {
                            error.set(Some(err));
                        }
                    }
                }
                SessionIntent::Previous => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.previous();
                    }
                }
                SessionIntent::Next => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.next();
                    }
                }
                SessionIntent::Submit => {
                    let finished = match vm.write().as_mut() {
                        Some(vm) => vm.finish(&quiz),
                        None => Err(ViewError::Unknown),
                    };
                    match finished {
                        Ok(scored) => {
                            error.set(None);
                            report.set(Some(scored));
                            let _ = navigator.push(Route::Results {});
                        }
                        Err(err) => error.set(Some(err)),
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SessionTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_reset_history = {
        let quiz = quiz.clone();
        use_callback(move |()| {
            quiz.reset_history();
            let mut resource = resource;
            resource.restart();
        })
    };

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if vm.read().is_none() {
            return;
        }
        if let Key::Character(value) = evt.data.key() {
            let option = match value.as_str() {
                "1" => Some(0),
                "2" => Some(1),
                "3" => Some(2),
                _ => None,
            };
            if let Some(option) = option {
                evt.prevent_default();
                dispatch_intent.call(SessionIntent::Select(option));
            }
        }
    });

    let vm_guard = vm.read();
    let card = vm_guard.as_ref().map(question_card);

    rsx! {
        div { class: "page session-page", id: "session-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::EmptySelection {
                        button {
                            class: "btn btn-secondary",
                            id: "session-reset-history",
                            r#type: "button",
                            onclick: move |_| on_reset_history.call(()),
                            "Reset used questions"
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "session-error", "{err.message()}" }
                    }
                    if let Some(card) = card {
                        div { class: "session-progress",
                            span { class: "session-progress__label",
                                "Question {card.position} of {card.total}"
                            }
                            div { class: "session-progress__track",
                                div {
                                    class: "session-progress__fill",
                                    style: "width: {card.percent}%",
                                }
                            }
                        }
                        h2 { class: "session-question", "{card.text}" }
                        div { class: "session-options",
                            for (index, option) in card.options.iter().enumerate() {
                                OptionButton {
                                    index,
                                    label: option.clone(),
                                    selected: card.selected == Some(index),
                                    on_intent: dispatch_intent,
                                }
                            }
                        }
                        div { class: "session-nav",
                            button {
                                class: "btn btn-secondary",
                                id: "session-previous",
                                r#type: "button",
                                disabled: card.is_first,
                                onclick: move |_| dispatch_intent.call(SessionIntent::Previous),
                                "Previous"
                            }
                            if card.is_last {
                                button {
                                    class: "btn btn-primary",
                                    id: "session-submit",
                                    r#type: "button",
                                    disabled: !card.answered,
                                    onclick: move |_| dispatch_intent.call(SessionIntent::Submit),
                                    "Submit"
                                }
                            } else {
                                button {
                                    class: "btn btn-primary",
                                    id: "session-next",
                                    r#type: "button",
                                    disabled: !card.answered,
                                    onclick: move |_| dispatch_intent.call(SessionIntent::Next),
                                    "Next"
                                }
                            }
                        }
                        p { class: "session-hint", "Tip: keys 1-3 pick an answer." }
                    }
                },
            }
        }
    }
}

#[component]
fn OptionButton(
    index: usize,
    label: String,
    selected: bool,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let class = if selected {
        "option-btn option-btn--selected"
    } else {
        "option-btn"
    };
    let tag = OPTION_LABELS.get(index).copied().unwrap_or("?");

    rsx! {
        button {
            class: "{class}",
            id: "session-option-{index}",
            r#type: "button",
            onclick: move |_| on_intent.call(SessionIntent::Select(index)),
            span { class: "option-btn__label", "{tag}." }
            span { class: "option-btn__text", "{label}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SessionTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SessionIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<SessionVm>>>>>,
}

#[cfg(test)]
impl SessionTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SessionIntent>,
        vm: Signal<Option<SessionVm>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<SessionIntent> {
        (*self.dispatch.borrow()).expect("session dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<SessionVm>> {
        (*self.vm.borrow()).expect("session vm registered")
    }
}
