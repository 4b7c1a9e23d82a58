use std::path::PathBuf;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use tempfile::TempDir;

use quiz_core::fixed_clock;
use services::{QuestionSource, QuizService};

use crate::context::{UiApp, build_app_context};
use crate::views::session::SessionTestHandles;
use crate::views::{HomeView, ResultsView, SessionView};
use crate::vm::ReportVm;

#[derive(Clone)]
struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Session,
    Results,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    initial_report: Option<ReportVm>,
    session_handles: Option<SessionTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| Signal::new(props.initial_report.clone()));
    if let Some(handles) = props.session_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Session => rsx! { SessionView {} },
        ViewKind::Results => rsx! { ResultsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz: Arc<QuizService>,
    pub session_handles: Option<SessionTestHandles>,
    _data_dir: TempDir,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(150),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drives the dom until pending resources have had a chance to finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn question_entry(id: usize) -> String {
    format!(
        r#"{{"id": {id}, "question": "Question {id}?", "options": ["a{id}", "b{id}", "c{id}"], "correctAnswer": 0, "explanation": "Because {id}."}}"#
    )
}

fn write_bank(count: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let entries = (1..=count)
        .map(question_entry)
        .collect::<Vec<_>>()
        .join(",\n");
    let path = dir.path().join("questions.json");
    std::fs::write(&path, format!("{{\"questions\": [{entries}]}}")).expect("write bank");
    (dir, path)
}

fn build_harness(
    view: ViewKind,
    source: QuestionSource,
    test_size: usize,
    initial_report: Option<ReportVm>,
    data_dir: TempDir,
) -> ViewHarness {
    let quiz = Arc::new(QuizService::new(fixed_clock(), source, test_size));

    let session_handles = match view {
        ViewKind::Session => Some(SessionTestHandles::default()),
        _ => None,
    };

    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            initial_report,
            session_handles: session_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        quiz,
        session_handles,
        _data_dir: data_dir,
    }
}

pub fn setup_view_harness(view: ViewKind, question_count: usize, test_size: usize) -> ViewHarness {
    let (data_dir, path) = write_bank(question_count);
    build_harness(view, QuestionSource::File(path), test_size, None, data_dir)
}

pub fn setup_view_harness_with_report(view: ViewKind, report: ReportVm) -> ViewHarness {
    let (data_dir, path) = write_bank(3);
    build_harness(
        view,
        QuestionSource::File(path),
        3,
        Some(report),
        data_dir,
    )
}

/// Harness whose bank path points at a file that does not exist, so every
/// load attempt fails.
pub fn setup_view_harness_with_missing_bank(view: ViewKind) -> ViewHarness {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing.json");
    build_harness(view, QuestionSource::File(path), 3, None, dir)
}
