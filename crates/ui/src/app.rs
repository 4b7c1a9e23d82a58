use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;
use crate::vm::ReportVm;

#[component]
pub fn App() -> Element {
    // Shared slot for the most recent scored attempt. The session view fills
    // it on submit; the results view reads it.
    use_context_provider(|| Signal::new(None::<ReportVm>));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Screen headings live inside the pages.
        document::Title { "Quiz App" }

        // A single root container for global layout CSS hooks.
        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
