//! Administration sections. Their content is served by dedicated views;
//! these components only frame them inside the shell.

use dioxus::prelude::*;

#[component]
fn SectionPage(title: &'static str, summary: &'static str) -> Element {
    rsx! {
        section {
            h1 { "{title}" }
            p { class: "muted", "{summary}" }
        }
    }
}

#[component]
pub fn Companies() -> Element {
    rsx! { SectionPage { title: "Companies", summary: "Client companies taking part in surveys." } }
}

#[component]
pub fn Areas() -> Element {
    rsx! { SectionPage { title: "Areas", summary: "Departments and areas within each company." } }
}

#[component]
pub fn Users() -> Element {
    rsx! { SectionPage { title: "Users", summary: "Respondents assigned to companies and areas." } }
}

#[component]
pub fn Questions() -> Element {
    rsx! { SectionPage { title: "Questions", summary: "Question bank grouped by category." } }
}

#[component]
pub fn Questionnaires() -> Element {
    rsx! { SectionPage { title: "Questionnaires", summary: "Questionnaires built from the question bank." } }
}

#[component]
pub fn Reports() -> Element {
    rsx! { SectionPage { title: "Reports", summary: "Results and divergence reports." } }
}

/// Catch-all target. The guard redirects away before this renders.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! { div { hidden: true, "/{path}" } }
}
