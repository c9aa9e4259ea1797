use dioxus::prelude::*;
use dioxus_logger::tracing::info;
use gloo_timers::future::TimeoutFuture;

use crate::components::{ChatView, INPUT_ID};
use crate::config::WidgetConfig;
use crate::interop::focus_element;

/// Issue shortcut shown on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueKind {
    pub label: &'static str,
    pub icon: &'static str,
    pub blurb: &'static str,
}

pub const ISSUE_KINDS: &[IssueKind] = &[
    IssueKind {
        label: "Pothole",
        icon: "🕳️",
        blurb: "Road damage, holes, cracked asphalt",
    },
    IssueKind {
        label: "Graffiti",
        icon: "🎨",
        blurb: "Spray paint or tags on property",
    },
    IssueKind {
        label: "Streetlight Out",
        icon: "💡",
        blurb: "Broken or flickering street lights",
    },
    IssueKind {
        label: "Sidewalk Repair",
        icon: "🚶",
        blurb: "Cracks and tripping hazards",
    },
    IssueKind {
        label: "Missed Garbage Collection",
        icon: "🗑️",
        blurb: "Uncollected trash or recycling",
    },
    IssueKind {
        label: "Noise Complaint",
        icon: "🔊",
        blurb: "Excessive noise disturbances",
    },
];

pub fn prefill_text(issue_label: &str) -> String {
    format!("I need to report a {issue_label}")
}

#[component]
pub fn Landing(config: WidgetConfig) -> Element {
    let mut chat_open = use_signal(|| false);
    let mut input_text = use_signal(String::new);
    let auto_open_delay_ms = config.auto_open_delay_ms;
    let prefill_delay_ms = config.prefill_delay_ms;

    use_hook(move || {
        spawn(async move {
            TimeoutFuture::new(auto_open_delay_ms).await;
            if !*chat_open.peek() {
                info!("Auto-opening chat");
                chat_open.set(true);
            }
        });
    });

    let mut open_with_issue = move |label: &'static str| {
        info!("Issue card selected: {}", label);
        chat_open.set(true);
        spawn(async move {
            TimeoutFuture::new(prefill_delay_ms).await;
            input_text.set(prefill_text(label));
            focus_element(INPUT_ID);
        });
    };

    rsx! {
        style { {LANDING_STYLES} }

        div {
            class: "landing",

            header {
                class: "landing-hero",
                h1 { "Report a city issue in under a minute" }
                p { "Pick an issue below or tell our assistant what you see. Photos help crews find it faster." }
            }

            div {
                class: "issue-grid",
                for kind in ISSUE_KINDS.iter().copied() {
                    IssueCard {
                        key: "{kind.label}",
                        kind,
                        on_select: move |label| open_with_issue(label),
                    }
                }
            }

            div {
                id: "chat-window",
                class: if chat_open() { "chat-window visible" } else { "chat-window hidden" },
                ChatView { config: config.clone(), input_text }
            }

            if !chat_open() {
                button {
                    id: "chat-bubble",
                    class: "chat-bubble",
                    title: "Chat with the 311 Assistant",
                    onclick: move |_| chat_open.set(true),
                    "💬"
                }
            }
        }
    }
}

#[component]
pub fn IssueCard(kind: IssueKind, on_select: EventHandler<&'static str>) -> Element {
    rsx! {
        button {
            class: "issue-card",
            onclick: move |_| on_select.call(kind.label),
            span { class: "issue-icon", "{kind.icon}" }
            span { class: "issue-label", "{kind.label}" }
            span { class: "issue-blurb", "{kind.blurb}" }
        }
    }
}

const LANDING_STYLES: &str = r#"
.landing {
    min-height: 100vh;
    padding: 2rem 1.5rem 6rem;
    background: #eef3f9;
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    color: #0f172a;
}

.landing-hero {
    max-width: 48rem;
    margin: 0 auto 2rem;
    text-align: center;
}

.landing-hero h1 {
    margin: 0 0 0.5rem;
    color: #004a99;
}

.issue-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(12rem, 1fr));
    gap: 1rem;
    max-width: 56rem;
    margin: 0 auto;
}

.issue-card {
    display: flex;
    flex-direction: column;
    align-items: flex-start;
    gap: 0.25rem;
    padding: 1rem;
    background: white;
    border: 1px solid #dbe4ef;
    border-radius: 12px;
    text-align: left;
    cursor: pointer;
    transition: transform 0.15s, box-shadow 0.15s;
}

.issue-card:hover {
    transform: translateY(-2px);
    box-shadow: 0 6px 16px rgba(0, 74, 153, 0.12);
}

.issue-icon {
    font-size: 1.75rem;
}

.issue-label {
    font-weight: 600;
}

.issue-blurb {
    font-size: 0.8rem;
    color: #64748b;
}

.chat-window {
    position: fixed;
    right: 1.5rem;
    bottom: 1.5rem;
    width: min(24rem, calc(100vw - 2rem));
    height: min(36rem, calc(100vh - 3rem));
    border-radius: 16px;
    overflow: hidden;
    box-shadow: 0 12px 40px rgba(15, 23, 42, 0.25);
}

.chat-window.hidden {
    display: none;
}

.chat-bubble {
    position: fixed;
    right: 1.5rem;
    bottom: 1.5rem;
    width: 3.5rem;
    height: 3.5rem;
    border: none;
    border-radius: 50%;
    background: #004a99;
    color: white;
    font-size: 1.5rem;
    cursor: pointer;
    box-shadow: 0 8px 24px rgba(0, 74, 153, 0.35);
}
"#;
