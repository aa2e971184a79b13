// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildheft — collect, rotate and bind images into one PDF
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::converter::Converter;
use services::app_services::AppServices;
use state::AppState;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Bildheft starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    let mut state = use_context_provider(|| Signal::new(AppState::new(&svc)));

    // Files dropped onto the executable arrive as arguments.
    use_hook(move || {
        let paths: Vec<String> = std::env::args().skip(1).collect();
        if !paths.is_empty() {
            tracing::info!(count = paths.len(), "adding images from command line");
            state.write().add_paths(paths);
        }
    });

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",
            Converter {}
        }
    }
}
