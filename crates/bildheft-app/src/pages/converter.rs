// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Converter page — thumbnail strip, preview pane, toolbar and export.

use dioxus::prelude::*;

use bildheft_core::types::SupportedFormat;
use bildheft_core::{CollectionIntents, CollectionObserver};

use crate::services::app_services::AppServices;
use crate::state::AppState;

/// Quarter turn applied by the rotate buttons. Rotations are stored
/// counter-clockwise, so "rotate right" sends the negation.
const QUARTER_TURN: i32 = 90;

/// Longest file name shown under a thumbnail.
const NAME_CHARS: usize = 15;

/// Per-thumbnail data, read out of the state before rendering.
#[derive(Clone, PartialEq)]
struct ThumbView {
    index: usize,
    name: String,
    url: Option<String>,
    rotation: u16,
    selected: bool,
}

#[component]
pub fn Converter() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let (thumbs, busy, can_export, has_selection, has_previous, has_next) = {
        let s = state.read();
        let collection = s.session.collection();
        let thumbs: Vec<ThumbView> = collection
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| ThumbView {
                index,
                name: entry.short_name(NAME_CHARS),
                url: s.thumbnail(entry).map(str::to_string),
                rotation: entry.rotation.degrees(),
                selected: collection.is_selected(index),
            })
            .collect();
        (
            thumbs,
            s.session.is_exporting(),
            s.session.can_export(),
            !collection.selection().is_empty(),
            s.session.has_previous(),
            s.session.has_next(),
        )
    };
    let count = thumbs.len();
    let last_export = state.read().last_export.clone();

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100%; padding: 16px; gap: 12px; box-sizing: border-box;",
            // The whole window is a drop target for image files.
            ondragover: move |evt: DragEvent| evt.prevent_default(),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                let paths: Vec<String> = evt
                    .files()
                    .into_iter()
                    .map(|file| file.path().to_string_lossy().into_owned())
                    .collect();
                if !paths.is_empty() {
                    tracing::info!(count = paths.len(), "images dropped onto window");
                    state.write().add_paths(paths);
                }
            },

            // Thumbnail strip
            div { style: "display: flex; gap: 8px; overflow-x: auto; min-height: 170px; padding-bottom: 4px; border-bottom: 1px solid #e0e0e0;",
                if thumbs.is_empty() {
                    p { style: "color: #666; margin: auto;",
                        "No images yet. Drop some here or use \"Add Images\"."
                    }
                }
                for thumb in thumbs {
                    Thumbnail {
                        key: "{thumb.index}",
                        last: thumb.index + 1 == count,
                        disabled: busy,
                        view: thumb,
                    }
                }
            }

            // Preview
            PreviewPane { has_previous, has_next, busy }

            // Toolbar
            div { style: "display: flex; gap: 8px; flex-wrap: wrap;",
                ToolButton {
                    label: "Add Images",
                    disabled: busy,
                    onclick: move |_| {
                        let Some(files) = rfd::FileDialog::new()
                            .add_filter("Images", &SupportedFormat::EXTENSIONS)
                            .pick_files()
                        else {
                            return;
                        };
                        let paths = files
                            .into_iter()
                            .map(|p| p.to_string_lossy().into_owned())
                            .collect();
                        state.write().add_paths(paths);
                    },
                }
                ToolButton {
                    label: "Remove Selected",
                    disabled: busy || !has_selection,
                    onclick: move |_| {
                        let mut s = state.write();
                        if let Some(removed) = s.dispatch(|session| session.on_remove_selected()) {
                            tracing::info!(removed, "selected images removed");
                        }
                    },
                }
                ToolButton {
                    label: "Clear All",
                    disabled: busy || count == 0,
                    onclick: move |_| {
                        state.write().dispatch(|session| session.on_clear());
                    },
                }
                ToolButton {
                    label: "Convert to PDF",
                    primary: true,
                    disabled: !can_export,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let ready = state.read().session.can_export();
                            if !ready {
                                return;
                            }
                            let Some(destination) = rfd::FileDialog::new()
                                .add_filter("PDF", &["pdf"])
                                .set_file_name(&svc.config().default_file_name)
                                .save_file()
                            else {
                                return;
                            };

                            let begun = state.write().session.begin_export();
                            let snapshot = match begun {
                                Ok(snapshot) => snapshot,
                                Err(e) => {
                                    state.write().report_error(&e);
                                    return;
                                }
                            };
                            state.write().export_started();

                            let svc = svc.clone();
                            spawn(async move {
                                let result = match svc.start_export(snapshot, destination) {
                                    Ok(mut running) => {
                                        while let Some(progress) = running.progress.recv().await {
                                            state.write().export_progress(progress);
                                        }
                                        // Channel closed: the worker is done.
                                        running.handle.join()
                                    }
                                    Err(e) => Err(e),
                                };
                                state.write().export_finished(&result);

                                if let Ok(summary) = &result {
                                    if svc.config().open_after_export {
                                        if let Err(e) = svc.open_pdf(&summary.destination) {
                                            state.write().report_error(&e);
                                        }
                                    }
                                }
                            });
                        }
                    },
                }
                if let Some(path) = last_export {
                    ToolButton {
                        label: "Open PDF",
                        disabled: busy,
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                if let Err(e) = svc.open_pdf(&path) {
                                    state.write().report_error(&e);
                                }
                            }
                        },
                    }
                }
            }

            ProgressBar {}
            StatusBar {}
        }
    }
}

#[component]
fn Thumbnail(view: ThumbView, last: bool, disabled: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let index = view.index;
    let border = if view.selected { "2px solid #007aff" } else { "1px solid #ccc" };

    rsx! {
        div { style: "flex: 0 0 auto; width: 116px; display: flex; flex-direction: column; align-items: center; gap: 4px;",
            div {
                style: "width: 108px; height: 108px; border: {border}; border-radius: 4px; display: flex; align-items: center; justify-content: center; background: white; cursor: pointer; overflow: hidden;",
                onclick: move |_| {
                    if !disabled {
                        state.write().dispatch(|session| session.on_select(index));
                    }
                },
                if let Some(url) = view.url.clone() {
                    img { src: "{url}", style: "max-width: 100px; max-height: 100px;" }
                } else {
                    span { style: "color: #ff3b30; font-size: 12px;", "Cannot display" }
                }
            }
            span { style: "font-size: 12px; color: #333;", "{view.name}" }
            if view.rotation != 0 {
                span { style: "font-size: 11px; color: #666;", "{view.rotation}\u{00B0}" }
            }
            div { style: "display: flex; gap: 2px;",
                SmallButton {
                    label: "\u{25C0}",
                    title: "Move left",
                    disabled: disabled || index == 0,
                    onclick: move |_| {
                        state.write().dispatch(|session| session.on_move(index, index.saturating_sub(1)));
                    },
                }
                SmallButton {
                    label: "\u{21B6}",
                    title: "Rotate left",
                    disabled: disabled,
                    onclick: move |_| {
                        state.write().dispatch(|session| session.on_rotate(index, QUARTER_TURN));
                    },
                }
                SmallButton {
                    label: "\u{21B7}",
                    title: "Rotate right",
                    disabled: disabled,
                    onclick: move |_| {
                        state.write().dispatch(|session| session.on_rotate(index, -QUARTER_TURN));
                    },
                }
                SmallButton {
                    label: "\u{25B6}",
                    title: "Move right",
                    disabled: disabled || last,
                    onclick: move |_| {
                        state.write().dispatch(|session| session.on_move(index, index + 1));
                    },
                }
            }
        }
    }
}

#[component]
fn PreviewPane(has_previous: bool, has_next: bool, busy: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let (url, caption) = {
        let s = state.read();
        let caption = s.session.preview_entry().map(|entry| {
            format!(
                "{} ({} of {})",
                entry.file_name(),
                s.session.preview_index() + 1,
                s.session.collection().len()
            )
        });
        (s.preview_url().map(str::to_string), caption)
    };
    let has_entry = caption.is_some();

    rsx! {
        div { style: "flex: 1; display: flex; align-items: center; gap: 8px; min-height: 0;",
            ToolButton {
                label: "Previous",
                disabled: busy || !has_previous,
                onclick: move |_| state.write().navigate(|session| session.previous_preview()),
            }
            div { style: "flex: 1; height: 100%; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #fafafa; border-radius: 8px; overflow: hidden;",
                {match (url, has_entry) {
                    (Some(url), _) => rsx! {
                        img { src: "{url}", style: "max-width: 100%; max-height: 90%; object-fit: contain;" }
                    },
                    (None, true) => rsx! {
                        p { style: "color: #ff3b30;", "This image cannot be displayed." }
                    },
                    (None, false) => rsx! {
                        p { style: "color: #999;", "Preview" }
                    },
                }}
                if let Some(caption) = caption {
                    p { style: "margin: 4px 0 0; color: #666; font-size: 13px;", "{caption}" }
                }
            }
            ToolButton {
                label: "Next",
                disabled: busy || !has_next,
                onclick: move |_| state.write().navigate(|session| session.next_preview()),
            }
        }
    }
}

#[component]
fn ProgressBar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let Some(progress) = state.read().progress else {
        return rsx! {};
    };
    let percent = progress.percent();

    rsx! {
        div { style: "height: 8px; background: #e0e0e0; border-radius: 4px; overflow: hidden;",
            div { style: "height: 100%; width: {percent}%; background: #007aff;" }
        }
    }
}

#[component]
fn StatusBar() -> Element {
    let state = use_context::<Signal<AppState>>();
    let (text, colour) = match state.read().status.clone() {
        Some(status) => (status.text, status.tone.colour()),
        None => ("Ready".to_string(), "#999"),
    };

    rsx! {
        div { style: "padding: 6px 8px; border-top: 1px solid #e0e0e0; background: #fafafa; font-size: 14px; min-height: 20px;",
            span { style: "color: {colour};", "{text}" }
        }
    }
}

#[component]
fn ToolButton(
    label: &'static str,
    disabled: bool,
    #[props(default)] primary: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    let (background, colour) = if primary { ("#007aff", "white") } else { ("white", "#333") };
    rsx! {
        button {
            style: "padding: 8px 12px; border-radius: 8px; border: 1px solid #ccc; background: {background}; color: {colour}; font-size: 14px; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
fn SmallButton(
    label: &'static str,
    title: &'static str,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            style: "width: 26px; height: 24px; padding: 0; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 13px;",
            title: title,
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
