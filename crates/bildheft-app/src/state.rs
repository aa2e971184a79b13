// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application state — the session plus everything the UI renders from it,
// shared with the page through a Dioxus signal.

use std::collections::HashMap;
use std::path::PathBuf;

use bildheft_core::error::{BildheftError, Result};
use bildheft_core::human_errors::{Severity, humanize_error};
use bildheft_core::types::{ExportProgress, ImageEntry};
use bildheft_core::{AddReport, CollectionIntents, CollectionObserver, Session};
use bildheft_document::ExportSummary;
use tracing::{info, warn};

use crate::services::app_services::AppServices;

/// Colour of the status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    pub fn colour(self) -> &'static str {
        match self {
            Tone::Info => "#666",
            Tone::Success => "#34c759",
            Tone::Warning => "#ff9500",
            Tone::Error => "#ff3b30",
        }
    }
}

/// Status message for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Shared state accessible to the page via `use_context`.
pub struct AppState {
    /// Collection, preview cursor and export flag.
    pub session: Session,
    /// Rendered thumbnails keyed by path and rotation. `None` marks an image
    /// that could not be rendered, so it is not retried on every change.
    pub thumbnails: HashMap<ImageEntry, Option<String>>,
    /// Rendered preview of the entry under the preview cursor.
    pub preview: Option<(ImageEntry, Option<String>)>,
    /// Progress of the running export.
    pub progress: Option<ExportProgress>,
    pub status: Option<StatusMessage>,
    /// Destination of the most recent successful export.
    pub last_export: Option<PathBuf>,
    svc: AppServices,
}

impl AppState {
    pub fn new(svc: &AppServices) -> Self {
        Self {
            session: Session::new(),
            thumbnails: HashMap::new(),
            preview: None,
            progress: None,
            status: None,
            last_export: None,
            svc: svc.clone(),
        }
    }

    /// Run one intent against the session. On success the rendered views are
    /// brought up to date; on failure the error goes to the status bar.
    pub fn dispatch<T>(&mut self, intent: impl FnOnce(&mut Session) -> Result<T>) -> Option<T> {
        match intent(&mut self.session) {
            Ok(value) => {
                let entries = self.session.collection().entries().to_vec();
                self.collection_changed(&entries);
                Some(value)
            }
            Err(e) => {
                self.report_error(&e);
                None
            }
        }
    }

    /// Add files from the picker, a drop onto the window, or the command
    /// line, and summarise the outcome in the status bar.
    pub fn add_paths(&mut self, paths: Vec<String>) {
        if let Some(report) = self.dispatch(|session| session.on_add(paths)) {
            self.report_added(&report);
        }
    }

    /// Move the preview cursor. The cursor stays put while an export runs.
    pub fn navigate(&mut self, step: impl FnOnce(&mut Session)) {
        if self.session.is_exporting() {
            return;
        }
        step(&mut self.session);
        self.refresh_preview();
    }

    // -- Status bar -----------------------------------------------------------

    pub fn report_error(&mut self, err: &BildheftError) {
        warn!(error = %err, "operation failed");
        let human = humanize_error(err);
        let tone = match human.severity {
            Severity::Transient | Severity::ActionRequired => Tone::Warning,
            Severity::Permanent => Tone::Error,
        };
        self.status = Some(StatusMessage::new(human.status_line(), tone));
    }

    pub fn report_added(&mut self, report: &AddReport) {
        let mut text = match report.added {
            1 => "Added 1 image.".to_string(),
            n => format!("Added {n} images."),
        };
        if report.duplicates > 0 {
            text.push_str(&format!(" {} already in the list.", report.duplicates));
        }

        let tone = match report.rejected.as_slice() {
            [] => Tone::Info,
            [only] => {
                text.push(' ');
                text.push_str(&humanize_error(&only.error).status_line());
                Tone::Warning
            }
            many => {
                text.push_str(&format!(
                    " Skipped {} files that are not JPG, PNG, BMP or TIFF.",
                    many.len()
                ));
                Tone::Warning
            }
        };
        self.status = Some(StatusMessage::new(text, tone));
    }

    // -- Export ---------------------------------------------------------------

    pub fn export_started(&mut self) {
        self.progress = None;
        self.last_export = None;
        self.status = Some(StatusMessage::new("Preparing PDF...", Tone::Info));
    }

    /// Record the outcome of an export and release the session.
    pub fn export_finished(&mut self, result: &Result<ExportSummary>) {
        self.session.finish_export();
        self.progress = None;
        match result {
            Ok(summary) => {
                info!(pages = summary.pages, destination = %summary.destination.display(), "export finished");
                let name = summary
                    .destination
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| summary.destination.display().to_string());
                self.status = Some(StatusMessage::new(
                    format!("Saved {name} ({} pages).", summary.pages),
                    Tone::Success,
                ));
                self.last_export = Some(summary.destination.clone());
            }
            Err(e) => self.report_error(e),
        }
    }

    // -- Rendering ------------------------------------------------------------

    pub fn thumbnail(&self, entry: &ImageEntry) -> Option<&str> {
        self.thumbnails.get(entry).and_then(|url| url.as_deref())
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().and_then(|(_, url)| url.as_deref())
    }

    fn refresh_preview(&mut self) {
        let Some(entry) = self.session.preview_entry().cloned() else {
            self.preview = None;
            return;
        };
        if matches!(&self.preview, Some((shown, _)) if *shown == entry) {
            return;
        }
        let url = self
            .svc
            .preview_url(&entry)
            .inspect_err(|e| warn!(path = %entry.path, error = %e, "preview failed"))
            .ok();
        self.preview = Some((entry, url));
    }
}

impl CollectionObserver for AppState {
    fn collection_changed(&mut self, entries: &[ImageEntry]) {
        self.thumbnails.retain(|entry, _| entries.contains(entry));
        for entry in entries {
            if !self.thumbnails.contains_key(entry) {
                let url = self
                    .svc
                    .thumbnail_url(entry)
                    .inspect_err(|e| warn!(path = %entry.path, error = %e, "thumbnail failed"))
                    .ok();
                self.thumbnails.insert(entry.clone(), url);
            }
        }
        self.refresh_preview();
    }

    fn export_progress(&mut self, progress: ExportProgress) {
        self.progress = Some(progress);
        self.status = Some(StatusMessage::new(
            format!("Processing image {} of {}", progress.current, progress.total),
            Tone::Info,
        ));
    }
}
