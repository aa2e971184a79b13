// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session state — the explicitly owned application state that the
// presentation layer drives through `CollectionIntents`.

use tracing::{info, warn};

use crate::collection::{AddReport, ImageCollection};
use crate::error::{BildheftError, Result};
use crate::types::{CollectionSnapshot, ExportProgress, ImageEntry};

/// User intents accepted by the core. These are the only mutation entry
/// points the presentation layer may call.
pub trait CollectionIntents {
    fn on_add(&mut self, paths: Vec<String>) -> Result<AddReport>;
    fn on_select(&mut self, index: usize) -> Result<bool>;
    fn on_rotate(&mut self, index: usize, delta: i32) -> Result<()>;
    fn on_remove_selected(&mut self) -> Result<usize>;
    fn on_move(&mut self, from: usize, to: usize) -> Result<()>;
    fn on_clear(&mut self) -> Result<()>;
}

/// State changes pushed to the presentation layer.
pub trait CollectionObserver {
    /// The ordered entries changed (structure or rotation).
    fn collection_changed(&mut self, entries: &[ImageEntry]);

    /// An export page finished normalising.
    fn export_progress(&mut self, _progress: ExportProgress) {}
}

/// Single owner of the image collection, the preview cursor, and the
/// export-in-flight flag.
#[derive(Debug, Default)]
pub struct Session {
    collection: ImageCollection,
    preview_index: usize,
    export_in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn is_exporting(&self) -> bool {
        self.export_in_flight
    }

    /// Whether the export control should be enabled.
    pub fn can_export(&self) -> bool {
        !self.export_in_flight && !self.collection.is_empty()
    }

    // -- Preview cursor -------------------------------------------------------

    pub fn preview_index(&self) -> usize {
        self.preview_index
    }

    /// The entry shown in the preview pane, if any.
    pub fn preview_entry(&self) -> Option<&ImageEntry> {
        self.collection.get(self.preview_index)
    }

    pub fn has_previous(&self) -> bool {
        self.preview_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.preview_index + 1 < self.collection.len()
    }

    pub fn previous_preview(&mut self) {
        if self.has_previous() {
            self.preview_index -= 1;
        }
    }

    pub fn next_preview(&mut self) {
        if self.has_next() {
            self.preview_index += 1;
        }
    }

    // -- Export lifecycle -----------------------------------------------------

    /// Mark an export as started and hand out the snapshot it should read.
    pub fn begin_export(&mut self) -> Result<CollectionSnapshot> {
        if self.export_in_flight {
            return Err(BildheftError::ExportInProgress);
        }
        if self.collection.is_empty() {
            return Err(BildheftError::EmptyCollection);
        }
        self.export_in_flight = true;
        let snapshot = self.collection.snapshot();
        info!(pages = snapshot.len(), "Export started");
        Ok(snapshot)
    }

    /// Mark the running export as finished, whatever its outcome.
    pub fn finish_export(&mut self) {
        if !self.export_in_flight {
            warn!("finish_export called with no export running");
        }
        self.export_in_flight = false;
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.export_in_flight {
            Err(BildheftError::ExportInProgress)
        } else {
            Ok(())
        }
    }
}

impl CollectionIntents for Session {
    fn on_add(&mut self, paths: Vec<String>) -> Result<AddReport> {
        self.ensure_idle()?;
        let report = self.collection.add(paths);
        if report.added > 0 {
            self.preview_index = 0;
        }
        Ok(report)
    }

    /// Toggle selection and move the preview to the clicked image.
    fn on_select(&mut self, index: usize) -> Result<bool> {
        self.ensure_idle()?;
        let selected = self.collection.toggle_selection(index)?;
        self.preview_index = index;
        Ok(selected)
    }

    fn on_rotate(&mut self, index: usize, delta: i32) -> Result<()> {
        self.ensure_idle()?;
        self.collection.rotate(index, delta)
    }

    fn on_remove_selected(&mut self) -> Result<usize> {
        self.ensure_idle()?;
        let removed = self.collection.remove_selected();
        self.preview_index = 0;
        Ok(removed)
    }

    fn on_move(&mut self, from: usize, to: usize) -> Result<()> {
        self.ensure_idle()?;
        self.collection.move_entry(from, to)?;
        self.preview_index = to;
        Ok(())
    }

    fn on_clear(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.collection.clear();
        self.preview_index = 0;
        Ok(())
    }
}
