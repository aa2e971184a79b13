// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image collection — the ordered list of source images, their rotations, and
// the transient selection used for batch removal.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::error::{BildheftError, Result};
use crate::types::{CollectionSnapshot, ImageEntry, SupportedFormat};

/// A path refused by [`ImageCollection::add`], with the validation error.
#[derive(Debug)]
pub struct Rejection {
    pub path: String,
    pub error: BildheftError,
}

/// Outcome of a single [`ImageCollection::add`] call.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Paths appended to the collection.
    pub added: usize,
    /// Paths skipped because they were already present.
    pub duplicates: usize,
    /// Paths refused by the extension allow-list.
    pub rejected: Vec<Rejection>,
}

/// Ordered, path-unique collection of images.
///
/// Each entry carries its own rotation, so paths and rotations can never
/// drift out of step. The selection holds indices into the current order and
/// is cleared on every structural change.
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    entries: Vec<ImageEntry>,
    selection: BTreeSet<usize>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Accessors ------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Currently selected indices, ascending.
    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Immutable copy for the export worker.
    pub fn snapshot(&self) -> CollectionSnapshot {
        CollectionSnapshot::new(self.entries.clone())
    }

    // -- Mutation -------------------------------------------------------------

    /// Append every new, valid path with no rotation.
    ///
    /// Paths failing the extension allow-list are reported in
    /// [`AddReport::rejected`] without aborting the batch. Duplicates are
    /// compared by exact string equality, within the batch as well.
    pub fn add<I, S>(&mut self, paths: I) -> AddReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = AddReport::default();

        for path in paths {
            let path = path.into();

            if SupportedFormat::from_path(&path).is_none() {
                warn!(path = %path, "rejecting file with unsupported extension");
                let error = BildheftError::Validation {
                    path: path.clone(),
                    reason: format!(
                        "unsupported file type (expected one of: {})",
                        SupportedFormat::EXTENSIONS.join(", ")
                    ),
                };
                report.rejected.push(Rejection { path, error });
                continue;
            }

            if self.contains(&path) {
                debug!(path = %path, "skipping duplicate");
                report.duplicates += 1;
                continue;
            }

            self.entries.push(ImageEntry::new(path));
            report.added += 1;
        }

        if report.added > 0 {
            self.selection.clear();
        }

        info!(
            added = report.added,
            duplicates = report.duplicates,
            rejected = report.rejected.len(),
            total = self.entries.len(),
            "Images added"
        );
        report
    }

    /// Remove the entries at `indices`, interpreted against the order before
    /// this call. Out-of-range indices are ignored. Returns how many entries
    /// were removed.
    pub fn remove(&mut self, indices: &BTreeSet<usize>) -> usize {
        if indices.is_empty() {
            return 0;
        }

        let mut removed = 0;
        // Descending, so earlier removals never shift later targets.
        for &index in indices.iter().rev() {
            if index < self.entries.len() {
                self.entries.remove(index);
                removed += 1;
            }
        }

        self.selection.clear();
        info!(removed, remaining = self.entries.len(), "Images removed");
        removed
    }

    /// Remove every selected entry.
    pub fn remove_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selection);
        self.remove(&selected)
    }

    /// Turn the entry at `index` by `delta` degrees (counter-clockwise positive).
    pub fn rotate(&mut self, index: usize, delta: i32) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(BildheftError::IndexOutOfRange { index, len })?;

        entry.rotation = entry.rotation.turned_by(delta);
        debug!(index, delta, rotation = entry.rotation.degrees(), "Image rotated");
        Ok(())
    }

    /// Move the entry at `from` so it ends up at position `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(BildheftError::IndexOutOfRange { index, len });
            }
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.selection.clear();
        debug!(from, to, "Image moved");
        Ok(())
    }

    /// Flip selection of the entry at `index`. Returns whether it is now
    /// selected.
    pub fn toggle_selection(&mut self, index: usize) -> Result<bool> {
        let len = self.entries.len();
        if index >= len {
            return Err(BildheftError::IndexOutOfRange { index, len });
        }
        if self.selection.remove(&index) {
            Ok(false)
        } else {
            self.selection.insert(index);
            Ok(true)
        }
    }

    /// Empty the collection and the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selection.clear();
        info!("Collection cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(collection: &ImageCollection) -> Vec<&str> {
        collection.entries().iter().map(|e| e.path.as_str()).collect()
    }

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn duplicates_never_grow_the_collection() {
        let mut c = ImageCollection::new();
        let first = c.add(["a.jpg", "b.png", "a.jpg"]);
        assert_eq!(first.added, 2);
        assert_eq!(first.duplicates, 1);

        let second = c.add(["b.png", "c.bmp", "a.jpg"]);
        assert_eq!(second.added, 1);
        assert_eq!(second.duplicates, 2);
        assert_eq!(paths(&c), ["a.jpg", "b.png", "c.bmp"]);
    }

    #[test]
    fn invalid_extension_is_rejected_per_path() {
        let mut c = ImageCollection::new();
        let report = c.add(["notes.txt", "photo.jpeg", "scan.TIFF", "archive.zip"]);
        assert_eq!(report.added, 2);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].path, "notes.txt");
        assert!(matches!(
            report.rejected[1].error,
            BildheftError::Validation { .. }
        ));
        assert_eq!(paths(&c), ["photo.jpeg", "scan.TIFF"]);
    }

    #[test]
    fn new_entries_start_unrotated() {
        let mut c = ImageCollection::new();
        c.add(["a.png"]);
        assert!(c.get(0).unwrap().rotation.is_none());
    }

    #[test]
    fn rotate_negative_then_full_turn() {
        let mut c = ImageCollection::new();
        c.add(["a.png"]);
        c.rotate(0, -90).unwrap();
        assert_eq!(c.get(0).unwrap().rotation.degrees(), 270);

        for _ in 0..4 {
            c.rotate(0, 90).unwrap();
        }
        assert_eq!(c.get(0).unwrap().rotation.degrees(), 270);
    }

    #[test]
    fn rotate_out_of_range_fails() {
        let mut c = ImageCollection::new();
        c.add(["a.png"]);
        let err = c.rotate(3, 90).unwrap_err();
        assert!(matches!(
            err,
            BildheftError::IndexOutOfRange { index: 3, len: 1 }
        ));
    }

    #[test]
    fn remove_uses_pre_removal_indices() {
        let mut c = ImageCollection::new();
        c.add(["0.png", "1.png", "2.png", "3.png", "4.png"]);
        c.rotate(3, 90).unwrap();

        let removed = c.remove(&set(&[1, 2, 4]));
        assert_eq!(removed, 3);
        assert_eq!(paths(&c), ["0.png", "3.png"]);
        // Rotation travels with its image.
        assert_eq!(c.get(1).unwrap().rotation.degrees(), 90);
    }

    #[test]
    fn repeated_remove_hits_a_different_entry_or_nothing() {
        let mut c = ImageCollection::new();
        c.add(["0.png", "1.png", "2.png"]);

        c.remove(&set(&[1]));
        assert_eq!(paths(&c), ["0.png", "2.png"]);
        c.remove(&set(&[1]));
        assert_eq!(paths(&c), ["0.png"]);
        assert_eq!(c.remove(&set(&[1])), 0);
        assert_eq!(paths(&c), ["0.png"]);
    }

    #[test]
    fn remove_empty_set_is_noop() {
        let mut c = ImageCollection::new();
        c.add(["0.png"]);
        c.toggle_selection(0).unwrap();
        assert_eq!(c.remove(&BTreeSet::new()), 0);
        assert_eq!(c.len(), 1);
        assert!(c.is_selected(0));
    }

    #[test]
    fn remove_selected_clears_selection() {
        let mut c = ImageCollection::new();
        c.add(["0.png", "1.png", "2.png"]);
        assert!(c.toggle_selection(0).unwrap());
        assert!(c.toggle_selection(2).unwrap());
        assert!(!c.toggle_selection(2).unwrap());
        assert!(c.toggle_selection(2).unwrap());

        assert_eq!(c.remove_selected(), 2);
        assert_eq!(paths(&c), ["1.png"]);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn add_clears_selection() {
        let mut c = ImageCollection::new();
        c.add(["0.png"]);
        c.toggle_selection(0).unwrap();
        c.add(["1.png"]);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn move_entry_reorders() {
        let mut c = ImageCollection::new();
        c.add(["a.png", "b.png", "c.png"]);
        c.move_entry(0, 2).unwrap();
        assert_eq!(paths(&c), ["b.png", "c.png", "a.png"]);
        c.move_entry(2, 0).unwrap();
        assert_eq!(paths(&c), ["a.png", "b.png", "c.png"]);
        assert!(c.move_entry(0, 3).is_err());
    }

    #[test]
    fn clear_after_anything_is_empty() {
        let mut c = ImageCollection::new();
        c.add(["a.png", "b.png", "c.png"]);
        c.rotate(1, 90).unwrap();
        c.remove(&set(&[0]));
        c.toggle_selection(0).unwrap();

        c.clear();
        assert_eq!(c.len(), 0);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let mut c = ImageCollection::new();
        c.add(["a.png", "b.png"]);
        let snapshot = c.snapshot();

        c.rotate(0, 90).unwrap();
        c.clear();

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.entries()[0].rotation.is_none());
    }
}
