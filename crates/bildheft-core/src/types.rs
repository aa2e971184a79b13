// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Bildheft.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Counter-clockwise rotation of an image, always in `[0, 360)` degrees.
/// A clockwise turn on screen is a negative delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation(u16);

impl Rotation {
    /// No rotation.
    pub const NONE: Self = Self(0);

    /// Build a rotation from any angle, normalising into `[0, 360)`.
    pub fn from_degrees(degrees: i32) -> Self {
        Self(degrees.rem_euclid(360) as u16)
    }

    /// Add `delta` degrees. Negative deltas wrap around, so `-90` applied to
    /// `0` yields `270`.
    pub fn turned_by(self, delta: i32) -> Self {
        Self::from_degrees(i32::from(self.0) + delta.rem_euclid(360))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\u{00B0}", self.0)
    }
}

/// One image in the collection. The path is a reference only; pixels are
/// loaded on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: String,
    pub rotation: Rotation,
}

impl ImageEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rotation: Rotation::NONE,
        }
    }

    /// File name component for display, falling back to the full path.
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.path)
    }

    /// File name shortened to `max_chars` with a trailing ellipsis.
    pub fn short_name(&self, max_chars: usize) -> String {
        let name = self.file_name();
        if name.chars().count() <= max_chars {
            return name.to_string();
        }
        let keep = max_chars.saturating_sub(3);
        let mut short: String = name.chars().take(keep).collect();
        short.push_str("...");
        short
    }
}

/// Image formats accepted into the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportedFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl SupportedFormat {
    /// Every extension the allow-list accepts (lowercase, without dot).
    pub const EXTENSIONS: [&'static str; 5] = ["jpg", "jpeg", "png", "bmp", "tiff"];

    /// Parse a file extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Resolve the format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Immutable copy of the collection taken when an export starts.
///
/// Cloning is cheap; the entries are shared behind an `Arc` so the export
/// worker never observes later edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSnapshot {
    entries: Arc<[ImageEntry]>,
}

impl CollectionSnapshot {
    pub fn new(entries: Vec<ImageEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Progress of a running export: `current` pages of `total` are normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// 1-based index of the page just finished.
    pub current: usize,
    pub total: usize,
}

impl ExportProgress {
    /// Percentage complete (0–100).
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.current.min(self.total) * 100) / self.total) as u8
    }
}
