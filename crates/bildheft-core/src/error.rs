// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildheft.

use thiserror::Error;

/// Top-level error type for all Bildheft operations.
#[derive(Debug, Error)]
pub enum BildheftError {
    // -- Collection errors --
    #[error("{path}: {reason}")]
    Validation { path: String, reason: String },

    #[error("index {index} out of range (collection has {len} images)")]
    IndexOutOfRange { index: usize, len: usize },

    // -- Export errors --
    #[error("no images to export")]
    EmptyCollection,

    #[error("cannot read image {path}: {reason}")]
    UnreadableImage { path: String, reason: String },

    #[error("failed to write PDF: {0}")]
    WriteFailed(String),

    #[error("an export is already running")]
    ExportInProgress,

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Platform --
    #[error("failed to open file: {0}")]
    OpenFailed(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Plumbing --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildheftError>;
