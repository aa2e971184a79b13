// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildheft-document — Image-to-PDF processing for Bildheft.
//
// Provides page normalisation (colour conversion, rotation with canvas
// expansion), display renditions for thumbnails and preview, PDF writing and
// inspection, and the export transformer with its background worker.

pub mod export;
pub mod image;
pub mod pdf;
pub mod worker;

// Re-export the primary items so callers can use `bildheft_document::PdfWriter` etc.
pub use export::{ExportJob, ExportSummary, export};
pub use image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use worker::{ExportHandle, spawn_export};
