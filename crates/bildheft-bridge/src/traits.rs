// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::path::Path;

use bildheft_core::error::Result;

/// Hand a file to the platform's default application.
///
/// Fire-and-forget: success means the request was handed to the OS, not that
/// an application actually displayed the file.
pub trait FileOpener: Send + Sync {
    /// Human-readable platform name (e.g. "Linux (xdg-open)").
    fn platform_name(&self) -> &str;

    /// Ask the OS to open `path` with its default application.
    fn open_file(&self, path: &Path) -> Result<()>;
}
