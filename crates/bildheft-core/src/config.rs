// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration. Held in memory only; an override can be supplied
// as a JSON string but nothing is written back.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ask the OS to open the PDF once an export succeeds.
    pub open_after_export: bool,
    /// Longest edge of the thumbnail strip images, in pixels.
    pub thumbnail_size: u32,
    /// Longest edge of the preview image, in pixels.
    pub preview_size: u32,
    /// Title written into the PDF /Info dictionary.
    pub document_title: String,
    /// File name suggested by the save dialog.
    pub default_file_name: String,
}

impl AppConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            open_after_export: true,
            thumbnail_size: 100,
            preview_size: 800,
            document_title: "Bildheft Export".to_string(),
            default_file_name: "images.pdf".to_string(),
        }
    }
}
