// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the status bar and error dialogs.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::BildheftError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something outside the app got in the way; trying again may work.
    Transient,
    /// User must do something (pick other files, choose another folder).
    ActionRequired,
    /// Retrying will not help: the file is damaged or the platform unsupported.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in the UI).
    pub severity: Severity,
}

impl HumanError {
    /// One-line rendering for the status bar.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.message, self.suggestion)
    }
}

/// Convert a `BildheftError` into a `HumanError`.
pub fn humanize_error(err: &BildheftError) -> HumanError {
    match err {
        BildheftError::Validation { path, .. } => HumanError {
            message: format!("Skipped {}.", file_name(path)),
            suggestion: "Only image files (JPG, PNG, BMP, TIFF) are supported.".into(),
            severity: Severity::ActionRequired,
        },

        BildheftError::IndexOutOfRange { .. } => HumanError {
            message: "That image is no longer in the list.".into(),
            suggestion: "The list changed in the meantime. Please try again.".into(),
            severity: Severity::Transient,
        },

        BildheftError::EmptyCollection => HumanError {
            message: "There are no images to convert.".into(),
            suggestion: "Please add some images first.".into(),
            severity: Severity::ActionRequired,
        },

        BildheftError::UnreadableImage { path, .. } => HumanError {
            message: format!("{} could not be read.", file_name(path)),
            suggestion: "The file may have been moved, or it is damaged. Remove it from the list and try again.".into(),
            severity: Severity::Permanent,
        },

        BildheftError::WriteFailed(detail) => HumanError {
            message: "The PDF could not be saved.".into(),
            suggestion: format!("Choose a folder you can write to, and check there is enough free space. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BildheftError::ExportInProgress => HumanError {
            message: "A PDF is still being created.".into(),
            suggestion: "Please wait for it to finish.".into(),
            severity: Severity::Transient,
        },

        BildheftError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            severity: Severity::Permanent,
        },

        BildheftError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try exporting again.".into(),
            severity: Severity::Permanent,
        },

        BildheftError::OpenFailed(_) => HumanError {
            message: "The PDF was saved but could not be opened.".into(),
            suggestion: "Open it yourself from the folder you saved it in.".into(),
            severity: Severity::Transient,
        },

        BildheftError::PlatformUnavailable => HumanError {
            message: "This isn't available on this device.".into(),
            suggestion: "The PDF was still saved.".into(),
            severity: Severity::Permanent,
        },

        BildheftError::Io(e) => HumanError {
            message: "A file could not be accessed.".into(),
            suggestion: format!("Check the file still exists and you have permission to use it. ({e})"),
            severity: Severity::ActionRequired,
        },

        BildheftError::Serialization(_) => HumanError {
            message: "The settings could not be read.".into(),
            suggestion: "Default settings are being used instead.".into(),
            severity: Severity::Transient,
        },
    }
}

fn file_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_the_file() {
        let err = BildheftError::Validation {
            path: "/home/me/notes.txt".into(),
            reason: "unsupported".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.message, "Skipped notes.txt.");
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn unreadable_image_is_permanent() {
        let err = BildheftError::UnreadableImage {
            path: "broken.png".into(),
            reason: "bad header".into(),
        };
        assert_eq!(humanize_error(&err).severity, Severity::Permanent);
    }

    #[test]
    fn write_failure_keeps_the_detail() {
        let err = BildheftError::WriteFailed("permission denied".into());
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("permission denied"));
        assert!(human.status_line().starts_with("The PDF could not be saved."));
    }
}
