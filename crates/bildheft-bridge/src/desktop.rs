// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop opener — `open` on macOS, the shell on Windows, `xdg-open` and
// friends on Linux/BSD, all via the `open` crate.

use std::path::Path;

use bildheft_core::error::{BildheftError, Result};
use tracing::{info, warn};

use crate::traits::FileOpener;

/// Opener backed by the OS default-application launcher.
pub struct DesktopOpener;

impl FileOpener for DesktopOpener {
    fn platform_name(&self) -> &str {
        if cfg!(target_os = "macos") {
            "macOS (open)"
        } else if cfg!(target_os = "windows") {
            "Windows (shell)"
        } else {
            "Desktop (xdg-open)"
        }
    }

    fn open_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            warn!(path = %path.display(), "refusing to open missing file");
            return Err(BildheftError::OpenFailed(format!(
                "{} does not exist",
                path.display()
            )));
        }

        open::that_detached(path).map_err(|err| {
            warn!(path = %path.display(), %err, "default application launch failed");
            BildheftError::OpenFailed(format!("{}: {}", path.display(), err))
        })?;

        info!(path = %path.display(), "Opened with default application");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_not_launched() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesktopOpener
            .open_file(&dir.path().join("gone.pdf"))
            .unwrap_err();
        assert!(matches!(err, BildheftError::OpenFailed(_)));
    }

    #[test]
    fn platform_name_is_not_empty() {
        assert!(!crate::platform_opener().platform_name().is_empty());
    }
}
