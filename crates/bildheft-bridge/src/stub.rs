// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub opener for mobile targets, where handing a file to another app goes
// through a share sheet rather than a default-application launcher.

use std::path::Path;

use bildheft_core::error::{BildheftError, Result};

use crate::traits::FileOpener;

/// Opener that always reports `PlatformUnavailable`.
pub struct StubOpener;

impl FileOpener for StubOpener {
    fn platform_name(&self) -> &str {
        "Mobile (stub)"
    }

    fn open_file(&self, path: &Path) -> Result<()> {
        tracing::warn!(path = %path.display(), "FileOpener::open_file called on stub bridge");
        Err(BildheftError::PlatformUnavailable)
    }
}
