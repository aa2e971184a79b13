// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildheft — Platform bridge abstractions.
//
// Defines the traits the core uses to reach the operating system, plus the
// dispatch that picks the implementation for the build target.

pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

#[cfg(any(target_os = "ios", target_os = "android"))]
pub mod stub;

/// The file opener for the target operating system.
pub fn platform_opener() -> Box<dyn traits::FileOpener> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(desktop::DesktopOpener)
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Box::new(stub::StubOpener)
    }
}
