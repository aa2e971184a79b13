// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — page normalisation, rotation, thumbnail and preview scaling.

pub mod processor;

pub use processor::{ImageProcessor, display_png, normalise_page, rotated_bounds};
