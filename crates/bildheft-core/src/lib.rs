// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildheft — Core types, the image collection model, and error definitions
// shared across all crates.

pub mod collection;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod session;
pub mod types;

pub use collection::{AddReport, ImageCollection, Rejection};
pub use config::AppConfig;
pub use error::BildheftError;
pub use session::{CollectionIntents, CollectionObserver, Session};
pub use types::*;
