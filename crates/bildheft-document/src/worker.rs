// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background export worker — runs one export job on a dedicated thread so
// the UI thread stays responsive.

use std::thread::JoinHandle;

use bildheft_core::error::{BildheftError, Result};
use bildheft_core::types::ExportProgress;
use tracing::{error, info};

use crate::export::{ExportJob, ExportSummary};

const WORKER_NAME: &str = "bildheft-export";

/// Handle to a running export. There is no cancellation; the job runs to
/// completion or failure.
pub struct ExportHandle {
    thread: JoinHandle<Result<ExportSummary>>,
}

impl ExportHandle {
    /// Block until the worker finishes and return its result.
    pub fn join(self) -> Result<ExportSummary> {
        self.thread.join().unwrap_or_else(|_| {
            error!("export worker panicked");
            Err(BildheftError::WriteFailed("export worker panicked".into()))
        })
    }
}

/// Start `job` on a new worker thread.
///
/// `observer` moves onto the worker and is dropped when the job ends, so a
/// channel sender captured by it closes exactly when the export is done.
pub fn spawn_export<F>(job: ExportJob, mut observer: F) -> Result<ExportHandle>
where
    F: FnMut(ExportProgress) + Send + 'static,
{
    info!(pages = job.snapshot.len(), destination = %job.destination.display(), "Spawning export worker");

    let thread = std::thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .spawn(move || job.run(&mut observer))
        .map_err(|err| BildheftError::WriteFailed(format!("could not start export worker: {err}")))?;

    Ok(ExportHandle { thread })
}
