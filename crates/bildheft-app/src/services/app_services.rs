// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns configuration and the platform opener, and
// provides the export and rendering calls the Dioxus UI makes.
//
// Exports run on the document crate's worker thread. Progress is forwarded
// into a tokio channel so a Dioxus task can await it without blocking the UI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bildheft_bridge::traits::FileOpener;
use bildheft_core::error::Result;
use bildheft_core::types::{CollectionSnapshot, ExportProgress, ImageEntry};
use bildheft_core::AppConfig;
use bildheft_document::image::display_png;
use bildheft_document::{ExportHandle, ExportJob, spawn_export};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{info, warn};

/// Environment variable holding a JSON configuration override.
pub const CONFIG_ENV: &str = "BILDHEFT_CONFIG";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    opener: Arc<dyn FileOpener>,
}

/// A running export as seen by the UI.
pub struct RunningExport {
    /// Closes once the worker has finished, successfully or not.
    pub progress: UnboundedReceiver<ExportProgress>,
    pub handle: ExportHandle,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let config = match std::env::var(CONFIG_ENV) {
            Ok(json) => config_from_override(&json),
            Err(_) => AppConfig::default(),
        };
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let opener: Arc<dyn FileOpener> = Arc::from(bildheft_bridge::platform_opener());
        info!(platform = opener.platform_name(), "app services initialised");
        Self {
            config: Arc::new(config),
            opener,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -- Export ---------------------------------------------------------------

    /// Start exporting `snapshot` to `destination` on the worker thread.
    pub fn start_export(
        &self,
        snapshot: CollectionSnapshot,
        destination: PathBuf,
    ) -> Result<RunningExport> {
        let job = ExportJob::new(snapshot, destination).with_title(&self.config.document_title);
        let (tx, progress) = unbounded_channel();
        let handle = spawn_export(job, move |p| {
            // The receiver only goes away if the UI task was dropped.
            let _ = tx.send(p);
        })?;
        Ok(RunningExport { progress, handle })
    }

    /// Open an exported PDF with the system's default application.
    pub fn open_pdf(&self, path: &Path) -> Result<()> {
        self.opener.open_file(path)
    }

    // -- Rendering ------------------------------------------------------------

    /// Thumbnail for the strip, as a `data:` URL.
    pub fn thumbnail_url(&self, entry: &ImageEntry) -> Result<String> {
        data_url(entry, self.config.thumbnail_size)
    }

    /// Large preview, as a `data:` URL.
    pub fn preview_url(&self, entry: &ImageEntry) -> Result<String> {
        data_url(entry, self.config.preview_size)
    }
}

fn config_from_override(json: &str) -> AppConfig {
    match AppConfig::from_json(json) {
        Ok(config) => {
            info!("using configuration from {CONFIG_ENV}");
            config
        }
        Err(e) => {
            warn!(error = %e, "ignoring malformed {CONFIG_ENV}, using defaults");
            AppConfig::default()
        }
    }
}

/// Render `entry` at its current rotation, longest edge at most `max_size`.
fn data_url(entry: &ImageEntry, max_size: u32) -> Result<String> {
    let png = display_png(&entry.path, entry.rotation, max_size)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildheft_core::ImageCollection;
    use image::{DynamicImage, Rgb, RgbImage};

    fn fixture(dir: &Path, name: &str) -> String {
        let path = dir.join(name);
        DynamicImage::ImageRgb8(RgbImage::from_pixel(24, 12, Rgb([9, 9, 9])))
            .save(&path)
            .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn malformed_override_falls_back_to_defaults() {
        assert_eq!(config_from_override("{ nope"), AppConfig::default());
        let config = config_from_override(r#"{ "thumbnail_size": 64 }"#);
        assert_eq!(config.thumbnail_size, 64);
    }

    #[test]
    fn thumbnail_is_a_png_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let entry = ImageEntry::new(fixture(dir.path(), "a.png"));
        let url = AppServices::with_config(AppConfig::default())
            .thumbnail_url(&entry)
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn export_progress_arrives_on_the_channel() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = ImageCollection::new();
        collection.add([fixture(dir.path(), "a.png"), fixture(dir.path(), "b.png")]);

        let svc = AppServices::with_config(AppConfig::default());
        let destination = dir.path().join("out.pdf");
        let mut running = svc
            .start_export(collection.snapshot(), destination.clone())
            .unwrap();

        let mut last = None;
        while let Some(p) = running.progress.recv().await {
            last = Some(p);
        }
        assert_eq!(last, Some(ExportProgress { current: 2, total: 2 }));

        let summary = running.handle.join().unwrap();
        assert_eq!(summary.destination, destination);
        assert!(destination.exists());
    }
}
