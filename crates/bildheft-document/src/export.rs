// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export transformer — normalise every image of a collection snapshot into a
// page and bind the pages into one PDF at the destination path.
//
// The destination is only ever replaced by a complete document: bytes go to a
// temporary file in the same directory, which is renamed over the destination
// once fully written.

use std::io::Write;
use std::path::{Path, PathBuf};

use bildheft_core::error::{BildheftError, Result};
use bildheft_core::types::{CollectionSnapshot, ExportProgress};
use tracing::{debug, error, info, instrument};

use crate::image::processor::normalise_page;
use crate::pdf::writer::PdfWriter;

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub destination: PathBuf,
    pub pages: usize,
    pub bytes: usize,
}

/// Everything an export needs, owned so it can move onto a worker thread.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub snapshot: CollectionSnapshot,
    pub destination: PathBuf,
    pub title: String,
}

impl ExportJob {
    pub fn new(snapshot: CollectionSnapshot, destination: impl Into<PathBuf>) -> Self {
        Self {
            snapshot,
            destination: destination.into(),
            title: PdfWriter::default().title().to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Run the export on the calling thread, reporting progress after each
    /// page is normalised.
    #[instrument(skip_all, fields(pages = self.snapshot.len(), destination = %self.destination.display()))]
    pub fn run(&self, observer: &mut dyn FnMut(ExportProgress)) -> Result<ExportSummary> {
        if self.snapshot.is_empty() {
            return Err(BildheftError::EmptyCollection);
        }

        let total = self.snapshot.len();
        let mut pages = Vec::with_capacity(total);

        for (i, entry) in self.snapshot.entries().iter().enumerate() {
            let page = normalise_page(&entry.path, entry.rotation).inspect_err(|err| {
                error!(page = i + 1, %err, "Page normalisation failed");
            })?;
            pages.push(page);
            observer(ExportProgress {
                current: i + 1,
                total,
            });
        }

        let bytes = PdfWriter::new(&self.title).create_from_pages(pages)?;
        write_atomically(&self.destination, &bytes)?;

        info!(pages = total, bytes = bytes.len(), "PDF exported");
        Ok(ExportSummary {
            destination: self.destination.clone(),
            pages: total,
            bytes: bytes.len(),
        })
    }
}

/// Export `snapshot` to `destination` with the default document title.
pub fn export(
    snapshot: &CollectionSnapshot,
    destination: impl AsRef<Path>,
    observer: &mut dyn FnMut(ExportProgress),
) -> Result<ExportSummary> {
    ExportJob::new(snapshot.clone(), destination.as_ref()).run(observer)
}

/// Write `bytes` to a temporary sibling of `destination`, then rename it into
/// place. On any failure the temporary file is removed and the destination is
/// left as it was.
fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = tempfile::Builder::new()
        .prefix(".bildheft-")
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .map_err(|err| write_failed(destination, &err))?;

    staging
        .write_all(bytes)
        .and_then(|()| staging.as_file().sync_all())
        .map_err(|err| write_failed(destination, &err))?;

    debug!(staging = %staging.path().display(), "Staged PDF, renaming into place");

    staging
        .persist(destination)
        .map_err(|err| write_failed(destination, &err.error))?;
    Ok(())
}

fn write_failed(destination: &Path, err: &std::io::Error) -> BildheftError {
    error!(destination = %destination.display(), %err, "Writing PDF failed");
    BildheftError::WriteFailed(format!("{}: {}", destination.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use bildheft_core::ImageCollection;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    /// Three fixture images of distinct sizes and formats.
    fn fixtures(dir: &Path) -> Vec<String> {
        let first = dir.join("first.png");
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([10, 20, 30, 0])))
            .save(&first)
            .unwrap();

        let second = dir.join("second.jpg");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 60, Rgb([200, 200, 200])))
            .save(&second)
            .unwrap();

        let third = dir.join("third.bmp");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(25, 25, Rgb([0, 0, 255])))
            .save(&third)
            .unwrap();

        [first, second, third]
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    fn collection(paths: Vec<String>) -> ImageCollection {
        let mut collection = ImageCollection::new();
        let report = collection.add(paths);
        assert_eq!(report.added, 3);
        collection
    }

    fn no_progress() -> impl FnMut(ExportProgress) {
        |_| {}
    }

    #[test]
    fn quarter_turn_swaps_page_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let mut images = collection(fixtures(dir.path()));
        images.rotate(1, 90).unwrap();

        let destination = dir.path().join("out.pdf");
        let summary = export(&images.snapshot(), &destination, &mut no_progress()).unwrap();
        assert_eq!(summary.pages, 3);
        assert_eq!(summary.destination, destination);

        let reader = PdfReader::open(&destination).unwrap();
        assert_eq!(reader.page_count(), 3);

        let rounded = |n: u32| {
            let (w, h) = reader.page_size(n).unwrap();
            (w.round() as u32, h.round() as u32)
        };
        assert_eq!(rounded(1), (40, 20));
        assert_eq!(rounded(2), (60, 30));
        assert_eq!(rounded(3), (25, 25));
    }

    #[test]
    fn progress_is_reported_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let images = collection(fixtures(dir.path()));

        let mut seen = Vec::new();
        let mut observer = |p: ExportProgress| seen.push((p.current, p.total));
        export(&images.snapshot(), dir.path().join("out.pdf"), &mut observer).unwrap();

        assert_eq!(seen, [(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn empty_snapshot_produces_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("empty.pdf");

        let err = export(
            &ImageCollection::new().snapshot(),
            &destination,
            &mut no_progress(),
        )
        .unwrap_err();
        assert!(matches!(err, BildheftError::EmptyCollection));
        assert!(!destination.exists());
    }

    #[test]
    fn corrupt_image_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = fixtures(dir.path());
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not really a png").unwrap();
        paths[2] = broken.to_string_lossy().into_owned();

        let destination = dir.path().join("out.pdf");
        let err = export(&collection(paths).snapshot(), &destination, &mut no_progress())
            .unwrap_err();
        match err {
            BildheftError::UnreadableImage { path, .. } => assert!(path.ends_with("broken.png")),
            other => panic!("unexpected error variant: {other}"),
        }
        assert!(!destination.exists());
    }

    #[test]
    fn decoder_follows_contents_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let misnamed = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 48, Rgb([90, 160, 30])))
            .save_with_format(&misnamed, ImageFormat::Jpeg)
            .unwrap();

        let mut images = ImageCollection::new();
        images.add([misnamed.to_string_lossy().into_owned()]);

        let destination = dir.path().join("out.pdf");
        let summary = export(&images.snapshot(), &destination, &mut no_progress()).unwrap();
        assert_eq!(summary.pages, 1);

        let (w, h) = PdfReader::open(&destination).unwrap().page_size(1).unwrap();
        assert_eq!((w.round(), h.round()), (32.0, 48.0));
    }

    #[test]
    fn missing_directory_is_write_failed_and_snapshot_is_reusable() {
        let dir = tempfile::tempdir().unwrap();
        let images = collection(fixtures(dir.path()));
        let snapshot = images.snapshot();

        let bad = dir.path().join("no_such_dir").join("out.pdf");
        let err = export(&snapshot, &bad, &mut no_progress()).unwrap_err();
        assert!(matches!(err, BildheftError::WriteFailed(_)));
        assert!(!bad.exists());
        assert_eq!(images.len(), 3);

        let good = dir.path().join("out.pdf");
        let summary = export(&snapshot, &good, &mut no_progress()).unwrap();
        assert_eq!(summary.pages, 3);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_write_failed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let images = collection(fixtures(dir.path()));

        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users bypass directory permissions; nothing to check.
        if std::fs::write(locked.join("write-check"), b"").is_ok() {
            return;
        }

        let destination = locked.join("out.pdf");
        let err = export(&images.snapshot(), &destination, &mut no_progress()).unwrap_err();
        assert!(matches!(err, BildheftError::WriteFailed(_)));
        assert!(!destination.exists());

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        export(&images.snapshot(), &destination, &mut no_progress()).unwrap();
        assert!(destination.exists());
    }

    #[test]
    fn existing_destination_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let images = collection(fixtures(dir.path()));
        let destination = dir.path().join("out.pdf");
        std::fs::write(&destination, b"old contents").unwrap();

        export(&images.snapshot(), &destination, &mut no_progress()).unwrap();
        assert_eq!(PdfReader::open(&destination).unwrap().page_count(), 3);

        // No staging files left behind.
        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
