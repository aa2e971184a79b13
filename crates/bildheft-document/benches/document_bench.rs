// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bildheft-document crate: page rotation and
// binding pages into a PDF.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use bildheft_core::Rotation;
use bildheft_document::{ImageProcessor, PdfWriter};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A 640x480 RGBA image, roughly the size of a phone screenshot thumbnail.
fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 480, Rgba([180, 120, 60, 255])))
}

/// Quarter turns take the lossless path; 30 degrees takes the resampling
/// path onto an expanded canvas.
fn bench_page_normalisation(c: &mut Criterion) {
    let image = sample_image();

    for degrees in [90, 30] {
        c.bench_function(&format!("normalise + rotate {degrees} (640x480)"), |b| {
            b.iter(|| {
                let page = ImageProcessor::from_dynamic(black_box(image.clone()))
                    .normalise_colour()
                    .rotate(Rotation::from_degrees(degrees))
                    .into_rgb8();
                black_box(page);
            });
        });
    }
}

/// Bind ten pages into one document.
fn bench_pdf_binding(c: &mut Criterion) {
    let page = sample_image().to_rgb8();
    let writer = PdfWriter::default();

    c.bench_function("bind 10 pages (640x480)", |b| {
        b.iter(|| {
            let pages = vec![page.clone(); 10];
            black_box(writer.create_from_pages(pages).unwrap());
        });
    });
}

criterion_group!(benches, bench_page_normalisation, bench_pdf_binding);
criterion_main!(benches);
