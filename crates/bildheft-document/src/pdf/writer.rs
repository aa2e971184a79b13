// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — bind raster pages into one document using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use bildheft_core::error::BildheftError;
use image::RgbImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Resolution at which one image pixel maps to one PDF point.
pub const PAGE_DPI: f32 = 72.0;

/// Millimetres per PDF point (1 pt = 1/72 in).
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Creates PDF documents where every page is exactly one image.
///
/// Pages take the pixel dimensions of their image at [`PAGE_DPI`], so a
/// 600x800 image becomes a 600x800 pt page with no margins or scaling.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Bind `pages` into a single PDF, in order, one page per image.
    #[instrument(skip(self, pages), fields(pages = pages.len()))]
    pub fn create_from_pages(&self, pages: Vec<RgbImage>) -> Result<Vec<u8>, BildheftError> {
        if pages.is_empty() {
            return Err(BildheftError::EmptyCollection);
        }

        info!(title = %self.title, "Creating image PDF");

        let mut doc = PdfDocument::new(&self.title);
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len());

        for page in pages {
            let (width, height) = page.dimensions();
            let raw = RawImage {
                pixels: RawImageData::U8(page.into_raw()),
                width: width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            // Image drawn from the origin at native size fills the page.
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(PAGE_DPI),
                    rotate: None,
                },
            }];

            let (page_w, page_h) = page_size_mm(width, height);
            pdf_pages.push(PdfPage::new(page_w, page_h, ops));
            debug!(width, height, "Page added");
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialiser reported warnings");
        }

        debug!(bytes = output.len(), "PDF serialised");
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new("Bildheft Export")
    }
}

/// Page size in printpdf's Mm units for an image of `width` x `height` pixels.
fn page_size_mm(width: u32, height: u32) -> (Mm, Mm) {
    let px_to_pt = 72.0 / PAGE_DPI;
    (
        Mm(width as f32 * px_to_pt * MM_PER_PT),
        Mm(height as f32 * px_to_pt * MM_PER_PT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use image::Rgb;

    #[test]
    fn no_pages_is_an_error() {
        let err = PdfWriter::default().create_from_pages(Vec::new()).unwrap_err();
        assert!(matches!(err, BildheftError::EmptyCollection));
    }

    #[test]
    fn one_page_per_image_sized_in_points() {
        let pages = vec![
            RgbImage::from_pixel(120, 80, Rgb([255, 0, 0])),
            RgbImage::from_pixel(30, 200, Rgb([0, 255, 0])),
        ];
        let bytes = PdfWriter::new("Two pages").create_from_pages(pages).unwrap();

        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 2);

        let (w, h) = reader.page_size(1).unwrap();
        assert_eq!((w.round(), h.round()), (120.0, 80.0));
        let (w, h) = reader.page_size(2).unwrap();
        assert_eq!((w.round(), h.round()), (30.0, 200.0));
    }

    #[test]
    fn page_size_conversion() {
        let (w, h) = page_size_mm(72, 144);
        assert!((w.0 - 25.4).abs() < 1e-3);
        assert!((h.0 - 50.8).abs() < 1e-3);
    }
}
