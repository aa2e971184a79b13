// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect exported PDF documents using the `lopdf`
// crate.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use bildheft_core::error::BildheftError;
use tracing::{debug, info, instrument};

/// Guard against malformed page trees whose /Parent chain loops.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Reads existing PDF files for inspection.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BildheftError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BildheftError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BildheftError> {
        let document = Document::load_mem(data).map_err(|err| {
            BildheftError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Width and height in points of page `page_number` (1-indexed), taken
    /// from its /MediaBox, inherited from ancestor page-tree nodes if absent.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32), BildheftError> {
        let pages = self.document.get_pages();
        let page_id: ObjectId = *pages.get(&page_number).ok_or_else(|| {
            BildheftError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let media_box = self.inherited_media_box(page_id).ok_or_else(|| {
            BildheftError::PdfError(format!("page {} has no /MediaBox", page_number))
        })?;

        let [x0, y0, x1, y1] = media_box;
        Ok(((x1 - x0).abs(), (y1 - y0).abs()))
    }

    // -- Helpers --------------------------------------------------------------

    fn inherited_media_box(&self, page_id: ObjectId) -> Option<[f32; 4]> {
        let mut current = self.document.get_dictionary(page_id).ok()?;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Some(media_box) = media_box_of(&self.document, current) {
                return Some(media_box);
            }
            let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
            current = self.document.get_dictionary(parent_id).ok()?;
        }
        None
    }
}

/// Parse a dictionary's /MediaBox, following a reference if needed.
fn media_box_of(document: &Document, dict: &Dictionary) -> Option<[f32; 4]> {
    let object = match dict.get(b"MediaBox").ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    let values = object.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let mut out = [0.0f32; 4];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = match value {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => return None,
        };
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Build a minimal one-page document whose MediaBox lives on /Pages.
    fn inherited_box_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 300.into(), 400.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn media_box_is_inherited_from_page_tree() {
        let reader = PdfReader::from_bytes(&inherited_box_pdf()).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert_eq!(reader.page_size(1).unwrap(), (300.0, 400.0));
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn page_out_of_range_is_an_error() {
        let reader = PdfReader::from_bytes(&inherited_box_pdf()).unwrap();
        assert!(matches!(
            reader.page_size(2),
            Err(BildheftError::PdfError(_))
        ));
    }

    #[test]
    fn garbage_is_not_a_pdf() {
        assert!(PdfReader::from_bytes(b"definitely not a pdf").is_err());
    }
}
