// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — page normalisation (RGB conversion, rotation with canvas
// expansion) plus thumbnail and preview scaling. Operates on in-memory images
// using the `image` and `imageproc` crates.

use bildheft_core::error::BildheftError;
use bildheft_core::types::Rotation;
use image::{DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use imageproc::geometric_transformations::{self, Interpolation, Projection};
use tracing::{debug, info, instrument};

/// Fill colour for canvas area uncovered by a non-right-angle rotation.
const ROTATION_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`,
/// enabling method chaining.
///
/// ```ignore
/// let page = ImageProcessor::open("photo.png")?
///     .normalise_colour()
///     .rotate(Rotation::from_degrees(90))
///     .into_rgb8();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The decoder is chosen from the file's contents, so a JPEG saved with a
    /// `.png` name still opens. Missing, unsupported, and corrupt files all
    /// surface as `UnreadableImage`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, BildheftError> {
        let path = path.as_ref();
        let unreadable = |reason: String| BildheftError::UnreadableImage {
            path: path.display().to_string(),
            reason,
        };

        let img = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|err| unreadable(err.to_string()))?
            .decode()
            .map_err(|err| unreadable(err.to_string()))?;
        debug!(width = img.width(), height = img.height(), color = ?img.color(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the image as 8-bit RGB.
    pub fn into_rgb8(self) -> RgbImage {
        match self.image {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.to_rgb8(),
        }
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Convert to three-channel 8-bit RGB. Alpha is discarded, not
    /// composited; palette, grey, and 16-bit images are widened or narrowed.
    pub fn normalise_colour(self) -> Self {
        if matches!(self.image, DynamicImage::ImageRgb8(_)) {
            return self;
        }
        debug!(color = ?self.image.color(), "Normalising colour to RGB8");
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    /// Rotate counter-clockwise, growing the canvas to fit the rotated
    /// content.
    ///
    /// Quarter turns are lossless and swap width and height. Other angles are
    /// resampled bilinearly onto an expanded canvas filled with black.
    #[instrument(skip(self), fields(degrees = rotation.degrees()))]
    pub fn rotate(self, rotation: Rotation) -> Self {
        let image = match rotation.degrees() {
            0 => return self,
            // The `image` crate's quarter turns are clockwise.
            90 => self.image.rotate270(),
            180 => self.image.rotate180(),
            270 => self.image.rotate90(),
            degrees => {
                let rgb = self.into_rgb8();
                DynamicImage::ImageRgb8(rotate_expanded(&rgb, f32::from(degrees)))
            }
        };
        debug!(width = image.width(), height = image.height(), "Rotation applied");
        Self { image }
    }

    /// Shrink to fit a `max_size` square, preserving aspect ratio. Images that
    /// already fit are left untouched.
    pub fn thumbnail(self, max_size: u32) -> Self {
        self.fit_within(max_size, max_size)
    }

    /// Shrink to fit within `max_width` x `max_height` using Lanczos3
    /// filtering. Never upscales.
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        if self.image.width() <= max_width && self.image.height() <= max_height {
            return self;
        }
        let resized =
            self.image
                .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, BildheftError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| BildheftError::ImageError(format!("PNG encoding failed: {err}")))?;
        Ok(buffer)
    }
}

/// Load one collection entry and turn it into a finished PDF page image.
#[instrument(skip_all, fields(path = %path, degrees = rotation.degrees()))]
pub fn normalise_page(path: &str, rotation: Rotation) -> Result<RgbImage, BildheftError> {
    let page = ImageProcessor::open(path)?
        .normalise_colour()
        .rotate(rotation)
        .into_rgb8();
    info!(width = page.width(), height = page.height(), "Page normalised");
    Ok(page)
}

/// Load a display-sized rendition of an entry for thumbnails and preview.
pub fn display_png(path: &str, rotation: Rotation, max_size: u32) -> Result<Vec<u8>, BildheftError> {
    ImageProcessor::open(path)?
        .thumbnail(max_size)
        .normalise_colour()
        .rotate(rotation)
        .to_png_bytes()
}

/// Canvas size needed to hold a `width` x `height` image rotated by
/// `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let normalised = degrees.rem_euclid(360.0);
    if normalised == 0.0 || normalised == 180.0 {
        return (width, height);
    }
    if normalised == 90.0 || normalised == 270.0 {
        return (height, width);
    }

    let radians = normalised.to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (w, h) = (width as f32, height as f32);
    let new_w = (w * cos + h * sin).round().max(1.0) as u32;
    let new_h = (w * sin + h * cos).round().max(1.0) as u32;
    (new_w, new_h)
}

/// Rotate counter-clockwise about the centre onto a canvas expanded to the
/// rotated bounds.
fn rotate_expanded(image: &RgbImage, degrees: f32) -> RgbImage {
    let (out_w, out_h) = rotated_bounds(image.width(), image.height(), degrees);
    let mut out = RgbImage::from_pixel(out_w, out_h, ROTATION_FILL);

    // Move the source centre to the origin, rotate, then move it to the
    // centre of the larger canvas. With y pointing down a positive angle
    // turns clockwise, hence the negation.
    let projection = Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0)
        * Projection::rotate(-degrees.to_radians())
        * Projection::translate(-(image.width() as f32) / 2.0, -(image.height() as f32) / 2.0);

    geometric_transformations::warp_into(
        image,
        &projection,
        Interpolation::Bilinear,
        ROTATION_FILL,
        &mut out,
    );
    out
}
