//! Resize + re-encode passes against a byte budget.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageError, ImageFormat, ImageReader};
use tracing::{debug, info};

use crate::error::{PhotoError, Result};
use crate::policy::CompressionPlan;

const FALLBACK_QUALITY: u8 = 85;

/// Container written by a compression pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// PNG stays PNG; everything else is written as JPEG.
    pub fn for_media_type(media_type: &str) -> Self {
        if media_type.eq_ignore_ascii_case("image/png") {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    fn honours_quality(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// Output of the last pass `compress_image` ran
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub passes: usize,
}

impl CompressedImage {
    pub fn media_type(&self) -> &'static str {
        self.format.mime()
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Scale `(width, height)` so the longer side is at most `max_dimension`.
///
/// Aspect ratio is kept with round-half-up on the short side. Images that
/// already fit are returned untouched.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32, long: u32| -> u32 {
        let (side, long, max) = (side as u64, long as u64, max_dimension as u64);
        (((side * max * 2) + long) / (long * 2)).max(1) as u32
    };

    if width > height {
        (max_dimension, scale(height, width))
    } else {
        (scale(width, height), max_dimension)
    }
}

/// Decode `bytes` with the EXIF orientation applied.
///
/// Re-encoding drops the EXIF block, so the rotation has to be baked into
/// the pixels before resizing.
fn decode_upright(bytes: &[u8]) -> std::result::Result<DynamicImage, ImageError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Decode `bytes`, resize to fit the plan and re-encode.
///
/// Passes run in `plan.quality_steps` order and stop at the first output
/// within `plan.size_budget`. When none fits, the last pass is returned and
/// the caller decides whether it is acceptable.
pub fn compress_image(
    bytes: &[u8],
    media_type: &str,
    plan: &CompressionPlan,
) -> Result<CompressedImage> {
    let source = decode_upright(bytes).map_err(PhotoError::Decode)?;
    let (source_width, source_height) = source.dimensions();
    let (width, height) = fit_dimensions(source_width, source_height, plan.max_dimension);

    debug!(
        source_width,
        source_height, width, height, "resizing photo for upload"
    );

    let canvas = if (width, height) == (source_width, source_height) {
        source
    } else {
        source.resize_exact(width, height, FilterType::Lanczos3)
    };

    let format = OutputFormat::for_media_type(media_type);
    let mut qualities = plan.quality_steps.iter().copied();
    let first_quality = qualities.next().unwrap_or(FALLBACK_QUALITY);

    let mut pass = encode_pass(&canvas, format, first_quality, 1)?;
    for quality in qualities {
        if pass.len() <= plan.size_budget || !format.honours_quality() {
            break;
        }
        pass = encode_pass(&canvas, format, quality, pass.passes + 1)?;
    }

    info!(
        bytes = pass.len(),
        quality = pass.quality,
        passes = pass.passes,
        media_type = pass.media_type(),
        "photo compression complete"
    );

    Ok(pass)
}

fn encode_pass(
    canvas: &DynamicImage,
    format: OutputFormat,
    quality: u8,
    pass_number: usize,
) -> Result<CompressedImage> {
    let mut bytes = Vec::new();

    match format {
        OutputFormat::Jpeg => {
            let rgb = canvas.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            encoder.encode_image(&rgb).map_err(PhotoError::Encode)?;
        }
        OutputFormat::Png => {
            canvas
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(PhotoError::Encode)?;
        }
    }

    debug!(
        pass = pass_number,
        quality,
        bytes = bytes.len(),
        "compression pass"
    );

    Ok(CompressedImage {
        bytes,
        format,
        width: canvas.width(),
        height: canvas.height(),
        quality,
        passes: pass_number,
    })
}
