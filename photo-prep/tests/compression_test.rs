//! Photo admission and compression tests
//!
//! Images are generated in memory; noise keeps encoders from shrinking them
//! to nothing so the byte budgets actually bite.
//!
//! Run with: cargo test -p photo-prep --test compression_test

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use photo_prep::{
    compress_image, prepare_photo, CompressionPlan, OutputFormat, PhotoError, PhotoPolicy,
};

// ====================================================================================
// Helpers
// ====================================================================================

fn xorshift(state: &mut u32) -> u8 {
    *state ^= *state << 13;
    *state ^= *state >> 17;
    *state ^= *state << 5;
    (*state & 0xff) as u8
}

fn noisy_image(width: u32, height: u32) -> RgbImage {
    let mut state = 0x2545_f491_u32;
    RgbImage::from_fn(width, height, |_, _| {
        Rgb([
            xorshift(&mut state),
            xorshift(&mut state),
            xorshift(&mut state),
        ])
    })
}

fn jpeg_bytes(img: &RgbImage, quality: u8) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(img)
        .unwrap();
    buf
}

fn png_bytes(img: RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Splice an EXIF APP1 segment carrying only an Orientation tag right after SOI.
fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2a");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + segment_len as usize + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\x00\x00");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn decode_payload(data: &str) -> DynamicImage {
    let bytes = STANDARD.decode(data).unwrap();
    image::load_from_memory(&bytes).unwrap()
}

fn tight_policy(max_upload_bytes: u64) -> PhotoPolicy {
    PhotoPolicy {
        max_upload_bytes,
        max_dimension: 200,
        large_max_dimension: 100,
        pass_budget_bytes: max_upload_bytes,
        ..PhotoPolicy::default()
    }
}

// ====================================================================================
// Admission
// ====================================================================================

#[test]
fn rejects_non_image_media_types() {
    let err = prepare_photo(b"%PDF-1.7", "application/pdf", &PhotoPolicy::default()).unwrap_err();
    assert!(matches!(err, PhotoError::NotAnImage { .. }));
    assert_eq!(err.to_string(), "Please select an image file");
}

#[test]
fn small_photo_is_attached_untouched() {
    let original = jpeg_bytes(&noisy_image(64, 48), 90);
    let prepared = prepare_photo(&original, "image/jpeg", &PhotoPolicy::default()).unwrap();

    assert!(!prepared.payload.was_compressed);
    assert_eq!(prepared.payload.media_type, "image/jpeg");
    assert_eq!(prepared.payload.compressed_data, prepared.payload.original_data);
    assert_eq!(STANDARD.decode(&prepared.payload.original_data).unwrap(), original);
    assert_eq!(prepared.upload_bytes, original.len() as u64);
}

#[test]
fn oversized_photo_is_resized_and_recompressed() {
    let original = jpeg_bytes(&noisy_image(600, 400), 100);
    let policy = tight_policy(100_000);
    assert!(original.len() as u64 > policy.max_upload_bytes);

    let prepared = prepare_photo(&original, "image/jpeg", &policy).unwrap();

    assert!(prepared.payload.was_compressed);
    assert_eq!(prepared.payload.media_type, "image/jpeg");
    assert!(prepared.upload_bytes <= policy.max_upload_bytes);
    assert_eq!(prepared.original_bytes, original.len() as u64);
    assert_ne!(prepared.payload.compressed_data, prepared.payload.original_data);

    let shrunk = decode_payload(&prepared.payload.compressed_data);
    assert_eq!(shrunk.dimensions(), (200, 133));
}

#[test]
fn still_too_large_after_compression_is_rejected() {
    let original = jpeg_bytes(&noisy_image(300, 300), 100);
    let policy = PhotoPolicy {
        max_upload_bytes: 1_000,
        pass_budget_bytes: 500,
        ..PhotoPolicy::default()
    };

    let err = prepare_photo(&original, "image/jpeg", &policy).unwrap_err();
    assert!(err.to_string().contains("even after compression"));
    match err {
        PhotoError::TooLarge { size_mb } => assert!(size_mb > 0.0),
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn undecodable_oversized_file_reports_decode_error() {
    let garbage = vec![0xAB_u8; 2_048];
    let err = prepare_photo(&garbage, "image/jpeg", &tight_policy(1_024)).unwrap_err();
    assert!(matches!(err, PhotoError::Decode(_)));
}

// ====================================================================================
// Compression passes
// ====================================================================================

#[test]
fn retry_pass_runs_when_first_misses_budget() {
    let original = jpeg_bytes(&noisy_image(300, 300), 100);
    let plan = CompressionPlan::new(1920, vec![95, 50], 1);

    let result = compress_image(&original, "image/jpeg", &plan).unwrap();
    assert_eq!(result.passes, 2);
    assert_eq!(result.quality, 50);
    assert_eq!(result.format, OutputFormat::Jpeg);
    assert_eq!((result.width, result.height), (300, 300));
}

#[test]
fn first_pass_within_budget_stops_early() {
    let original = jpeg_bytes(&noisy_image(120, 80), 100);
    let plan = CompressionPlan::new(1920, vec![85, 50], u64::MAX);

    let result = compress_image(&original, "image/jpeg", &plan).unwrap();
    assert_eq!(result.passes, 1);
    assert_eq!(result.quality, 85);
}

#[test]
fn lower_quality_pass_is_smaller() {
    let original = jpeg_bytes(&noisy_image(256, 256), 100);

    let high = compress_image(&original, "image/jpeg", &CompressionPlan::new(1920, vec![95], 0)).unwrap();
    let low = compress_image(&original, "image/jpeg", &CompressionPlan::new(1920, vec![30], 0)).unwrap();
    assert!(low.len() < high.len());
}

#[test]
fn png_keeps_format_and_skips_quality_retry() {
    let original = png_bytes(noisy_image(400, 100));
    let plan = CompressionPlan::new(200, vec![85, 50], 1);

    let result = compress_image(&original, "image/png", &plan).unwrap();
    assert_eq!(result.format, OutputFormat::Png);
    assert_eq!(result.media_type(), "image/png");
    assert_eq!(result.passes, 1);
    assert_eq!((result.width, result.height), (200, 50));
}

#[test]
fn other_rasters_are_written_as_jpeg() {
    let mut bmp = Vec::new();
    DynamicImage::ImageRgb8(noisy_image(50, 50))
        .write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp)
        .unwrap();

    let result = compress_image(&bmp, "image/bmp", &CompressionPlan::new(1920, vec![80], u64::MAX)).unwrap();
    assert_eq!(result.media_type(), "image/jpeg");
    assert!(image::load_from_memory_with_format(&result.bytes, ImageFormat::Jpeg).is_ok());
}

#[test]
fn exif_rotation_is_applied_before_encoding() {
    let tagged = with_exif_orientation(&jpeg_bytes(&noisy_image(300, 100), 90), 6);

    let result = compress_image(&tagged, "image/jpeg", &CompressionPlan::new(1920, vec![85], u64::MAX)).unwrap();
    assert_eq!((result.width, result.height), (100, 300));

    let written = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!(written.dimensions(), (100, 300));
}

#[test]
fn rotated_photo_is_fitted_on_its_upright_size() {
    let tagged = with_exif_orientation(&jpeg_bytes(&noisy_image(400, 100), 90), 6);

    let result = compress_image(&tagged, "image/jpeg", &CompressionPlan::new(200, vec![85], u64::MAX)).unwrap();
    assert_eq!((result.width, result.height), (50, 200));
}
