use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared_types::PhotoPayload;
use tracing::{info, warn};

use crate::compress::compress_image;
use crate::error::{PhotoError, Result};
use crate::policy::{CompressionPlan, PhotoPolicy, MIB};

/// A photo accepted for upload
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPhoto {
    pub payload: PhotoPayload,
    pub original_bytes: u64,
    pub upload_bytes: u64,
}

/// Admit a selected file as a chat photo.
///
/// Files within `policy.max_upload_bytes` are attached as-is. Larger files go
/// through `compress_image` and are rejected if they still exceed the limit.
pub fn prepare_photo(bytes: &[u8], media_type: &str, policy: &PhotoPolicy) -> Result<PreparedPhoto> {
    if !media_type.starts_with("image/") {
        return Err(PhotoError::NotAnImage {
            media_type: media_type.to_string(),
        });
    }

    let original_bytes = bytes.len() as u64;
    let original_data = STANDARD.encode(bytes);

    if !policy.needs_compression(original_bytes) {
        info!(bytes = original_bytes, media_type, "photo attached without compression");
        return Ok(PreparedPhoto {
            payload: PhotoPayload {
                compressed_data: original_data.clone(),
                original_data,
                media_type: media_type.to_string(),
                was_compressed: false,
            },
            original_bytes,
            upload_bytes: original_bytes,
        });
    }

    let plan = CompressionPlan::for_file_size(policy, original_bytes);
    let compressed = compress_image(bytes, media_type, &plan)?;

    if compressed.len() > policy.max_upload_bytes {
        let size_mb = compressed.len() as f64 / MIB as f64;
        warn!(size_mb, "photo still too large after compression");
        return Err(PhotoError::TooLarge { size_mb });
    }

    Ok(PreparedPhoto {
        payload: PhotoPayload {
            compressed_data: STANDARD.encode(&compressed.bytes),
            original_data,
            media_type: compressed.media_type().to_string(),
            was_compressed: true,
        },
        original_bytes,
        upload_bytes: compressed.len(),
    })
}
