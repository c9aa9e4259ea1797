//! Photo preparation for chat uploads
//!
//! Pure functions over byte buffers: no DOM handles, so everything here runs
//! the same natively and in the browser.
//!
//! ## Flow
//! - [`prepare_photo`] admits a selected file and decides whether it needs
//!   compression
//! - [`CompressionPlan::for_file_size`] picks canvas size and quality steps
//! - [`compress_image`] runs the resize + re-encode passes

pub mod compress;
pub mod error;
pub mod policy;
pub mod prepare;

pub use compress::{compress_image, fit_dimensions, CompressedImage, OutputFormat};
pub use error::{PhotoError, Result};
pub use policy::{CompressionPlan, PhotoPolicy, MIB};
pub use prepare::{prepare_photo, PreparedPhoto};
