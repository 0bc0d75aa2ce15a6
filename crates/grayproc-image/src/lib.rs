#![deny(missing_docs)]
//! Image types and errors shared by the grayproc crates

/// image representation for image processing purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

#[cfg(feature = "serde")]
mod serde;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
