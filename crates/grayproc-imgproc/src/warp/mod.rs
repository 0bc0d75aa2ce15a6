//! Geometric image transformations by inverse mapping.
//!
//! This module provides:
//!
//! - [`Transform`], a 3x3 homogeneous matrix built from 2x2, 2x3, 3x2 or 3x3 blocks
//! - [`warp`], nearest-neighbor resampling of an image through a transform
//! - [`estimate_translation`], the mean displacement of point correspondences
//!
//! # Examples
//!
//! Shifting an image one pixel to the right:
//!
//! ```
//! use grayproc_image::{Image, ImageSize};
//! use grayproc_imgproc::warp::{warp, Transform};
//!
//! let src = Image::<f32, 1>::new(ImageSize { width: 3, height: 1 }, vec![1.0, 2.0, 3.0]).unwrap();
//! let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
//!
//! warp(&src, &mut dst, &Transform::translation(1.0, 0.0)).unwrap();
//!
//! assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0]);
//! ```

mod perspective;
mod transform;
mod translation;

pub use perspective::{warp, warp_with_strategy};
pub use transform::Transform;
pub use translation::{estimate_translation, Correspondence};
