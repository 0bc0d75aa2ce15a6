//! Filter operations
//!
//! This module provides zero-padded neighborhood filters for grayscale images.
//! Every operation treats samples outside the image as `0.0`.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Dense 2D correlation and convolution
mod correlation;
pub use correlation::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
