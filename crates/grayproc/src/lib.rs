#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use grayproc_image as image;

#[doc(inline)]
pub use grayproc_imgproc as imgproc;
